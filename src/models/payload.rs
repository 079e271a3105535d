use crate::core::error::ApiError;
use crate::models::user::{Role, User};
use serde::{Deserialize, Serialize};

/// Inbound `POST /users` body
///
/// An `id` sent by the client is not a field here and is dropped along with
/// any other unknown key.
#[derive(Debug, Deserialize)]
pub struct UserRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl UserRequest {
    /// Decode and validate a raw request body
    pub fn from_json(body: &[u8]) -> Result<Self, ApiError> {
        let request: UserRequest = serde_json::from_slice(body)
            .map_err(|e| ApiError::BadRequest(format!("Invalid user payload: {}", e)))?;

        request.validate()?;

        Ok(request)
    }

    fn validate(&self) -> Result<(), ApiError> {
        if self.username.is_empty() {
            return Err(ApiError::BadRequest("username must not be empty".to_string()));
        }

        Ok(())
    }
}

/// Outbound user representation. Has no password field.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    pub id: u64,
    pub username: String,
    pub role: Role,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: user.role,
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}
