use crate::core::error::ServiceError;
use crate::models::payload::UserRequest;
use crate::models::user::{NewUser, User};
use crate::stores::user_store::UserStore;
use crate::utils::password::hash_password;

/// Business operations over the user store
pub struct UserService {
    store: UserStore,
}

impl UserService {
    pub fn new(store: UserStore) -> Self {
        Self { store }
    }

    /// Hash the submitted password and persist the user
    ///
    /// Only the hash reaches the store; the plaintext is dropped here.
    pub async fn add_user(&self, request: UserRequest) -> Result<User, ServiceError> {
        let UserRequest {
            username,
            password,
            role,
        } = request;

        // argon2 is CPU-bound, keep it off the async workers
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| ServiceError::PasswordHash(e.to_string()))?
            .map_err(|e| ServiceError::PasswordHash(e.to_string()))?;

        let user = self
            .store
            .save(NewUser::new(username, password_hash, role))
            .await?;

        Ok(user)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ServiceError> {
        Ok(self.store.find_all().await?)
    }

    pub fn store(&self) -> &UserStore {
        &self.store
    }
}
