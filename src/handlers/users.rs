use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::models::payload::{UserRequest, UserResponse};
use crate::security::auth_gate::{authorize, Caller, Operation};
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{info, warn};

/// Run the gate for `operation`, logging denials
fn gate(state: &AppState, headers: &HeaderMap, operation: Operation) -> Result<Caller, ApiError> {
    let caller = state.credentials.identify(headers);

    if let Err(denied) = authorize(operation, &caller) {
        warn!(
            operation = operation.name(),
            subject = caller.subject(),
            reason = %denied,
            "Access denied"
        );
        return Err(denied.into());
    }

    Ok(caller)
}

/// Create a user
///
/// POST /users  (ADMIN)
pub async fn add_user_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let caller = gate(&state, &headers, Operation::AddUser)?;

    let request = UserRequest::from_json(&body).inspect_err(|e| {
        warn!(subject = caller.subject(), error = %e, "Rejected user payload");
    })?;

    let user = state.users.add_user(request).await?;

    info!(
        user_id = user.id,
        username = %user.username,
        role = %user.role,
        subject = caller.subject(),
        "User created"
    );

    Ok((StatusCode::OK, Json(UserResponse::from(&user))).into_response())
}

/// List all users
///
/// GET /users  (ADMIN, VIEWER)
pub async fn list_users_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let caller = gate(&state, &headers, Operation::ListUsers)?;

    let users = state.users.list_users().await?;

    info!(count = users.len(), subject = caller.subject(), "Users listed");

    let body: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();

    Ok((StatusCode::OK, Json(body)).into_response())
}
