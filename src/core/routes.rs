// HTTP routes configuration

use crate::core::state::AppState;
use axum::{routing::get, Router};
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Public endpoints
        .route("/health", get(crate::handlers::health::health_handler))

        // User endpoints (require a bearer token)
        .route(
            "/users",
            get(crate::handlers::users::list_users_handler)
                .post(crate::handlers::users::add_user_handler),
        )

        // 404 fallback for all unmatched routes
        .fallback(crate::handlers::fallback::fallback_handler)

        .with_state(state)
}
