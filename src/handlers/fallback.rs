use crate::core::error::ApiError;
use axum::{
    http::Uri,
    response::{IntoResponse, Response},
};

pub async fn fallback_handler(uri: Uri) -> Response {
    ApiError::NotFound(format!(
        "No route for {}. Valid endpoints: /users, /health",
        uri.path()
    ))
    .into_response()
}

#[cfg(test)]
mod tests {
    use crate::core::routes::build_router;
    use crate::core::state::test_support::create_test_state;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = build_router(create_test_state().await);

        let response = app
            .oneshot(Request::builder().uri("/accounts").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(body.contains("/accounts"));
    }
}
