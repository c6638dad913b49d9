use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::StatusCode,
    routing::{get, post, put},
    Extension, Router,
};
use tower_http::timeout::TimeoutLayer;

use crate::api::rest::handlers;
use crate::domain::service::Service;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    router
        // POST /users - Create a user, GET /users - Filtered, paged query
        .route(
            "/users",
            post(handlers::create_user).get(handlers::query_users),
        )
        // PUT /users/{id} - Replace a user, DELETE /users/{id} - Remove a user
        .route(
            "/users/{id}",
            put(handlers::update_user).delete(handlers::delete_user),
        )
        .route("/health", get(handlers::health))
        .layer(Extension(service))
        .layer(timeout_layer(REQUEST_TIMEOUT))
}

/// Requests running past `timeout` are answered with 408.
fn timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    #[tokio::test]
    async fn slow_request_times_out_with_408() {
        let app = Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "done"
                }),
            )
            .layer(timeout_layer(Duration::from_millis(20)));

        let resp = app
            .oneshot(Request::get("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::REQUEST_TIMEOUT);
    }
}
