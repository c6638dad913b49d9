//! End-to-end checks of the REST surface through the axum router

mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{RecordingPort, TEST_COST};
use user_management::config::UserManagementConfig;
use user_management::infra::storage::InMemoryUsersRepository;
use user_management::UserManagement;

fn app() -> (Router, UserManagement, Arc<RecordingPort>) {
    let cfg = UserManagementConfig {
        bcrypt_cost: TEST_COST,
        ..UserManagementConfig::default()
    };
    let port = Arc::new(RecordingPort::default());
    let module = UserManagement::from_parts(
        Arc::new(InMemoryUsersRepository::new()),
        port.clone(),
        &cfg,
    );
    (module.router(), module, port)
}

async fn call(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Option<String>, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let resp = router
        .clone()
        .oneshot(req.body(body).unwrap())
        .await
        .unwrap();

    let status = resp.status();
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, content_type, value)
}

fn john() -> Value {
    json!({
        "first_name": "john",
        "last_name": "doe",
        "nickname": "jd",
        "password": "pw",
        "email": "john@example.com",
        "country": "TR"
    })
}

#[tokio::test]
async fn create_returns_created_with_id() {
    let (router, _, _) = app();

    let (status, _, body) = call(&router, Method::POST, "/users", Some(john())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "OK");
    assert!(!body["id"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn create_with_bad_email_is_problem_400() {
    let (router, _, port) = app();
    let mut draft = john();
    draft["email"] = json!("not-an-email");

    let (status, content_type, body) = call(&router, Method::POST, "/users", Some(draft)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(content_type.as_deref(), Some("application/problem+json"));
    assert_eq!(body["code"], "INVALID_ARGUMENT");
    assert_eq!(body["instance"], "/users");
    assert!(port.events().is_empty());
}

#[tokio::test]
async fn query_lists_created_users_without_passwords() {
    let (router, _, _) = app();
    let (_, _, created) = call(&router, Method::POST, "/users", Some(john())).await;

    let (status, _, body) = call(
        &router,
        Method::GET,
        "/users?email=john@example.com&page=1&size=5",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], created["id"]);
    assert_eq!(items[0]["first_name"], "John");
    assert!(items[0].get("password").is_none());
    assert_eq!(body["meta"], json!({ "page": 1, "size": 5, "total": 1 }));
}

#[tokio::test]
async fn query_with_zero_size_is_400() {
    let (router, _, _) = app();

    let (status, _, body) = call(&router, Method::GET, "/users?size=0", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ARGUMENT");
}

#[tokio::test]
async fn update_replaces_fields() {
    let (router, _, _) = app();
    let (_, _, created) = call(&router, Method::POST, "/users", Some(john())).await;
    let id = created["id"].as_str().unwrap();

    let (status, _, body) = call(
        &router,
        Method::PUT,
        &format!("/users/{id}"),
        Some(json!({
            "first_name": "johnny",
            "last_name": "doe",
            "nickname": "jd",
            "email": "johnny@example.com",
            "country": "DE"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);
    assert_eq!(body["first_name"], "Johnny");
    assert_eq!(body["country"], "DE");
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn update_unknown_user_is_404() {
    let (router, _, _) = app();

    let (status, content_type, body) =
        call(&router, Method::PUT, "/users/missing", Some(john())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(content_type.as_deref(), Some("application/problem+json"));
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn delete_then_delete_again() {
    let (router, module, port) = app();
    let (_, _, created) = call(&router, Method::POST, "/users", Some(john())).await;
    let uri = format!("/users/{}", created["id"].as_str().unwrap());

    let (first, _, body) = call(&router, Method::DELETE, &uri, None).await;
    let (second, _, _) = call(&router, Method::DELETE, &uri, None).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["id"], created["id"]);
    assert_eq!(second, StatusCode::NOT_FOUND);

    module.service().notifier().flush().await;
    let mut names = port.names();
    names.sort();
    assert_eq!(names, vec!["user_created", "user_deleted"]);
}

#[tokio::test]
async fn health_reports_ok() {
    let (router, _, _) = app();

    let (status, _, body) = call(&router, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "OK" }));
}

#[tokio::test]
async fn health_fails_after_shutdown() {
    let (router, module, _) = app();
    module.service().shutdown().await.unwrap();

    let (status, _, body) = call(&router, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "INTERNAL");
}
