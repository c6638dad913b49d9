//! Outbound broker calls made by the HTTP notification adapter

use std::sync::Arc;
use std::time::Duration;

use httpmock::prelude::*;
use url::Url;
use user_management::config::UserManagementConfig;
use user_management::contract::model::NewUser;
use user_management::domain::error::NotificationError;
use user_management::domain::ports::NotificationPort;
use user_management::infra::broker::HttpEventPublisher;
use user_management::{StoreBackend, UserManagement};

fn publisher(server: &MockServer) -> HttpEventPublisher {
    let base = Url::parse(&server.base_url()).unwrap();
    HttpEventPublisher::with_timeout(base, Duration::from_secs(2)).unwrap()
}

#[tokio::test]
async fn publish_posts_json_to_topic_path() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/topics/user")
            .header("content-type", "application/json")
            .json_body(serde_json::json!({ "hello": "broker" }));
        then.status(202);
    });

    let adapter: Arc<dyn NotificationPort> = Arc::new(publisher(&server));
    let result = adapter
        .publish("user", br#"{"hello":"broker"}"#.to_vec())
        .await;

    mock.assert();
    assert!(result.is_ok());
}

#[tokio::test]
async fn non_success_status_is_rejected() {
    let server = MockServer::start();

    let _mock = server.mock(|when, then| {
        when.method(POST).path("/topics/user");
        then.status(503);
    });

    let result = publisher(&server).publish("user", b"{}".to_vec()).await;

    match result.unwrap_err() {
        NotificationError::Rejected { status } => assert_eq!(status, 503),
        other => panic!("Expected Rejected error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_broker_is_a_transport_error() {
    // Nothing listens on the discard port.
    let base = Url::parse("http://127.0.0.1:9").unwrap();
    let adapter = HttpEventPublisher::with_timeout(base, Duration::from_millis(500)).unwrap();

    let result = adapter.publish("user", b"{}".to_vec()).await;

    assert!(matches!(result, Err(NotificationError::Transport { .. })));
}

#[tokio::test]
async fn wired_module_announces_created_user_to_broker() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/events/topics/accounts")
            .header("content-type", "application/json");
        then.status(200);
    });

    let mut cfg = UserManagementConfig::default();
    cfg.bcrypt_cost = 4;
    cfg.notifications.base_url = Some(format!("{}/events", server.base_url()));
    cfg.notifications.topic = "accounts".to_string();
    let module = UserManagement::init(&cfg, StoreBackend::InMemory)
        .await
        .unwrap();

    let draft = NewUser {
        first_name: "ann".to_string(),
        email: "ann@example.com".to_string(),
        password: "pw".to_string(),
        ..NewUser::default()
    };
    module.client().create(draft).await.unwrap();
    module.service().notifier().flush().await;

    mock.assert();
}
