#![allow(dead_code)]

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tixgate::application::notifications::NotificationFanout;
use tixgate::application::payouts::PayoutWorkflow;
use tixgate::application::reconciler::Reconciler;
use tixgate::config::ProviderConfig;
use tixgate::infrastructure::in_memory::{
    InMemoryEventStore, InMemoryNotificationStore, InMemoryPayoutStore,
    InMemoryProcessedDepositStore, InMemoryTicketStore, InMemoryUserStore,
};
use tixgate::interfaces::http::{router, AppState};
use tixgate::interfaces::provider::ProviderGateway;
use tower::ServiceExt;

/// A full router over in-memory stores, with handles kept so tests can
/// inspect what the handlers wrote.
pub struct TestApp {
    pub router: Router,
    pub users: InMemoryUserStore,
    pub tickets: InMemoryTicketStore,
    pub events: InMemoryEventStore,
    pub payouts: InMemoryPayoutStore,
    pub notifications: InMemoryNotificationStore,
}

pub fn test_app() -> TestApp {
    let users = InMemoryUserStore::new();
    let tickets = InMemoryTicketStore::new();
    let events = InMemoryEventStore::new();
    let payouts = InMemoryPayoutStore::new();
    let notifications = InMemoryNotificationStore::new();

    let reconciler = Reconciler::new(
        Box::new(users.clone()),
        Box::new(tickets.clone()),
        Box::new(events.clone()),
        Box::new(InMemoryProcessedDepositStore::new()),
    );
    // The gateway is not exercised by router tests; any syntactically valid
    // endpoint will do.
    let gateway = ProviderGateway::new(&ProviderConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        api_token: "test-token".to_string(),
    })
    .unwrap();

    let state = AppState {
        reconciler: Arc::new(reconciler),
        payouts: Arc::new(PayoutWorkflow::new(Box::new(payouts.clone()))),
        fanout: Arc::new(NotificationFanout::new(
            Box::new(users.clone()),
            Box::new(notifications.clone()),
        )),
        gateway: Arc::new(gateway),
    };

    TestApp {
        router: router(state),
        users,
        tickets,
        events,
        payouts,
        notifications,
    }
}

pub async fn post_json(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, request).await
}

pub async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(router, request).await
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}
