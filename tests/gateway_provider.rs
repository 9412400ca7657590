use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use std::collections::HashMap;
use tixgate::config::ProviderConfig;
use tixgate::domain::deposit::{DepositMetadata, DepositOutcome, DepositStatus, NewDeposit};
use tixgate::domain::plan::PlanId;
use tixgate::interfaces::provider::ProviderGateway;

/// A stand-in for the provider API, served on a random local port.
async fn spawn_provider() -> String {
    let router = Router::new()
        .route("/v2/active-conf", get(active_conf))
        .route("/deposits", post(create_deposit))
        .route("/deposits/{deposit_id}", get(deposit_rows));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn active_conf(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    assert_eq!(params.get("operationType").map(String::as_str), Some("DEPOSIT"));
    Json(json!({
        "countries": [{
            "country": "MWI",
            "correspondents": [{
                "correspondent": "AIRTEL_MWI",
                "currency": "MWK",
                "minAmount": "100.00",
                "maxAmount": "750000.00",
                "decimalsInAmount": 2
            }]
        }]
    }))
}

async fn create_deposit(Json(body): Json<Value>) -> Response {
    let deposit_id = body["depositId"].as_str().unwrap_or_default().to_string();
    // Amounts are formatted before they hit the wire.
    assert!(body["amount"].as_str().unwrap().contains('.'));

    if body["amount"] == "13.00" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "rejectionReason": { "rejectionMessage": "Amount below minimum" }
            })),
        )
            .into_response();
    }
    if deposit_id.starts_with("rej-") {
        return Json(json!({
            "depositId": deposit_id,
            "status": "REJECTED",
            "rejectionReason": { "rejectionMessage": "Insufficient payer funds" }
        }))
        .into_response();
    }
    Json(json!({ "depositId": deposit_id, "status": "ACCEPTED" })).into_response()
}

async fn deposit_rows(Path(deposit_id): Path<String>) -> Json<Value> {
    if deposit_id == "settled" {
        Json(json!([{ "depositId": deposit_id, "status": "COMPLETED" }]))
    } else {
        Json(json!([]))
    }
}

fn gateway(base_url: String) -> ProviderGateway {
    ProviderGateway::new(&ProviderConfig {
        base_url,
        api_token: "test-token".to_string(),
    })
    .unwrap()
}

fn deposit(deposit_id: Option<&str>, amount: rust_decimal::Decimal) -> NewDeposit {
    NewDeposit {
        deposit_id: deposit_id.map(str::to_string),
        amount,
        currency: "MWK".to_string(),
        country: "MWI".to_string(),
        correspondent: "AIRTEL_MWI".to_string(),
        payer_msisdn: "+265991234567".to_string(),
        metadata: DepositMetadata::PlanUpgrade {
            user_id: "u1".to_string(),
            plan_id: PlanId::Starter,
        },
    }
}

#[tokio::test]
async fn country_config_finds_supported_country() {
    let gateway = gateway(spawn_provider().await);

    let config = gateway.country_config("MWI").await.unwrap().unwrap();
    assert_eq!(config.country, "MWI");
    assert_eq!(config.correspondents.len(), 1);
    let channel = &config.correspondents[0];
    assert_eq!(channel.correspondent, "AIRTEL_MWI");
    assert_eq!(channel.min_amount, dec!(100));
    assert_eq!(channel.decimals_in_amount, 2);
}

#[tokio::test]
async fn country_config_absent_country_is_none() {
    let gateway = gateway(spawn_provider().await);
    assert!(gateway.country_config("ZWE").await.unwrap().is_none());
}

#[tokio::test]
async fn initiate_deposit_assigns_an_id_when_none_given() {
    let gateway = gateway(spawn_provider().await);

    let outcome = gateway
        .initiate_deposit(deposit(None, dec!(2500)))
        .await
        .unwrap();
    let DepositOutcome::Accepted { deposit_id } = outcome else {
        panic!("expected acceptance, got {outcome:?}");
    };
    assert!(!deposit_id.is_empty());
}

#[tokio::test]
async fn initiate_deposit_keeps_caller_assigned_id() {
    let gateway = gateway(spawn_provider().await);

    let outcome = gateway
        .initiate_deposit(deposit(Some("my-dep-1"), dec!(2500)))
        .await
        .unwrap();
    assert_eq!(
        outcome,
        DepositOutcome::Accepted {
            deposit_id: "my-dep-1".to_string()
        }
    );
}

#[tokio::test]
async fn provider_rejection_is_a_value_not_an_error() {
    let gateway = gateway(spawn_provider().await);

    let outcome = gateway
        .initiate_deposit(deposit(Some("rej-1"), dec!(2500)))
        .await
        .unwrap();
    assert_eq!(
        outcome,
        DepositOutcome::Rejected {
            message: "Insufficient payer funds".to_string()
        }
    );
}

#[tokio::test]
async fn http_level_decline_surfaces_the_structured_message() {
    let gateway = gateway(spawn_provider().await);

    let outcome = gateway
        .initiate_deposit(deposit(None, dec!(13)))
        .await
        .unwrap();
    assert_eq!(
        outcome,
        DepositOutcome::Rejected {
            message: "Amount below minimum".to_string()
        }
    );
}

#[tokio::test]
async fn deposit_status_reads_first_row() {
    let gateway = gateway(spawn_provider().await);
    let status = gateway.deposit_status("settled").await.unwrap();
    assert_eq!(status, DepositStatus::Completed);
}

#[tokio::test]
async fn empty_status_result_reads_as_pending() {
    let gateway = gateway(spawn_provider().await);
    let status = gateway.deposit_status("unheard-of").await.unwrap();
    assert_eq!(status, DepositStatus::Pending);
}

#[tokio::test]
async fn unreachable_provider_is_a_transport_error() {
    let gateway = gateway("http://127.0.0.1:1".to_string());
    let result = gateway.deposit_status("d1").await;
    assert!(matches!(
        result,
        Err(tixgate::error::PaymentError::Transport(_))
    ));
}
