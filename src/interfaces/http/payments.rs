use super::{error_response, AppState};
use crate::domain::deposit::{DepositMetadata, DepositOutcome, NewDeposit};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

/// Checkout form for a deposit, as submitted by the web client.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct DepositForm {
    #[serde(default)]
    deposit_id: Option<String>,
    amount: Decimal,
    currency: String,
    country: String,
    correspondent: String,
    phone_number: String,
    metadata: DepositMetadata,
}

impl From<DepositForm> for NewDeposit {
    fn from(form: DepositForm) -> Self {
        NewDeposit {
            deposit_id: form.deposit_id,
            amount: form.amount,
            currency: form.currency,
            country: form.country,
            correspondent: form.correspondent,
            payer_msisdn: form.phone_number,
            metadata: form.metadata,
        }
    }
}

pub(super) async fn active_conf(
    State(state): State<AppState>,
    Path(country): Path<String>,
) -> Response {
    match state.gateway.country_config(&country).await {
        Ok(Some(config)) => (StatusCode::OK, Json(config_to_json(config))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("country {country} is not supported") })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(super) async fn initiate_deposit(
    State(state): State<AppState>,
    Json(form): Json<DepositForm>,
) -> Response {
    match state.gateway.initiate_deposit(form.into()).await {
        Ok(DepositOutcome::Accepted { deposit_id }) => (
            StatusCode::OK,
            Json(json!({ "success": true, "depositId": deposit_id })),
        )
            .into_response(),
        Ok(DepositOutcome::Rejected { message }) => (
            StatusCode::OK,
            Json(json!({ "success": false, "message": message })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(super) async fn deposit_status(
    State(state): State<AppState>,
    Path(deposit_id): Path<String>,
) -> Response {
    match state.gateway.deposit_status(&deposit_id).await {
        Ok(status) => (
            StatusCode::OK,
            Json(json!({ "depositId": deposit_id, "status": status })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

fn config_to_json(config: crate::interfaces::provider::CountryConfig) -> serde_json::Value {
    json!({
        "country": config.country,
        "correspondents": config
            .correspondents
            .iter()
            .map(|c| json!({
                "correspondent": c.correspondent,
                "currency": c.currency,
                "minAmount": c.min_amount,
                "maxAmount": c.max_amount,
                "decimalsInAmount": c.decimals_in_amount,
            }))
            .collect::<Vec<_>>(),
    })
}
