use super::{error_response, AppState};
use crate::domain::payout::PayoutDecision;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SubmitPayoutForm {
    organizer_id: String,
    amount: Decimal,
}

#[derive(Debug, Deserialize)]
pub(super) struct ProcessPayoutForm {
    status: PayoutDecision,
}

#[derive(Debug, Deserialize)]
pub(super) struct BroadcastForm {
    title: String,
    message: String,
    #[serde(default)]
    link: Option<String>,
}

pub(super) async fn list_payout_requests(State(state): State<AppState>) -> Response {
    match state.payouts.requests().await {
        Ok(requests) => (StatusCode::OK, Json(requests)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(super) async fn submit_payout_request(
    State(state): State<AppState>,
    Json(form): Json<SubmitPayoutForm>,
) -> Response {
    match state
        .payouts
        .submit_request(&form.organizer_id, form.amount)
        .await
    {
        Ok(request) => (StatusCode::CREATED, Json(request)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(super) async fn process_payout_request(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
    Json(form): Json<ProcessPayoutForm>,
) -> Response {
    match state.payouts.process_request(&request_id, form.status).await {
        Ok(request) => (StatusCode::OK, Json(request)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(super) async fn broadcast_notification(
    State(state): State<AppState>,
    Json(form): Json<BroadcastForm>,
) -> Response {
    match state
        .fanout
        .send_to_all(&form.title, &form.message, form.link)
        .await
    {
        Ok(report) => (
            StatusCode::OK,
            Json(json!({
                "attempted": report.attempted,
                "delivered": report.delivered,
                "failed": report.failed,
            })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}
