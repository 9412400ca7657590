use super::AppState;
use crate::domain::deposit::CallbackPayload;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use tracing::{error, info, warn};

/// The provider treats anything but a success response as a delivery
/// failure and redelivers. So: 400 only for structurally invalid payloads,
/// 500 only for genuine processing failures where redelivery is wanted, and
/// 200 for every business outcome in between.
fn received() -> Response {
    (StatusCode::OK, Json(json!({ "status": "received" }))).into_response()
}

fn invalid() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "Invalid callback data" })),
    )
        .into_response()
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal Server Error" })),
    )
        .into_response()
}

pub(super) async fn deposit_callback(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Response {
    let payload = match CallbackPayload::parse(&body) {
        Ok(payload) => payload,
        Err(err) => {
            warn!(%err, "rejected malformed deposit callback");
            return invalid();
        }
    };
    match state.reconciler.handle_deposit_callback(payload).await {
        Ok(disposition) => {
            info!(?disposition, "deposit callback handled");
            received()
        }
        Err(err) => {
            error!(%err, "deposit callback processing failed");
            internal_error()
        }
    }
}

/// Payout and refund callbacks carry the same envelope but finalize no
/// business object; the terminal status is logged for the audit trail.
pub(super) async fn payout_callback(Json(body): Json<Value>) -> Response {
    acknowledge_only("payout", &body)
}

pub(super) async fn refund_callback(Json(body): Json<Value>) -> Response {
    acknowledge_only("refund", &body)
}

fn acknowledge_only(kind: &str, body: &Value) -> Response {
    match CallbackPayload::parse(body) {
        Ok(payload) => {
            info!(
                kind,
                deposit_id = payload.deposit_id,
                status = %payload.status,
                "callback acknowledged"
            );
            received()
        }
        Err(err) => {
            warn!(kind, %err, "rejected malformed callback");
            invalid()
        }
    }
}
