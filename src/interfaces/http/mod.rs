//! Inbound HTTP surface: provider callbacks, the thin payments API the
//! checkout client calls, and the admin back-office endpoints.

mod admin;
mod callbacks;
mod payments;

use crate::application::notifications::NotificationFanout;
use crate::application::payouts::PayoutWorkflow;
use crate::application::reconciler::Reconciler;
use crate::error::PaymentError;
use crate::interfaces::provider::ProviderGateway;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub reconciler: Arc<Reconciler>,
    pub payouts: Arc<PayoutWorkflow>,
    pub fanout: Arc<NotificationFanout>,
    pub gateway: Arc<ProviderGateway>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/pawapay/deposit-callback", post(callbacks::deposit_callback))
        .route("/pawapay/payout-callback", post(callbacks::payout_callback))
        .route("/pawapay/refund-callback", post(callbacks::refund_callback))
        .route("/payments/active-conf/{country}", get(payments::active_conf))
        .route("/payments/deposits", post(payments::initiate_deposit))
        .route(
            "/payments/deposits/{deposit_id}/status",
            get(payments::deposit_status),
        )
        .route("/admin/payout-requests", get(admin::list_payout_requests))
        .route("/admin/payout-requests", post(admin::submit_payout_request))
        .route(
            "/admin/payout-requests/{request_id}/process",
            post(admin::process_payout_request),
        )
        .route(
            "/admin/notifications/broadcast",
            post(admin::broadcast_notification),
        )
        .with_state(state)
}

/// Maps the error taxonomy onto HTTP statuses for the API and admin routes.
/// Callback routes use their own fixed contract instead.
pub(crate) fn error_response(err: PaymentError) -> Response {
    let status = match &err {
        PaymentError::Validation(_) => StatusCode::BAD_REQUEST,
        PaymentError::NotFound(_) => StatusCode::NOT_FOUND,
        PaymentError::Conflict(_) => StatusCode::CONFLICT,
        PaymentError::Transport(_) => StatusCode::BAD_GATEWAY,
        PaymentError::Configuration(_) | PaymentError::Serialization(_) | PaymentError::Store(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}
