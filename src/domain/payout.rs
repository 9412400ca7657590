use crate::error::{PaymentError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoutStatus {
    Pending,
    Approved,
    Denied,
}

/// The administrative decision applied to a pending request. Separate from
/// `PayoutStatus` so a caller cannot transition a request back to `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoutDecision {
    Approved,
    Denied,
}

impl From<PayoutDecision> for PayoutStatus {
    fn from(decision: PayoutDecision) -> Self {
        match decision {
            PayoutDecision::Approved => PayoutStatus::Approved,
            PayoutDecision::Denied => PayoutStatus::Denied,
        }
    }
}

/// An organizer's withdrawal request. Created `Pending`; an admin decision
/// moves it to a terminal state exactly once. Requests are never deleted.
/// No fund transfer is modeled here, only the recorded decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutRequest {
    pub id: String,
    pub organizer_id: String,
    pub amount: Decimal,
    pub status: PayoutStatus,
    pub requested_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
}

impl PayoutRequest {
    pub fn new(organizer_id: impl Into<String>, amount: Decimal, at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            organizer_id: organizer_id.into(),
            amount,
            status: PayoutStatus::Pending,
            requested_at: at,
            processed_at: None,
        }
    }

    /// Applies an admin decision. Only a `Pending` request may transition;
    /// re-deciding an already-decided request is a conflict.
    pub fn apply(&mut self, decision: PayoutDecision, at: DateTime<Utc>) -> Result<()> {
        if self.status != PayoutStatus::Pending {
            return Err(PaymentError::Conflict(format!(
                "payout request {} is already {:?}",
                self.id, self.status
            )));
        }
        self.status = decision.into();
        self.processed_at = Some(at);
        Ok(())
    }
}
