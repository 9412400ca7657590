use crate::domain::plan::PlanId;
use crate::domain::ticket::TicketDraft;
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Deposit statuses observed on the provider wire. The provider's status
/// vocabulary is open-ended; anything unrecognized maps to `Unknown` and is
/// treated as a non-success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DepositStatus {
    Accepted,
    Submitted,
    Enqueued,
    Pending,
    Completed,
    Successful,
    Failed,
    Rejected,
    #[serde(other)]
    Unknown,
}

impl DepositStatus {
    /// The two codes the provider uses interchangeably for a settled deposit.
    pub fn is_success(self) -> bool {
        matches!(self, DepositStatus::Completed | DepositStatus::Successful)
    }
}

impl fmt::Display for DepositStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Deposit metadata, echoed back verbatim by the provider on callback. A
/// tagged union validated at the boundary: an unknown tag or missing field
/// fails the parse instead of being duck-typed through dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DepositMetadata {
    #[serde(rename_all = "camelCase")]
    PlanUpgrade { user_id: String, plan_id: PlanId },
    TicketPurchase { ticket: TicketDraft },
}

/// A deposit to be submitted to the provider. `deposit_id` is normally left
/// unset and assigned client-side at submission.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDeposit {
    pub deposit_id: Option<String>,
    pub amount: Decimal,
    pub currency: String,
    pub country: String,
    pub correspondent: String,
    pub payer_msisdn: String,
    pub metadata: DepositMetadata,
}

/// Result of a deposit initiation. A provider-level decline is a value, not
/// an error; only transport and configuration failures raise.
#[derive(Debug, Clone, PartialEq)]
pub enum DepositOutcome {
    Accepted { deposit_id: String },
    Rejected { message: String },
}

/// An asynchronous provider callback, parsed from untrusted JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct CallbackPayload {
    pub deposit_id: String,
    pub status: DepositStatus,
    pub metadata: Option<Value>,
}

impl CallbackPayload {
    /// Structural validation: `depositId` and `status` must both be present
    /// as strings. Metadata is carried through raw; interpreting it is the
    /// reconciler's job, and its absence is not a structural failure.
    pub fn parse(body: &Value) -> Result<CallbackPayload> {
        let deposit_id = body
            .get("depositId")
            .and_then(Value::as_str)
            .ok_or_else(|| PaymentError::Validation("missing depositId".to_string()))?;
        let status = body
            .get("status")
            .and_then(Value::as_str)
            .ok_or_else(|| PaymentError::Validation("missing status".to_string()))?;
        let status = serde_json::from_value(Value::String(status.to_string()))?;
        Ok(CallbackPayload {
            deposit_id: deposit_id.to_string(),
            status,
            metadata: body.get("metadata").cloned(),
        })
    }
}
