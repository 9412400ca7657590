use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment state of a ticket. Drafts await payment; the reconciler commits
/// them to `Completed` when the provider confirms the deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketPaymentStatus {
    AwaitingPayment,
    Completed,
    Failed,
}

/// The ticket payload echoed back by the provider inside deposit metadata.
/// This is the full draft as submitted at checkout; the reconciler finalizes
/// it verbatim rather than re-reading a draft record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDraft {
    pub ticket_id: String,
    pub event_id: String,
    pub holder_name: String,
    pub holder_phone: String,
    pub tier: String,
    pub quantity: u32,
    pub amount: Decimal,
    pub currency: String,
}

/// A committed ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub event_id: String,
    pub holder_name: String,
    pub holder_phone: String,
    pub tier: String,
    pub quantity: u32,
    pub amount: Decimal,
    pub currency: String,
    pub payment_status: TicketPaymentStatus,
    /// Deposit that paid for this ticket.
    pub deposit_id: String,
    pub issued_at: DateTime<Utc>,
}

impl Ticket {
    /// Commits a draft to active status.
    pub fn finalize(draft: TicketDraft, deposit_id: &str, at: DateTime<Utc>) -> Ticket {
        Ticket {
            id: draft.ticket_id,
            event_id: draft.event_id,
            holder_name: draft.holder_name,
            holder_phone: draft.holder_phone,
            tier: draft.tier,
            quantity: draft.quantity,
            amount: draft.amount,
            currency: draft.currency,
            payment_status: TicketPaymentStatus::Completed,
            deposit_id: deposit_id.to_string(),
            issued_at: at,
        }
    }
}

/// The slice of an event record the payment core touches: the running count
/// of issued tickets, incremented together with ticket finalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: String,
    pub tickets_issued: u32,
}

impl EventRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tickets_issued: 0,
        }
    }
}
