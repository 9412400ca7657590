use crate::domain::notification::NotificationRecord;
use crate::domain::payout::PayoutRequest;
use crate::domain::ticket::{EventRecord, Ticket};
use crate::domain::user::UserProfile;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub type UserStoreBox = Box<dyn UserStore>;
pub type TicketStoreBox = Box<dyn TicketStore>;
pub type EventStoreBox = Box<dyn EventStore>;
pub type PayoutStoreBox = Box<dyn PayoutStore>;
pub type NotificationStoreBox = Box<dyn NotificationStore>;
pub type ProcessedDepositStoreBox = Box<dyn ProcessedDepositStore>;

/// Document-store ports. The backing store is an external collaborator with
/// per-document atomic writes; every `store` is an upsert keyed by id.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn store(&self, user: UserProfile) -> Result<()>;
    async fn get(&self, uid: &str) -> Result<Option<UserProfile>>;
    async fn all(&self) -> Result<Vec<UserProfile>>;
}

#[async_trait]
pub trait TicketStore: Send + Sync {
    async fn store(&self, ticket: Ticket) -> Result<()>;
    async fn get(&self, ticket_id: &str) -> Result<Option<Ticket>>;
}

#[async_trait]
pub trait EventStore: Send + Sync {
    async fn store(&self, event: EventRecord) -> Result<()>;
    async fn get(&self, event_id: &str) -> Result<Option<EventRecord>>;
}

#[async_trait]
pub trait PayoutStore: Send + Sync {
    async fn store(&self, request: PayoutRequest) -> Result<()>;
    async fn get(&self, request_id: &str) -> Result<Option<PayoutRequest>>;
    async fn all(&self) -> Result<Vec<PayoutRequest>>;
}

#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn store(&self, notification: NotificationRecord) -> Result<()>;
    async fn for_user(&self, user_id: &str) -> Result<Vec<NotificationRecord>>;
}

/// Idempotency markers for callback processing.
#[async_trait]
pub trait ProcessedDepositStore: Send + Sync {
    /// Atomically records `deposit_id` as processed. Returns `false` without
    /// writing when a marker already exists, so exactly one caller per
    /// deposit observes `true`.
    async fn mark_processed(&self, deposit_id: &str, at: DateTime<Utc>) -> Result<bool>;
}
