use crate::domain::notification::NotificationRecord;
use crate::domain::payout::PayoutRequest;
use crate::domain::ports::{
    EventStore, NotificationStore, PayoutStore, ProcessedDepositStore, TicketStore, UserStore,
};
use crate::domain::ticket::{EventRecord, Ticket};
use crate::domain::user::UserProfile;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory document stores. `Clone` shares the underlying map, so the same
/// store instance can back several engines at once. These stand in for the
/// external document store in tests and single-process deployments.
#[derive(Default, Clone)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<String, UserProfile>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn store(&self, user: UserProfile) -> Result<()> {
        let mut users = self.users.write().await;
        users.insert(user.uid.clone(), user);
        Ok(())
    }

    async fn get(&self, uid: &str) -> Result<Option<UserProfile>> {
        let users = self.users.read().await;
        Ok(users.get(uid).cloned())
    }

    async fn all(&self) -> Result<Vec<UserProfile>> {
        let users = self.users.read().await;
        Ok(users.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryTicketStore {
    tickets: Arc<RwLock<HashMap<String, Ticket>>>,
}

impl InMemoryTicketStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TicketStore for InMemoryTicketStore {
    async fn store(&self, ticket: Ticket) -> Result<()> {
        let mut tickets = self.tickets.write().await;
        tickets.insert(ticket.id.clone(), ticket);
        Ok(())
    }

    async fn get(&self, ticket_id: &str) -> Result<Option<Ticket>> {
        let tickets = self.tickets.read().await;
        Ok(tickets.get(ticket_id).cloned())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryEventStore {
    events: Arc<RwLock<HashMap<String, EventRecord>>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn store(&self, event: EventRecord) -> Result<()> {
        let mut events = self.events.write().await;
        events.insert(event.id.clone(), event);
        Ok(())
    }

    async fn get(&self, event_id: &str) -> Result<Option<EventRecord>> {
        let events = self.events.read().await;
        Ok(events.get(event_id).cloned())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryPayoutStore {
    requests: Arc<RwLock<HashMap<String, PayoutRequest>>>,
}

impl InMemoryPayoutStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PayoutStore for InMemoryPayoutStore {
    async fn store(&self, request: PayoutRequest) -> Result<()> {
        let mut requests = self.requests.write().await;
        requests.insert(request.id.clone(), request);
        Ok(())
    }

    async fn get(&self, request_id: &str) -> Result<Option<PayoutRequest>> {
        let requests = self.requests.read().await;
        Ok(requests.get(request_id).cloned())
    }

    async fn all(&self) -> Result<Vec<PayoutRequest>> {
        let requests = self.requests.read().await;
        let mut all: Vec<_> = requests.values().cloned().collect();
        all.sort_by_key(|r| r.requested_at);
        Ok(all)
    }
}

#[derive(Default, Clone)]
pub struct InMemoryNotificationStore {
    notifications: Arc<RwLock<Vec<NotificationRecord>>>,
}

impl InMemoryNotificationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationStore for InMemoryNotificationStore {
    async fn store(&self, notification: NotificationRecord) -> Result<()> {
        let mut notifications = self.notifications.write().await;
        notifications.push(notification);
        Ok(())
    }

    async fn for_user(&self, user_id: &str) -> Result<Vec<NotificationRecord>> {
        let notifications = self.notifications.read().await;
        Ok(notifications
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryProcessedDepositStore {
    processed: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
}

impl InMemoryProcessedDepositStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProcessedDepositStore for InMemoryProcessedDepositStore {
    async fn mark_processed(&self, deposit_id: &str, at: DateTime<Utc>) -> Result<bool> {
        // Check-and-set under one write guard keeps the marker atomic.
        let mut processed = self.processed.write().await;
        if processed.contains_key(deposit_id) {
            return Ok(false);
        }
        processed.insert(deposit_id.to_string(), at);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_user_store_upserts() {
        let store = InMemoryUserStore::new();
        let mut user = UserProfile::new("u1");
        store.store(user.clone()).await.unwrap();

        user.plan_id = crate::domain::plan::PlanId::Pro;
        store.store(user.clone()).await.unwrap();

        let stored = store.get("u1").await.unwrap().unwrap();
        assert_eq!(stored, user);
        assert_eq!(store.all().await.unwrap().len(), 1);
        assert!(store.get("u2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_payout_store_orders_by_request_time() {
        use rust_decimal_macros::dec;
        let store = InMemoryPayoutStore::new();
        let first = PayoutRequest::new("org", dec!(1), Utc::now() - chrono::Duration::hours(1));
        let second = PayoutRequest::new("org", dec!(2), Utc::now());
        store.store(second.clone()).await.unwrap();
        store.store(first.clone()).await.unwrap();

        let all = store.all().await.unwrap();
        assert_eq!(all, vec![first, second]);
    }

    #[tokio::test]
    async fn test_processed_marker_is_set_once() {
        let store = InMemoryProcessedDepositStore::new();
        assert!(store.mark_processed("d1", Utc::now()).await.unwrap());
        assert!(!store.mark_processed("d1", Utc::now()).await.unwrap());
        assert!(store.mark_processed("d2", Utc::now()).await.unwrap());
    }
}
