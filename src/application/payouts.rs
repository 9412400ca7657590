use crate::domain::payout::{PayoutDecision, PayoutRequest};
use crate::domain::ports::PayoutStoreBox;
use crate::error::{PaymentError, Result};
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;

/// Admin-side approval/denial over organizer withdrawal requests. Purely a
/// recorded decision; no transfer is initiated here.
pub struct PayoutWorkflow {
    payouts: PayoutStoreBox,
}

impl PayoutWorkflow {
    pub fn new(payouts: PayoutStoreBox) -> Self {
        Self { payouts }
    }

    /// Organizer-side entry point: files a new pending request.
    pub async fn submit_request(
        &self,
        organizer_id: &str,
        amount: Decimal,
    ) -> Result<PayoutRequest> {
        if amount <= Decimal::ZERO {
            return Err(PaymentError::Validation(
                "payout amount must be positive".to_string(),
            ));
        }
        let request = PayoutRequest::new(organizer_id, amount, Utc::now());
        self.payouts.store(request.clone()).await?;
        info!(request_id = request.id, organizer_id, %amount, "payout request submitted");
        Ok(request)
    }

    /// Applies an admin decision to a pending request. A request that has
    /// already been decided is a conflict, not an idempotent no-op: the
    /// second admin must see that someone else got there first.
    pub async fn process_request(
        &self,
        request_id: &str,
        decision: PayoutDecision,
    ) -> Result<PayoutRequest> {
        let mut request = self
            .payouts
            .get(request_id)
            .await?
            .ok_or_else(|| PaymentError::NotFound(format!("payout request {request_id}")))?;
        request.apply(decision, Utc::now())?;
        self.payouts.store(request.clone()).await?;
        info!(request_id, status = ?request.status, "payout request processed");
        Ok(request)
    }

    pub async fn requests(&self) -> Result<Vec<PayoutRequest>> {
        self.payouts.all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payout::PayoutStatus;
    use crate::infrastructure::in_memory::InMemoryPayoutStore;
    use rust_decimal_macros::dec;

    fn workflow() -> (PayoutWorkflow, InMemoryPayoutStore) {
        let store = InMemoryPayoutStore::new();
        (PayoutWorkflow::new(Box::new(store.clone())), store)
    }

    #[tokio::test]
    async fn test_submit_then_approve() {
        let (workflow, store) = workflow();
        use crate::domain::ports::PayoutStore;

        let request = workflow.submit_request("org-1", dec!(750)).await.unwrap();
        assert_eq!(request.status, PayoutStatus::Pending);

        let decided = workflow
            .process_request(&request.id, PayoutDecision::Approved)
            .await
            .unwrap();
        assert_eq!(decided.status, PayoutStatus::Approved);
        assert!(decided.processed_at.is_some());

        let stored = store.get(&request.id).await.unwrap().unwrap();
        assert_eq!(stored, decided);
    }

    #[tokio::test]
    async fn test_second_decision_is_a_conflict() {
        let (workflow, _store) = workflow();

        let request = workflow.submit_request("org-1", dec!(100)).await.unwrap();
        workflow
            .process_request(&request.id, PayoutDecision::Denied)
            .await
            .unwrap();

        let result = workflow
            .process_request(&request.id, PayoutDecision::Approved)
            .await;
        assert!(matches!(result, Err(PaymentError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_unknown_request_is_not_found() {
        let (workflow, _store) = workflow();
        let result = workflow
            .process_request("missing", PayoutDecision::Approved)
            .await;
        assert!(matches!(result, Err(PaymentError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_non_positive_amount_is_rejected() {
        let (workflow, _store) = workflow();
        let result = workflow.submit_request("org-1", dec!(0)).await;
        assert!(matches!(result, Err(PaymentError::Validation(_))));
    }
}
