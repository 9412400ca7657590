use crate::domain::deposit::{CallbackPayload, DepositMetadata};
use crate::domain::plan::PlanId;
use crate::domain::ports::{
    EventStoreBox, ProcessedDepositStoreBox, TicketStoreBox, UserStoreBox,
};
use crate::domain::ticket::{EventRecord, Ticket, TicketDraft};
use crate::error::Result;
use chrono::Utc;
use tracing::{info, warn};

/// What the reconciler decided to do with a callback. Every variant is an
/// acknowledged outcome: once a payload is structurally valid the provider
/// gets a success response no matter which branch ran.
#[derive(Debug, Clone, PartialEq)]
pub enum CallbackDisposition {
    PlanUpgraded { user_id: String, plan_id: PlanId },
    TicketFinalized { ticket_id: String, event_id: String },
    /// A marker for this deposit already exists; side effects were skipped.
    Duplicate,
    /// Non-success status, unusable metadata, or a missing target record.
    Ignored { reason: String },
}

/// Finalizes payment intents from asynchronous provider callbacks.
///
/// The reconciler reads no local intent state before deciding: the callback
/// payload alone (status plus echoed metadata) selects the finalization
/// path. A processed-deposit marker is check-and-set before any side effect
/// so a redelivered callback finalizes its business object at most once.
pub struct Reconciler {
    users: UserStoreBox,
    tickets: TicketStoreBox,
    events: EventStoreBox,
    processed: ProcessedDepositStoreBox,
}

impl Reconciler {
    pub fn new(
        users: UserStoreBox,
        tickets: TicketStoreBox,
        events: EventStoreBox,
        processed: ProcessedDepositStoreBox,
    ) -> Self {
        Self {
            users,
            tickets,
            events,
            processed,
        }
    }

    pub async fn handle_deposit_callback(
        &self,
        payload: CallbackPayload,
    ) -> Result<CallbackDisposition> {
        let deposit_id = payload.deposit_id.as_str();

        if !payload.status.is_success() {
            info!(deposit_id, status = %payload.status, "ignoring non-success deposit callback");
            return Ok(CallbackDisposition::Ignored {
                reason: format!("non-success status {}", payload.status),
            });
        }

        let metadata = match payload.metadata {
            Some(raw) => match serde_json::from_value::<DepositMetadata>(raw) {
                Ok(metadata) => metadata,
                Err(err) => {
                    warn!(deposit_id, %err, "success callback carried unusable metadata");
                    return Ok(CallbackDisposition::Ignored {
                        reason: format!("unusable metadata: {err}"),
                    });
                }
            },
            None => {
                warn!(deposit_id, "success callback carried no metadata");
                return Ok(CallbackDisposition::Ignored {
                    reason: "missing metadata".to_string(),
                });
            }
        };

        // Claim the deposit before touching business records. Exactly one
        // delivery of a given deposit id gets past this point.
        if !self.processed.mark_processed(deposit_id, Utc::now()).await? {
            warn!(deposit_id, "duplicate delivery of processed deposit callback");
            return Ok(CallbackDisposition::Duplicate);
        }

        match metadata {
            DepositMetadata::PlanUpgrade { user_id, plan_id } => {
                self.apply_plan_upgrade(deposit_id, user_id, plan_id).await
            }
            DepositMetadata::TicketPurchase { ticket } => {
                self.finalize_ticket(deposit_id, ticket).await
            }
        }
    }

    async fn apply_plan_upgrade(
        &self,
        deposit_id: &str,
        user_id: String,
        plan_id: PlanId,
    ) -> Result<CallbackDisposition> {
        let Some(mut user) = self.users.get(&user_id).await? else {
            warn!(deposit_id, user_id, "plan upgrade for unknown user");
            return Ok(CallbackDisposition::Ignored {
                reason: format!("unknown user {user_id}"),
            });
        };
        user.plan_id = plan_id;
        self.users.store(user).await?;
        info!(deposit_id, user_id, plan_id = %plan_id, "applied plan upgrade");
        Ok(CallbackDisposition::PlanUpgraded { user_id, plan_id })
    }

    async fn finalize_ticket(
        &self,
        deposit_id: &str,
        draft: TicketDraft,
    ) -> Result<CallbackDisposition> {
        let event_id = draft.event_id.clone();
        let quantity = draft.quantity;
        let ticket = Ticket::finalize(draft, deposit_id, Utc::now());
        let ticket_id = ticket.id.clone();

        self.tickets.store(ticket).await?;

        let mut event = self
            .events
            .get(&event_id)
            .await?
            .unwrap_or_else(|| EventRecord::new(event_id.clone()));
        event.tickets_issued += quantity;
        self.events.store(event).await?;

        info!(deposit_id, ticket_id, event_id, quantity, "finalized ticket purchase");
        Ok(CallbackDisposition::TicketFinalized {
            ticket_id,
            event_id,
        })
    }
}
