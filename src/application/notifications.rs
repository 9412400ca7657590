use crate::domain::notification::NotificationRecord;
use crate::domain::ports::{NotificationStoreBox, UserStoreBox};
use crate::error::Result;
use futures::future::join_all;
use tracing::{info, warn};

/// Outcome of a broadcast. Individual write failures are gathered per user
/// instead of failing the batch: a broadcast must reach everyone it can.
#[derive(Debug, Clone, PartialEq)]
pub struct FanoutReport {
    pub attempted: usize,
    pub delivered: usize,
    pub failed: Vec<(String, String)>,
}

/// Best-effort broadcast of one notification record per user. Writes run
/// concurrently with no ordering guarantee between them.
pub struct NotificationFanout {
    users: UserStoreBox,
    notifications: NotificationStoreBox,
}

impl NotificationFanout {
    pub fn new(users: UserStoreBox, notifications: NotificationStoreBox) -> Self {
        Self {
            users,
            notifications,
        }
    }

    pub async fn send_to_all(
        &self,
        title: &str,
        message: &str,
        link: Option<String>,
    ) -> Result<FanoutReport> {
        let users = self.users.all().await?;
        let attempted = users.len();

        let writes = users.into_iter().map(|user| {
            let record = NotificationRecord::new(user.uid.as_str(), title, message, link.clone());
            async move { (user.uid, self.notifications.store(record).await) }
        });
        let results = join_all(writes).await;

        let mut failed = Vec::new();
        for (uid, outcome) in results {
            if let Err(err) = outcome {
                warn!(uid, %err, "notification write failed");
                failed.push((uid, err.to_string()));
            }
        }
        let report = FanoutReport {
            attempted,
            delivered: attempted - failed.len(),
            failed,
        };
        info!(
            attempted = report.attempted,
            delivered = report.delivered,
            "broadcast notification sent"
        );
        Ok(report)
    }
}
