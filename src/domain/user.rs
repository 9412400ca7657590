use crate::domain::plan::PlanId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An account on the platform. `plan_id` changes on successful plan-upgrade
/// finalization or an explicit downgrade; `exchange_rates` is an optional
/// per-user override of the default display-conversion table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub uid: String,
    pub plan_id: PlanId,
    #[serde(default)]
    pub exchange_rates: HashMap<String, Decimal>,
}

impl UserProfile {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            plan_id: PlanId::default(),
            exchange_rates: HashMap::new(),
        }
    }
}
