use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Subscription tiers offered to organizers. Prices are in the base currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanId {
    #[default]
    Free,
    Starter,
    Pro,
    Business,
}

impl PlanId {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanId::Free => "free",
            PlanId::Starter => "starter",
            PlanId::Pro => "pro",
            PlanId::Business => "business",
        }
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A creation quota. `Unbounded` always permits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Bounded(u32),
    Unbounded,
}

impl Limit {
    /// Whether one more item may be created given the current live count.
    pub fn permits(&self, current: u32) -> bool {
        match self {
            Limit::Bounded(max) => current < *max,
            Limit::Unbounded => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanLimits {
    pub max_events: Limit,
    pub max_tickets_per_event: Limit,
    pub max_benefits: Limit,
    pub max_organizations: Limit,
    pub watermark: bool,
    pub priority_support: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plan {
    pub id: PlanId,
    pub price: Decimal,
    pub limits: PlanLimits,
}

impl Plan {
    /// Static catalog lookup. The catalog is read-only configuration; there
    /// is no persisted plan record.
    pub fn get(id: PlanId) -> Plan {
        match id {
            PlanId::Free => Plan {
                id,
                price: dec!(0),
                limits: PlanLimits {
                    max_events: Limit::Bounded(2),
                    max_tickets_per_event: Limit::Bounded(50),
                    max_benefits: Limit::Bounded(3),
                    max_organizations: Limit::Bounded(1),
                    watermark: true,
                    priority_support: false,
                },
            },
            PlanId::Starter => Plan {
                id,
                price: dec!(9.99),
                limits: PlanLimits {
                    max_events: Limit::Bounded(10),
                    max_tickets_per_event: Limit::Bounded(250),
                    max_benefits: Limit::Bounded(10),
                    max_organizations: Limit::Bounded(2),
                    watermark: false,
                    priority_support: false,
                },
            },
            PlanId::Pro => Plan {
                id,
                price: dec!(24.99),
                limits: PlanLimits {
                    max_events: Limit::Bounded(50),
                    max_tickets_per_event: Limit::Bounded(1000),
                    max_benefits: Limit::Unbounded,
                    max_organizations: Limit::Bounded(5),
                    watermark: false,
                    priority_support: true,
                },
            },
            PlanId::Business => Plan {
                id,
                price: dec!(59.99),
                limits: PlanLimits {
                    max_events: Limit::Unbounded,
                    max_tickets_per_event: Limit::Unbounded,
                    max_benefits: Limit::Unbounded,
                    max_organizations: Limit::Unbounded,
                    watermark: false,
                    priority_support: true,
                },
            },
        }
    }

    pub fn can_create_event(&self, current: u32) -> bool {
        self.limits.max_events.permits(current)
    }

    pub fn can_create_organization(&self, current: u32) -> bool {
        self.limits.max_organizations.permits(current)
    }
}
