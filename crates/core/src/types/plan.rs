//! Subscription plans.
//!
//! Plans are a fixed, immutable catalog - they are never created or mutated
//! at runtime. [`plans`] returns the catalog and [`find_plan`] resolves a
//! [`PlanId`] against it.

use std::sync::LazyLock;

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::types::id::PlanId;
use crate::types::price::Price;

/// Billing interval for a subscription plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingInterval {
    Month,
    Year,
}

impl BillingInterval {
    /// The interval as it appears in event payloads ("month" / "year").
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for BillingInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A subscription plan from the fixed catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: PlanId,
    pub name: String,
    pub price: Price,
    pub interval: BillingInterval,
    pub features: Vec<String>,
    /// Highlighted in the pricing UI.
    #[serde(default)]
    pub popular: bool,
}

static CATALOG: LazyLock<Vec<Plan>> = LazyLock::new(|| {
    vec![
        Plan {
            id: PlanId::from("starter"),
            name: "Starter".to_owned(),
            price: Price::usd(29),
            interval: BillingInterval::Month,
            features: vec![
                "Up to 10,000 events/month".to_owned(),
                "Basic analytics".to_owned(),
                "Email support".to_owned(),
                "1 project".to_owned(),
            ],
            popular: false,
        },
        Plan {
            id: PlanId::from("pro"),
            name: "Pro".to_owned(),
            price: Price::usd(99),
            interval: BillingInterval::Month,
            features: vec![
                "Up to 100,000 events/month".to_owned(),
                "Advanced analytics".to_owned(),
                "Priority support".to_owned(),
                "Unlimited projects".to_owned(),
                "Custom dashboards".to_owned(),
                "Export data".to_owned(),
            ],
            popular: true,
        },
        Plan {
            id: PlanId::from("enterprise"),
            name: "Enterprise".to_owned(),
            price: Price::usd(299),
            interval: BillingInterval::Month,
            features: vec![
                "Unlimited events".to_owned(),
                "Advanced analytics".to_owned(),
                "24/7 support".to_owned(),
                "Unlimited projects".to_owned(),
                "Custom dashboards".to_owned(),
                "Export data".to_owned(),
                "API access".to_owned(),
                "Custom integrations".to_owned(),
            ],
            popular: false,
        },
    ]
});

/// The full plan catalog, in display order.
#[must_use]
pub fn plans() -> &'static [Plan] {
    &CATALOG
}

/// Look up a plan by ID.
#[must_use]
pub fn find_plan(id: &PlanId) -> Option<&'static Plan> {
    plans().iter().find(|plan| &plan.id == id)
}
