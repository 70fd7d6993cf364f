//! Simulated payment gateway.
//!
//! There is no real payment processing anywhere in Driftwave: a charge is a
//! fixed suspension followed by a random approve/decline draw. A decline is
//! an expected, retryable outcome surfaced as a value - not an error - and
//! roughly one attempt in ten declines with the default configuration.
//!
//! No cancellation of an in-flight charge is exposed, and there is no retry
//! logic here; retrying is the caller's (the user's) decision.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use driftwave_core::Plan;

use crate::config::PaymentConfig;

/// Decline message shown for a simulated failure.
const DECLINE_REASON: &str = "Payment processing failed";

/// Accepted payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Card,
    Paypal,
}

impl PaymentMethod {
    /// The method as it appears in event payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Paypal => "paypal",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(Self::Card),
            "paypal" => Ok(Self::Paypal),
            other => Err(UnknownPaymentMethod(other.to_owned())),
        }
    }
}

/// Error for an unrecognized payment-method name.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown payment method: {0} (expected card or paypal)")]
pub struct UnknownPaymentMethod(pub String);

/// Outcome of a simulated charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// The charge went through.
    Approved {
        /// Gateway confirmation reference.
        confirmation: String,
    },
    /// The charge was declined; the user may retry.
    Declined {
        /// User-visible decline reason.
        reason: String,
    },
}

/// The simulated gateway.
pub struct PaymentGateway {
    delay: Duration,
    failure_rate: f64,
    rng: Mutex<StdRng>,
}

impl PaymentGateway {
    /// Create a gateway from configuration, seeded from the OS.
    #[must_use]
    pub fn new(config: &PaymentConfig) -> Self {
        Self {
            delay: Duration::from_millis(config.delay_ms),
            failure_rate: config.failure_rate,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Create a deterministically seeded gateway.
    #[must_use]
    pub fn with_seed(config: &PaymentConfig, seed: u64) -> Self {
        Self {
            delay: Duration::from_millis(config.delay_ms),
            failure_rate: config.failure_rate,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Charge for `plan`: suspend for the configured delay, then approve or
    /// decline.
    pub async fn charge(&self, plan: &Plan) -> PaymentOutcome {
        tokio::time::sleep(self.delay).await;

        let roll: f64 = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            rng.random()
        };

        if roll < self.failure_rate {
            tracing::info!(plan = %plan.id, "simulated payment declined");
            PaymentOutcome::Declined {
                reason: DECLINE_REASON.to_owned(),
            }
        } else {
            let confirmation = format!("ch_{}", Uuid::new_v4().simple());
            tracing::info!(plan = %plan.id, confirmation = %confirmation, "simulated payment approved");
            PaymentOutcome::Approved { confirmation }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use driftwave_core::{PlanId, find_plan};

    use super::*;

    fn instant_config(failure_rate: f64) -> PaymentConfig {
        PaymentConfig {
            delay_ms: 0,
            failure_rate,
        }
    }

    #[tokio::test]
    async fn test_zero_failure_rate_always_approves() {
        let gateway = PaymentGateway::with_seed(&instant_config(0.0), 7);
        let plan = find_plan(&PlanId::from("pro")).unwrap();

        for _ in 0..50 {
            assert!(matches!(
                gateway.charge(plan).await,
                PaymentOutcome::Approved { .. }
            ));
        }
    }

    #[tokio::test]
    async fn test_full_failure_rate_always_declines() {
        let gateway = PaymentGateway::with_seed(&instant_config(1.0), 7);
        let plan = find_plan(&PlanId::from("pro")).unwrap();

        assert_eq!(
            gateway.charge(plan).await,
            PaymentOutcome::Declined {
                reason: DECLINE_REASON.to_owned(),
            }
        );
    }

    #[tokio::test]
    async fn test_seeded_gateway_is_deterministic() {
        let plan = find_plan(&PlanId::from("starter")).unwrap();

        let mut outcomes = Vec::new();
        for _ in 0..2 {
            let gateway = PaymentGateway::with_seed(&instant_config(0.5), 42);
            let mut run = Vec::new();
            for _ in 0..20 {
                run.push(matches!(
                    gateway.charge(plan).await,
                    PaymentOutcome::Declined { .. }
                ));
            }
            outcomes.push(run);
        }

        assert_eq!(outcomes[0], outcomes[1]);
    }

    #[tokio::test]
    async fn test_confirmations_are_unique() {
        let gateway = PaymentGateway::with_seed(&instant_config(0.0), 1);
        let plan = find_plan(&PlanId::from("enterprise")).unwrap();

        let PaymentOutcome::Approved { confirmation: a } = gateway.charge(plan).await else {
            panic!("expected approval");
        };
        let PaymentOutcome::Approved { confirmation: b } = gateway.charge(plan).await else {
            panic!("expected approval");
        };
        assert_ne!(a, b);
        assert!(a.starts_with("ch_"));
    }

    #[test]
    fn test_payment_method_parse() {
        assert_eq!("card".parse::<PaymentMethod>().unwrap(), PaymentMethod::Card);
        assert_eq!(
            "paypal".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::Paypal
        );
        assert!("wire".parse::<PaymentMethod>().is_err());
    }
}
