//! Funnel flows.
//!
//! The Rust counterpart of the original page handlers: each flow reads or
//! mutates the session store and emits the matching tracked events. Store and
//! tracker are independent and uncoordinated - a storage write and its
//! corresponding event share nothing but call-site sequencing.
//!
//! Flows return typed conditions ([`crate::error::AppError::SignedOut`],
//! [`crate::error::AppError::PlanRequired`]) instead of redirecting; where
//! the user goes next is the caller's decision.

pub mod checkout;
pub mod pages;
pub mod projects;
pub mod signup;

pub use checkout::{CheckoutOutcome, complete_checkout, select_plan};
pub use pages::visit;
pub use projects::{create_project, view_project};
pub use signup::sign_up;

#[cfg(test)]
pub(crate) mod testing {
    //! Shared fixtures for flow tests.

    use std::sync::Arc;

    use crate::config::{AnalyticsConfig, FunnelConfig, PaymentConfig};
    use crate::services::payments::PaymentGateway;
    use crate::session::SessionStore;
    use crate::state::AppState;
    use crate::storage::MemoryBackend;
    use crate::tracking::{RecordingSink, Tracker};

    /// In-memory state with a recording sink and an instant, always-approving
    /// gateway.
    pub fn state_with_sink() -> (AppState, Arc<RecordingSink>) {
        state_with_gateway(0.0, 7)
    }

    /// In-memory state with a recording sink and an instant gateway at the
    /// given decline rate and seed.
    pub fn state_with_gateway(failure_rate: f64, seed: u64) -> (AppState, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        let payments = PaymentConfig {
            delay_ms: 0,
            failure_rate,
        };
        let config = FunnelConfig {
            data_dir: ".driftwave".into(),
            analytics: AnalyticsConfig::default(),
            payments: payments.clone(),
        };
        let state = AppState::with_components(
            config,
            SessionStore::new(Box::new(MemoryBackend::new())),
            Tracker::new(sink.clone()),
            PaymentGateway::with_seed(&payments, seed),
        );
        (state, sink)
    }
}
