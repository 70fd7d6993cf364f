//! Integration tests for Driftwave.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p driftwave-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `funnel_flow` - End-to-end funnel scenarios (signup → plan → projects)
//! - `payments` - Simulated payment distribution and decline semantics
//! - `session_store` - Session durability over the file backend
//!
//! Everything runs against in-process components: an in-memory (or tempdir
//! file) storage backend, a recording analytics sink, and an instant seeded
//! payment gateway. No network, no external services.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use driftwave_funnel::config::{AnalyticsConfig, FunnelConfig, PaymentConfig};
use driftwave_funnel::services::payments::PaymentGateway;
use driftwave_funnel::session::SessionStore;
use driftwave_funnel::state::AppState;
use driftwave_funnel::storage::{MemoryBackend, StorageBackend};
use driftwave_funnel::tracking::{RecordingSink, Tracker};

/// Fully in-process application state plus the sink observing its events.
pub struct TestContext {
    pub state: AppState,
    pub sink: Arc<RecordingSink>,
}

impl TestContext {
    /// Context with an always-approving instant gateway.
    #[must_use]
    pub fn new() -> Self {
        Self::with_gateway(0.0, 7)
    }

    /// Context with an instant gateway at the given decline rate and seed.
    #[must_use]
    pub fn with_gateway(failure_rate: f64, seed: u64) -> Self {
        Self::assemble(Box::new(MemoryBackend::new()), failure_rate, seed)
    }

    /// Context over an arbitrary storage backend.
    #[must_use]
    pub fn with_backend(backend: Box<dyn StorageBackend>) -> Self {
        Self::assemble(backend, 0.0, 7)
    }

    fn assemble(backend: Box<dyn StorageBackend>, failure_rate: f64, seed: u64) -> Self {
        let payments = PaymentConfig {
            delay_ms: 0,
            failure_rate,
        };
        let config = FunnelConfig {
            data_dir: ".driftwave".into(),
            analytics: AnalyticsConfig::default(),
            payments: payments.clone(),
        };

        let sink = Arc::new(RecordingSink::new());
        let state = AppState::with_components(
            config,
            SessionStore::new(backend),
            Tracker::new(sink.clone()),
            PaymentGateway::with_seed(&payments, seed),
        );

        Self { state, sink }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
