//! Application state shared across flows.

use std::sync::Arc;

use crate::config::FunnelConfig;
use crate::error::AppError;
use crate::services::analytics::PosthogClient;
use crate::services::payments::PaymentGateway;
use crate::session::SessionStore;
use crate::storage::FileBackend;
use crate::tracking::Tracker;

/// Application state shared across all flows.
///
/// This struct is cheaply cloneable via `Arc` and is constructed once per
/// process, then passed by reference to consuming code - there is no ambient
/// global session.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: FunnelConfig,
    store: SessionStore,
    tracker: Tracker,
    payments: PaymentGateway,
}

impl AppState {
    /// Production wiring: file-backed session store under the configured data
    /// directory, PostHog-backed tracker when an API key is configured (a
    /// disabled tracker otherwise), OS-seeded payment gateway.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created or the
    /// analytics client fails to build.
    pub fn from_config(config: FunnelConfig) -> Result<Self, AppError> {
        let backend = FileBackend::new(&config.data_dir)?;
        let store = SessionStore::new(Box::new(backend));

        let tracker = match &config.analytics.api_key {
            Some(api_key) => {
                let client = PosthogClient::new(&config.analytics.host, api_key.clone())?;
                Tracker::new(Arc::new(client))
            }
            None => {
                tracing::info!("analytics key not configured; tracking disabled");
                Tracker::disabled()
            }
        };

        let payments = PaymentGateway::new(&config.payments);

        Ok(Self::with_components(config, store, tracker, payments))
    }

    /// Assemble state from explicitly injected components.
    ///
    /// The seam tests and embedders use to swap in an in-memory store, a
    /// recording sink, or a deterministic gateway.
    #[must_use]
    pub fn with_components(
        config: FunnelConfig,
        store: SessionStore,
        tracker: Tracker,
        payments: PaymentGateway,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                tracker,
                payments,
            }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &FunnelConfig {
        &self.inner.config
    }

    /// Get a reference to the session store.
    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.inner.store
    }

    /// Get a reference to the event tracker.
    #[must_use]
    pub fn tracker(&self) -> &Tracker {
        &self.inner.tracker
    }

    /// Get a reference to the payment gateway.
    #[must_use]
    pub fn payments(&self) -> &PaymentGateway {
        &self.inner.payments
    }
}
