//! The one-way event-emission capability.
//!
//! The tracker depends only on this trait, never on a concrete analytics
//! client. Production wires in the PostHog client
//! ([`crate::services::analytics::PosthogClient`]); tests wire in
//! [`RecordingSink`].

use std::sync::{Mutex, PoisonError};

use serde_json::{Map, Value};

/// One-way emission of named events and identity updates.
///
/// Every method is fire-and-forget: no return value, no acknowledgment, no
/// retry. Implementations must never block the caller on delivery.
pub trait EventSink: Send + Sync {
    /// Emit a named event with a flat property payload.
    fn capture(&self, distinct_id: &str, event: &str, properties: Map<String, Value>);

    /// Establish or refresh the identity behind `distinct_id`.
    fn identify(&self, distinct_id: &str, traits: Map<String, Value>);

    /// Merge properties onto the identity behind `distinct_id`.
    fn set_person_properties(&self, distinct_id: &str, properties: Map<String, Value>);
}

/// A call observed by a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum SinkCall {
    Capture {
        distinct_id: String,
        event: String,
        properties: Map<String, Value>,
    },
    Identify {
        distinct_id: String,
        traits: Map<String, Value>,
    },
    SetPersonProperties {
        distinct_id: String,
        properties: Map<String, Value>,
    },
}

/// In-memory sink recording every call, for tests and local inspection.
#[derive(Debug, Default)]
pub struct RecordingSink {
    calls: Mutex<Vec<SinkCall>>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every call observed so far, in emission order.
    #[must_use]
    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Names of the captured events, in emission order.
    #[must_use]
    pub fn event_names(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                SinkCall::Capture { event, .. } => Some(event),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: SinkCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

impl EventSink for RecordingSink {
    fn capture(&self, distinct_id: &str, event: &str, properties: Map<String, Value>) {
        self.record(SinkCall::Capture {
            distinct_id: distinct_id.to_owned(),
            event: event.to_owned(),
            properties,
        });
    }

    fn identify(&self, distinct_id: &str, traits: Map<String, Value>) {
        self.record(SinkCall::Identify {
            distinct_id: distinct_id.to_owned(),
            traits,
        });
    }

    fn set_person_properties(&self, distinct_id: &str, properties: Map<String, Value>) {
        self.record(SinkCall::SetPersonProperties {
            distinct_id: distinct_id.to_owned(),
            properties,
        });
    }
}
