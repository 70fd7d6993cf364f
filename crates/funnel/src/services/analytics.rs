//! PostHog ingestion client.
//!
//! Implements the [`EventSink`] capability over PostHog's capture endpoint.
//! Delivery is fire-and-forget: each call spawns the HTTP request onto the
//! runtime, logs a warning on failure, and never blocks or fails the caller.
//! Transport concerns beyond that (batching, retry, offline queueing) are the
//! ingestion service's problem, not ours.

use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value, json};
use thiserror::Error;

use crate::tracking::EventSink;

/// Capture endpoint path on the ingestion host.
const CAPTURE_PATH: &str = "/capture/";

/// Errors that can occur when constructing or talking to the ingestion API.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// PostHog capture API client.
#[derive(Clone)]
pub struct PosthogClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: SecretString,
}

impl PosthogClient {
    /// Create a new ingestion client for `host`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(host: &str, api_key: SecretString) -> Result<Self, AnalyticsError> {
        let client = reqwest::Client::builder().build()?;
        let endpoint = format!("{}{CAPTURE_PATH}", host.trim_end_matches('/'));

        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    /// POST one capture payload and check the response status.
    async fn send(&self, payload: &Value) -> Result<(), AnalyticsError> {
        let response = self.client.post(&self.endpoint).json(payload).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AnalyticsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }

    /// Spawn a delivery onto the runtime; log and drop on failure.
    ///
    /// Outside a tokio runtime the event is dropped with a warning - tracking
    /// must never take down a user-facing flow.
    fn dispatch(&self, event: String, payload: Value) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(event = %event, "no async runtime; dropping analytics event");
            return;
        };

        let client = self.clone();
        handle.spawn(async move {
            if let Err(e) = client.send(&payload).await {
                tracing::warn!(event = %event, error = %e, "analytics delivery failed");
            }
        });
    }

    fn capture_payload(
        &self,
        distinct_id: &str,
        event: &str,
        properties: Map<String, Value>,
    ) -> Value {
        json!({
            "api_key": self.api_key.expose_secret(),
            "event": event,
            "distinct_id": distinct_id,
            "properties": properties,
            "timestamp": Utc::now().to_rfc3339(),
        })
    }
}

impl EventSink for PosthogClient {
    fn capture(&self, distinct_id: &str, event: &str, properties: Map<String, Value>) {
        let payload = self.capture_payload(distinct_id, event, properties);
        self.dispatch(event.to_owned(), payload);
    }

    fn identify(&self, distinct_id: &str, traits: Map<String, Value>) {
        // Identity is established via the reserved $identify event.
        let mut properties = Map::new();
        properties.insert("$set".to_owned(), Value::Object(traits));
        let payload = self.capture_payload(distinct_id, "$identify", properties);
        self.dispatch("$identify".to_owned(), payload);
    }

    fn set_person_properties(&self, distinct_id: &str, props: Map<String, Value>) {
        // Property merges ride the reserved $set event.
        let mut properties = Map::new();
        properties.insert("$set".to_owned(), Value::Object(props));
        let payload = self.capture_payload(distinct_id, "$set", properties);
        self.dispatch("$set".to_owned(), payload);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client() -> PosthogClient {
        PosthogClient::new(
            "https://us.i.posthog.com",
            SecretString::from("phc_test_key"),
        )
        .unwrap()
    }

    #[test]
    fn test_endpoint_normalizes_trailing_slash() {
        let with_slash =
            PosthogClient::new("https://ph.example.com/", SecretString::from("k")).unwrap();
        let without_slash =
            PosthogClient::new("https://ph.example.com", SecretString::from("k")).unwrap();

        assert_eq!(with_slash.endpoint, "https://ph.example.com/capture/");
        assert_eq!(without_slash.endpoint, with_slash.endpoint);
    }

    #[test]
    fn test_capture_payload_shape() {
        let client = client();
        let mut props = Map::new();
        props.insert("plan_id".to_owned(), json!("pro"));

        let payload = client.capture_payload("user-1", "plan_selected", props);
        assert_eq!(payload["api_key"], json!("phc_test_key"));
        assert_eq!(payload["event"], json!("plan_selected"));
        assert_eq!(payload["distinct_id"], json!("user-1"));
        assert_eq!(payload["properties"]["plan_id"], json!("pro"));
        assert!(payload["timestamp"].is_string());
    }

    #[test]
    fn test_capture_without_runtime_is_a_noop() {
        // No tokio runtime here; the event is dropped, not a panic.
        client().capture("user-1", "plan_selected", Map::new());
    }
}
