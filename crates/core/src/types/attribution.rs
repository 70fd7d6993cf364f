//! Marketing attribution snapshot.
//!
//! The five canonical campaign-attribution (UTM) parameters, captured from a
//! landing-page URL. Ephemeral: forwarded into event payloads and identity
//! properties, never persisted locally.

use serde::{Deserialize, Serialize};

/// UTM-style campaign attribution fields.
///
/// All fields are optional; a visit with no campaign parameters produces an
/// empty snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketingSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl MarketingSource {
    /// Whether no attribution field is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.source.is_none()
            && self.medium.is_none()
            && self.campaign.is_none()
            && self.term.is_none()
            && self.content.is_none()
    }

    /// The present fields as `(name, value)` pairs, in canonical order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("source", self.source.as_deref()),
            ("medium", self.medium.as_deref()),
            ("campaign", self.campaign.as_deref()),
            ("term", self.term.as_deref()),
            ("content", self.content.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
    }
}
