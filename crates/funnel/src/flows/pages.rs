//! Page-view flows.

use url::Url;

use crate::state::AppState;
use crate::tracking::{Page, attribution};

/// Record a page visit.
///
/// The landing page additionally captures the marketing-attribution snapshot
/// from the navigation URL: present campaign fields ride along in the
/// page-view payload and are attached to the identity as `marketing_<field>`
/// properties.
pub fn visit(state: &AppState, page: Page, url: Option<&Url>, referrer: Option<&str>) {
    if page == Page::Landing {
        let source = url.map(attribution::marketing_source_from_url).unwrap_or_default();
        state.tracker().landing_page_view(&source, referrer);
        state.tracker().set_marketing_properties(&source);
    } else {
        state.tracker().page_view(page);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::flows::testing::state_with_sink;
    use crate::tracking::SinkCall;

    #[test]
    fn test_plain_page_visit() {
        let (state, sink) = state_with_sink();
        visit(&state, Page::Pricing, None, None);
        assert_eq!(sink.event_names(), vec!["pricing_page_viewed"]);
    }

    #[test]
    fn test_landing_visit_with_attribution() {
        let (state, sink) = state_with_sink();
        let url = Url::parse("https://driftwave.dev/?utm_source=twitter").unwrap();
        visit(&state, Page::Landing, Some(&url), Some("https://t.co/abc"));

        let calls = sink.calls();
        assert_eq!(calls.len(), 2);

        let SinkCall::Capture {
            event, properties, ..
        } = &calls[0]
        else {
            panic!("expected capture");
        };
        assert_eq!(event, "landing_page_viewed");
        assert_eq!(properties["source"], json!("twitter"));
        assert_eq!(properties["referrer"], json!("https://t.co/abc"));

        let SinkCall::SetPersonProperties { properties, .. } = &calls[1] else {
            panic!("expected person properties");
        };
        assert_eq!(properties["marketing_source"], json!("twitter"));
    }

    #[test]
    fn test_landing_visit_without_campaign_skips_person_properties() {
        let (state, sink) = state_with_sink();
        let url = Url::parse("https://driftwave.dev/").unwrap();
        visit(&state, Page::Landing, Some(&url), None);

        // Just the page view; an empty snapshot sets no identity properties.
        assert_eq!(sink.calls().len(), 1);
    }
}
