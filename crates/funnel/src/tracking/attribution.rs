//! Marketing attribution capture.
//!
//! Extracts the five canonical campaign parameters (`utm_source`,
//! `utm_medium`, `utm_campaign`, `utm_term`, `utm_content`) from a navigation
//! URL's query string.

use url::Url;

use driftwave_core::MarketingSource;

/// Extract the campaign-attribution snapshot from a navigation URL.
///
/// Unrecognized query parameters are ignored; empty values count as absent.
#[must_use]
pub fn marketing_source_from_url(url: &Url) -> MarketingSource {
    let mut source = MarketingSource::default();

    for (key, value) in url.query_pairs() {
        if value.is_empty() {
            continue;
        }
        let value = value.into_owned();
        match key.as_ref() {
            "utm_source" => source.source = Some(value),
            "utm_medium" => source.medium = Some(value),
            "utm_campaign" => source.campaign = Some(value),
            "utm_term" => source.term = Some(value),
            "utm_content" => source.content = Some(value),
            _ => {}
        }
    }

    source
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_all_five_fields() {
        let url = Url::parse(
            "https://driftwave.dev/?utm_source=twitter&utm_medium=social\
             &utm_campaign=launch&utm_term=analytics&utm_content=hero",
        )
        .unwrap();

        let source = marketing_source_from_url(&url);
        assert_eq!(source.source.as_deref(), Some("twitter"));
        assert_eq!(source.medium.as_deref(), Some("social"));
        assert_eq!(source.campaign.as_deref(), Some("launch"));
        assert_eq!(source.term.as_deref(), Some("analytics"));
        assert_eq!(source.content.as_deref(), Some("hero"));
    }

    #[test]
    fn test_partial_parameters() {
        let url = Url::parse("https://driftwave.dev/?utm_source=newsletter&ref=abc").unwrap();

        let source = marketing_source_from_url(&url);
        assert_eq!(source.source.as_deref(), Some("newsletter"));
        assert!(source.medium.is_none());
        assert!(source.campaign.is_none());
    }

    #[test]
    fn test_no_query_string_is_empty() {
        let url = Url::parse("https://driftwave.dev/").unwrap();
        assert!(marketing_source_from_url(&url).is_empty());
    }

    #[test]
    fn test_empty_values_count_as_absent() {
        let url = Url::parse("https://driftwave.dev/?utm_source=&utm_medium=email").unwrap();

        let source = marketing_source_from_url(&url);
        assert!(source.source.is_none());
        assert_eq!(source.medium.as_deref(), Some("email"));
    }

    #[test]
    fn test_url_decoding() {
        let url = Url::parse("https://driftwave.dev/?utm_campaign=spring%20sale").unwrap();
        let source = marketing_source_from_url(&url);
        assert_eq!(source.campaign.as_deref(), Some("spring sale"));
    }
}
