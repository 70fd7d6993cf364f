//! Page-view command.

use url::Url;

use driftwave_funnel::flows;
use driftwave_funnel::state::AppState;
use driftwave_funnel::tracking::Page;

/// Record a page view, with attribution capture on the landing page.
#[allow(clippy::print_stdout)]
pub fn visit(
    state: &AppState,
    page: Page,
    url: Option<&str>,
    referrer: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let url = url.map(Url::parse).transpose()?;
    flows::visit(state, page, url.as_ref(), referrer);

    println!("Recorded {}", page.event_name());
    Ok(())
}

/// Simulate a call-to-action click on the landing page.
#[allow(clippy::print_stdout)]
pub fn click_cta(state: &AppState, location: &str) {
    state.tracker().cta_clicked(location);
    println!("Recorded cta_clicked at {location}");
}

/// Simulate a click on the pricing link in the navigation.
#[allow(clippy::print_stdout)]
pub fn click_pricing_link(state: &AppState) {
    state.tracker().pricing_link_clicked();
    println!("Recorded pricing_link_clicked");
}
