//! Pricing-page command.

use driftwave_core::plans;
use driftwave_funnel::state::AppState;
use driftwave_funnel::tracking::Page;

/// Show the plan catalog the way the pricing page renders it.
///
/// Emits the pricing page view plus one `plan_viewed` per rendered plan,
/// matching the original pricing page.
#[allow(clippy::print_stdout)]
pub fn show(state: &AppState) {
    let tracker = state.tracker();
    tracker.page_view(Page::Pricing);

    for plan in plans() {
        tracker.plan_viewed(plan);

        let marker = if plan.popular { "  [most popular]" } else { "" };
        println!("{} ({}/{}){marker}", plan.name, plan.price, plan.interval);
        println!("  id: {}", plan.id);
        for feature in &plan.features {
            println!("  - {feature}");
        }
        println!();
    }

    println!("Subscribe with: dw-cli checkout --plan <id>");
}
