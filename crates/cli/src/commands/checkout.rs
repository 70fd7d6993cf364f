//! Checkout command.

use driftwave_core::PlanId;
use driftwave_funnel::error::AppError;
use driftwave_funnel::flows::{self, CheckoutOutcome};
use driftwave_funnel::services::payments::PaymentMethod;
use driftwave_funnel::state::AppState;
use driftwave_funnel::tracking::Page;

/// Walk the checkout page for a plan: select it, pick a payment method, and
/// run the simulated payment.
#[allow(clippy::print_stdout)]
pub async fn run(state: &AppState, plan: &str, method: PaymentMethod) -> Result<(), AppError> {
    let plan_id = PlanId::from(plan);

    state.tracker().page_view(Page::Checkout);

    let plan = match flows::select_plan(state, &plan_id) {
        Ok(plan) => plan,
        Err(AppError::SignedOut) => {
            println!("You need an account first: dw-cli signup -e you@example.com -n \"You\"");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    println!(
        "Charging {} for the {} plan ({}/{})...",
        method, plan.name, plan.price, plan.interval
    );

    match flows::complete_checkout(state, &plan_id, method).await? {
        CheckoutOutcome::Completed { user, confirmation } => {
            println!("Payment complete ({confirmation}).");
            println!(
                "You're on the {} plan. Create a project: dw-cli project create",
                user.plan.map_or_else(|| plan.name.clone(), |p| p.name)
            );
        }
        CheckoutOutcome::Declined { reason } => {
            println!("{reason}. Please try again.");
        }
    }

    Ok(())
}
