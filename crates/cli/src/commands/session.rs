//! Session commands: signup, whoami, reset.

use driftwave_funnel::error::AppError;
use driftwave_funnel::flows;
use driftwave_funnel::state::AppState;

/// Create the session user.
#[allow(clippy::print_stdout)]
pub fn signup(state: &AppState, email: &str, name: &str) -> Result<(), AppError> {
    // The CLI stands in for the form; the submission is the first interaction.
    state.tracker().signup_form_started();
    let user = flows::sign_up(state, email, name)?;

    println!("Welcome, {}!", user.name);
    println!("  id:    {}", user.id);
    println!("  email: {}", user.email);
    println!("Pick a plan next: dw-cli plans");
    Ok(())
}

/// Show the session user.
#[allow(clippy::print_stdout)]
pub fn whoami(state: &AppState) {
    let Some(user) = state.store().current_user() else {
        println!("No one is signed in. Create an account: dw-cli signup -e you@example.com -n \"You\"");
        return;
    };

    println!("{} <{}>", user.name, user.email);
    println!("  id:         {}", user.id);
    println!("  created at: {}", user.created_at);
    match &user.plan {
        Some(plan) => println!(
            "  plan:       {} ({}/{})",
            plan.name, plan.price, plan.interval
        ),
        None => println!("  plan:       none"),
    }
    println!("  projects:   {}", user.projects.len());
}

/// Clear the session entirely.
#[allow(clippy::print_stdout)]
pub fn reset(state: &AppState) -> Result<(), AppError> {
    state.store().clear()?;
    println!("Session cleared.");
    Ok(())
}
