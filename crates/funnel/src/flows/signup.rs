//! Signup flow.

use serde_json::json;

use driftwave_core::{Email, User};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Minimum length of a display name.
const MIN_NAME_LENGTH: usize = 2;

/// Create the session user from a submitted signup form.
///
/// Persists the new user, establishes the analytics identity (with the
/// signup date as a trait), and records the completed signup.
///
/// # Errors
///
/// Returns `InvalidInput`/`InvalidEmail` for form-level constraint
/// violations, or `Storage` if the record cannot be written.
pub fn sign_up(state: &AppState, email: &str, name: &str) -> Result<User> {
    let name = name.trim();
    if name.chars().count() < MIN_NAME_LENGTH {
        return Err(AppError::InvalidInput(format!(
            "name must be at least {MIN_NAME_LENGTH} characters"
        )));
    }

    let email = Email::parse(email.trim())?;
    let user = state.store().create_user(email, name)?;

    let tracker = state.tracker();
    let mut traits = serde_json::Map::new();
    traits.insert(
        "signup_date".to_owned(),
        json!(user.created_at.to_rfc3339()),
    );
    tracker.identify(&user, traits);
    tracker.signup_form_completed(&user);

    tracing::info!(user = %user.id, "user signed up");
    Ok(user)
}
