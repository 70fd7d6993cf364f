//! Plan selection and checkout flow.

use driftwave_core::{Plan, PlanId, User, find_plan};

use crate::error::{AppError, Result};
use crate::services::payments::{PaymentMethod, PaymentOutcome};
use crate::state::AppState;

/// Result of a checkout attempt.
///
/// A decline is a designed-in, retryable outcome - the session user is left
/// exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Payment approved; the session user now carries the plan.
    Completed {
        user: User,
        confirmation: String,
    },
    /// Payment declined; nothing was persisted.
    Declined { reason: String },
}

/// Pick a plan on the pricing page and head into checkout.
///
/// # Errors
///
/// Returns `SignedOut` if no one is signed in (the original redirects to
/// signup here) or `UnknownPlan` for an ID outside the catalog.
pub fn select_plan(state: &AppState, plan_id: &PlanId) -> Result<&'static Plan> {
    if state.store().current_user().is_none() {
        return Err(AppError::SignedOut);
    }
    let plan = find_plan(plan_id).ok_or_else(|| AppError::UnknownPlan(plan_id.clone()))?;

    let tracker = state.tracker();
    tracker.plan_selected(plan);
    tracker.checkout_initiated(plan);

    Ok(plan)
}

/// Complete checkout for `plan_id` with the chosen payment method.
///
/// Charges the simulated gateway; on approval the plan is attached to the
/// session user, on decline the stored user is untouched and the reason is
/// surfaced for retry.
///
/// # Errors
///
/// Returns `SignedOut` with no session user, `UnknownPlan` for an ID outside
/// the catalog, or `Storage` if persisting the subscribed user fails.
pub async fn complete_checkout(
    state: &AppState,
    plan_id: &PlanId,
    method: PaymentMethod,
) -> Result<CheckoutOutcome> {
    let user = state.store().current_user().ok_or(AppError::SignedOut)?;
    let plan = find_plan(plan_id).ok_or_else(|| AppError::UnknownPlan(plan_id.clone()))?;

    let tracker = state.tracker();
    tracker.payment_method_selected(method.as_str());

    match state.payments().charge(plan).await {
        PaymentOutcome::Approved { confirmation } => {
            let user = state.store().set_plan(&user, plan.clone())?;
            tracker.payment_completed(plan);
            tracing::info!(user = %user.id, plan = %plan.id, "checkout completed");
            Ok(CheckoutOutcome::Completed { user, confirmation })
        }
        PaymentOutcome::Declined { reason } => {
            tracker.payment_failed(plan, Some(&reason));
            Ok(CheckoutOutcome::Declined { reason })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::flows::signup::sign_up;
    use crate::flows::testing::{state_with_gateway, state_with_sink};

    #[test]
    fn test_select_plan_requires_session() {
        let (state, _sink) = state_with_sink();
        let err = select_plan(&state, &PlanId::from("pro")).unwrap_err();
        assert!(matches!(err, AppError::SignedOut));
    }

    #[test]
    fn test_select_plan_tracks_selection_and_initiation() {
        let (state, sink) = state_with_sink();
        sign_up(&state, "ann@example.com", "Ann").unwrap();

        let plan = select_plan(&state, &PlanId::from("pro")).unwrap();
        assert_eq!(plan.id, PlanId::from("pro"));

        let names = sink.event_names();
        assert_eq!(
            names,
            vec![
                "signup_form_completed",
                "plan_selected",
                "checkout_initiated",
            ]
        );
    }

    #[test]
    fn test_select_plan_unknown_id() {
        let (state, _sink) = state_with_sink();
        sign_up(&state, "ann@example.com", "Ann").unwrap();

        let err = select_plan(&state, &PlanId::from("free")).unwrap_err();
        assert!(matches!(err, AppError::UnknownPlan(_)));
    }

    #[tokio::test]
    async fn test_complete_checkout_attaches_plan() {
        let (state, sink) = state_with_sink();
        sign_up(&state, "ann@example.com", "Ann").unwrap();

        let outcome = complete_checkout(&state, &PlanId::from("pro"), PaymentMethod::Card)
            .await
            .unwrap();

        let CheckoutOutcome::Completed { user, confirmation } = outcome else {
            panic!("expected completion");
        };
        assert_eq!(user.plan.as_ref().unwrap().id, PlanId::from("pro"));
        assert!(confirmation.starts_with("ch_"));

        // The persisted record matches what the flow returned.
        assert_eq!(state.store().current_user(), Some(user));

        let names = sink.event_names();
        assert_eq!(
            names,
            vec![
                "signup_form_completed",
                "payment_method_selected",
                "payment_completed",
            ]
        );
    }

    #[tokio::test]
    async fn test_declined_checkout_leaves_user_untouched() {
        // failure_rate 1.0: every charge declines.
        let (state, sink) = state_with_gateway(1.0, 7);
        sign_up(&state, "ann@example.com", "Ann").unwrap();

        let outcome = complete_checkout(&state, &PlanId::from("pro"), PaymentMethod::Paypal)
            .await
            .unwrap();

        let CheckoutOutcome::Declined { reason } = outcome else {
            panic!("expected decline");
        };
        assert!(!reason.is_empty());

        let stored = state.store().current_user().unwrap();
        assert!(stored.plan.is_none());
        assert!(stored.subscribed_at.is_none());

        assert!(sink.event_names().contains(&"payment_failed".to_owned()));
    }

    #[tokio::test]
    async fn test_complete_checkout_requires_session() {
        let (state, _sink) = state_with_sink();
        let err = complete_checkout(&state, &PlanId::from("pro"), PaymentMethod::Card)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::SignedOut));
    }
}
