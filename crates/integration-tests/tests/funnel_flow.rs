//! End-to-end funnel scenarios.

use driftwave_core::PlanId;
use driftwave_funnel::error::AppError;
use driftwave_funnel::flows::{self, CheckoutOutcome};
use driftwave_funnel::services::payments::PaymentMethod;
use driftwave_funnel::tracking::Page;
use url::Url;

use driftwave_integration_tests::TestContext;

/// The canonical walk through the whole funnel: land with campaign
/// parameters, sign up, pick the Pro plan, pay, create a project.
#[tokio::test]
async fn test_full_funnel_scenario() {
    let ctx = TestContext::new();
    let state = &ctx.state;

    // Landing with attribution.
    let url = Url::parse("https://driftwave.dev/?utm_source=twitter&utm_campaign=launch")
        .expect("valid url");
    flows::visit(state, Page::Landing, Some(&url), Some("https://t.co/xyz"));

    // Signup.
    flows::visit(state, Page::Signup, None, None);
    let user = flows::sign_up(state, "a@x.com", "Ann").expect("signup succeeds");
    assert!(user.plan.is_none());
    assert!(user.projects.is_empty());

    // Pricing and checkout.
    flows::visit(state, Page::Pricing, None, None);
    flows::select_plan(state, &PlanId::from("pro")).expect("plan exists");
    flows::visit(state, Page::Checkout, None, None);
    let outcome = flows::complete_checkout(state, &PlanId::from("pro"), PaymentMethod::Card)
        .await
        .expect("checkout runs");
    assert!(matches!(outcome, CheckoutOutcome::Completed { .. }));

    // Dashboard and project creation.
    flows::visit(state, Page::Dashboard, None, None);
    let (_, project) =
        flows::create_project(state, "Demo", "desc desc desc").expect("project created");
    let viewed = flows::view_project(state, project.id).expect("project visible");
    assert_eq!(viewed, project);

    // Final session state.
    let final_user = state.store().current_user().expect("user persisted");
    assert_eq!(final_user.plan.as_ref().expect("plan set").id, PlanId::from("pro"));
    assert!(final_user.subscribed_at.is_some());
    assert_eq!(final_user.projects.len(), 1);
    assert_eq!(final_user.email.as_str(), "a@x.com");

    // The event stream tells the same story, in order.
    assert_eq!(
        ctx.sink.event_names(),
        vec![
            "landing_page_viewed",
            "signup_page_viewed",
            "signup_form_completed",
            "pricing_page_viewed",
            "plan_selected",
            "checkout_initiated",
            "checkout_page_viewed",
            "payment_method_selected",
            "payment_completed",
            "dashboard_viewed",
            "project_creation_started",
            "project_created",
            "project_viewed",
        ]
    );
}

#[test]
fn test_signed_out_conditions_drive_redirects() {
    let ctx = TestContext::new();
    let state = &ctx.state;

    assert!(matches!(
        flows::select_plan(state, &PlanId::from("pro")),
        Err(AppError::SignedOut)
    ));
    assert!(matches!(
        flows::create_project(state, "Demo", "desc desc desc"),
        Err(AppError::SignedOut)
    ));
}

#[test]
fn test_project_creation_requires_plan() {
    let ctx = TestContext::new();
    let state = &ctx.state;

    flows::sign_up(state, "a@x.com", "Ann").expect("signup succeeds");
    assert!(matches!(
        flows::create_project(state, "Demo", "desc desc desc"),
        Err(AppError::PlanRequired)
    ));
}

#[tokio::test]
async fn test_reset_clears_everything() {
    let ctx = TestContext::new();
    let state = &ctx.state;

    flows::sign_up(state, "a@x.com", "Ann").expect("signup succeeds");
    flows::complete_checkout(state, &PlanId::from("starter"), PaymentMethod::Card)
        .await
        .expect("checkout runs");

    state.store().clear().expect("clear succeeds");
    assert!(state.store().current_user().is_none());

    // The funnel starts over from the beginning.
    assert!(matches!(
        flows::select_plan(state, &PlanId::from("starter")),
        Err(AppError::SignedOut)
    ));
}
