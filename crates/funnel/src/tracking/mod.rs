//! Event tracking.
//!
//! [`Tracker`] emits the fixed catalog of named funnel events through an
//! injected [`EventSink`]. Every call is fire-and-forget and best-effort:
//! with no sink configured (missing analytics key) every call is a silent
//! no-op, and a delivery failure never propagates to the user-facing flow.
//!
//! Duplicate calls simply produce duplicate analytics events; the tracker
//! performs no deduplication or batching.

use std::sync::{Arc, PoisonError, RwLock};

use rust_decimal::prelude::ToPrimitive;
use serde_json::{Map, Value, json};
use uuid::Uuid;

use driftwave_core::{MarketingSource, Plan, Project, ProjectId, User};

pub mod attribution;
pub mod sink;

pub use sink::{EventSink, RecordingSink, SinkCall};

/// Pages that emit a plain page-view event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Landing,
    Pricing,
    Signup,
    Checkout,
    Dashboard,
}

impl Page {
    /// The event name emitted when this page is viewed.
    #[must_use]
    pub const fn event_name(self) -> &'static str {
        match self {
            Self::Landing => "landing_page_viewed",
            Self::Pricing => "pricing_page_viewed",
            Self::Signup => "signup_page_viewed",
            Self::Checkout => "checkout_page_viewed",
            Self::Dashboard => "dashboard_viewed",
        }
    }
}

/// Emitter for the named funnel-event catalog.
///
/// Maintains the distinct id the events are attributed to: anonymous until
/// [`Tracker::identify`] switches it to the user's id.
pub struct Tracker {
    sink: Option<Arc<dyn EventSink>>,
    distinct_id: RwLock<String>,
}

impl Tracker {
    /// Create a tracker emitting into `sink`, starting anonymous.
    #[must_use]
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self {
            sink: Some(sink),
            distinct_id: RwLock::new(anonymous_id()),
        }
    }

    /// Create a tracker whose every call is a silent no-op.
    ///
    /// Used when the analytics client is not configured; tracking is
    /// best-effort and must never fail the user-facing flow.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            sink: None,
            distinct_id: RwLock::new(anonymous_id()),
        }
    }

    /// Whether events actually leave the process.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    // -------------------------------------------------------------------------
    // Page views
    // -------------------------------------------------------------------------

    /// Plain page view. For the landing page prefer
    /// [`Tracker::landing_page_view`], which carries attribution.
    pub fn page_view(&self, page: Page) {
        self.capture(page.event_name(), Map::new());
    }

    /// Landing-page view with the attribution snapshot and referrer attached.
    pub fn landing_page_view(&self, source: &MarketingSource, referrer: Option<&str>) {
        let mut properties = Map::new();
        for (field, value) in source.fields() {
            properties.insert(field.to_owned(), json!(value));
        }
        properties.insert("referrer".to_owned(), json!(referrer.unwrap_or_default()));
        self.capture(Page::Landing.event_name(), properties);
    }

    /// Call-to-action button clicked somewhere on the landing page.
    pub fn cta_clicked(&self, location: &str) {
        self.capture("cta_clicked", props(&[("location", json!(location))]));
    }

    /// Pricing link clicked from the navigation.
    pub fn pricing_link_clicked(&self) {
        self.capture("pricing_link_clicked", Map::new());
    }

    // -------------------------------------------------------------------------
    // Signup funnel
    // -------------------------------------------------------------------------

    /// First interaction with the signup form.
    pub fn signup_form_started(&self) {
        self.capture("signup_form_started", Map::new());
    }

    /// Signup form submitted successfully.
    pub fn signup_form_completed(&self, user: &User) {
        self.capture(
            "signup_form_completed",
            props(&[
                ("email", json!(user.email.as_str())),
                ("name", json!(user.name)),
            ]),
        );
    }

    /// Signup form abandoned before submission.
    pub fn signup_form_abandoned(&self) {
        self.capture("signup_form_abandoned", Map::new());
    }

    // -------------------------------------------------------------------------
    // Pricing and checkout funnel
    // -------------------------------------------------------------------------

    /// A plan card was rendered to the visitor.
    pub fn plan_viewed(&self, plan: &Plan) {
        self.capture(
            "plan_viewed",
            props(&[
                ("plan_id", json!(plan.id.as_str())),
                ("plan_name", json!(plan.name)),
            ]),
        );
    }

    /// A plan was picked on the pricing page.
    pub fn plan_selected(&self, plan: &Plan) {
        self.capture(
            "plan_selected",
            props(&[
                ("plan_id", json!(plan.id.as_str())),
                ("plan_name", json!(plan.name)),
                ("plan_price", json!(price_amount(plan))),
                ("plan_interval", json!(plan.interval.as_str())),
            ]),
        );
    }

    /// The visitor moved from plan selection into checkout.
    pub fn checkout_initiated(&self, plan: &Plan) {
        self.capture(
            "checkout_initiated",
            props(&[
                ("plan_id", json!(plan.id.as_str())),
                ("plan_name", json!(plan.name)),
                ("plan_price", json!(price_amount(plan))),
            ]),
        );
    }

    /// A payment method was picked at checkout.
    pub fn payment_method_selected(&self, method: &str) {
        self.capture(
            "payment_method_selected",
            props(&[("method", json!(method))]),
        );
    }

    /// The simulated payment was approved.
    pub fn payment_completed(&self, plan: &Plan) {
        self.capture(
            "payment_completed",
            props(&[
                ("plan_id", json!(plan.id.as_str())),
                ("plan_name", json!(plan.name)),
                ("plan_price", json!(price_amount(plan))),
                ("plan_interval", json!(plan.interval.as_str())),
            ]),
        );
    }

    /// The simulated payment was declined.
    pub fn payment_failed(&self, plan: &Plan, reason: Option<&str>) {
        let mut properties = props(&[
            ("plan_id", json!(plan.id.as_str())),
            ("plan_name", json!(plan.name)),
        ]);
        if let Some(reason) = reason {
            properties.insert("reason".to_owned(), json!(reason));
        }
        self.capture("payment_failed", properties);
    }

    // -------------------------------------------------------------------------
    // Dashboard funnel
    // -------------------------------------------------------------------------

    /// The project-creation form was opened.
    pub fn project_creation_started(&self) {
        self.capture("project_creation_started", Map::new());
    }

    /// A project was created.
    pub fn project_created(&self, project: &Project) {
        self.capture(
            "project_created",
            props(&[
                ("project_id", json!(project.id.to_string())),
                ("project_name", json!(project.name)),
            ]),
        );
    }

    /// A project was opened from the dashboard.
    pub fn project_viewed(&self, project_id: ProjectId) {
        self.capture(
            "project_viewed",
            props(&[("project_id", json!(project_id.to_string()))]),
        );
    }

    // -------------------------------------------------------------------------
    // Identity
    // -------------------------------------------------------------------------

    /// Establish the analytics identity for `user` and switch subsequent
    /// events to its distinct id.
    pub fn identify(&self, user: &User, extra: Map<String, Value>) {
        let distinct_id = user.id.to_string();
        {
            let mut current = self
                .distinct_id
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            *current = distinct_id.clone();
        }

        let Some(sink) = &self.sink else { return };
        let mut traits = props(&[
            ("email", json!(user.email.as_str())),
            ("name", json!(user.name)),
        ]);
        traits.extend(extra);
        sink.identify(&distinct_id, traits);
    }

    /// Merge arbitrary properties onto the current identity.
    pub fn set_user_properties(&self, properties: Map<String, Value>) {
        let Some(sink) = &self.sink else { return };
        sink.set_person_properties(&self.distinct_id(), properties);
    }

    /// Attach the present attribution fields as `marketing_<field>` identity
    /// properties.
    pub fn set_marketing_properties(&self, source: &MarketingSource) {
        if source.is_empty() {
            return;
        }
        let mut properties = Map::new();
        for (field, value) in source.fields() {
            properties.insert(format!("marketing_{field}"), json!(value));
        }
        self.set_user_properties(properties);
    }

    // -------------------------------------------------------------------------

    fn capture(&self, event: &str, properties: Map<String, Value>) {
        let Some(sink) = &self.sink else { return };
        sink.capture(&self.distinct_id(), event, properties);
    }

    fn distinct_id(&self) -> String {
        self.distinct_id
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Fresh anonymous distinct id for a not-yet-identified visitor.
fn anonymous_id() -> String {
    format!("anon_{}", Uuid::new_v4().simple())
}

/// Build a property map from static keys.
fn props(entries: &[(&str, Value)]) -> Map<String, Value> {
    entries
        .iter()
        .map(|(key, value)| ((*key).to_owned(), value.clone()))
        .collect()
}

/// Plan price as a plain number, the way the event payloads carry it.
fn price_amount(plan: &Plan) -> f64 {
    plan.price.amount.to_f64().unwrap_or_default()
}
