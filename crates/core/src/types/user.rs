//! User and project records.
//!
//! These are the records the session store persists. They are immutable
//! values: every mutation produces a new record via `with_*` methods, and the
//! store writes the whole record back (no field-level updates).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::email::Email;
use crate::types::id::{ProjectId, UserId};
use crate::types::plan::Plan;

/// A project owned by the session user.
///
/// Projects are created through the project-creation flow, never mutated
/// afterwards, and never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Create a new project with a fresh ID and the current timestamp.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: ProjectId::generate(),
            name: name.into(),
            description: description.into(),
            created_at: Utc::now(),
        }
    }
}

/// The signed-in user.
///
/// Exactly one `User` is resident at a time (single-session, single-device
/// model). The record is serialized as-is into the session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscribed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl User {
    /// Create a new user with a fresh ID, the current timestamp, an empty
    /// project list, and no plan.
    #[must_use]
    pub fn new(email: Email, name: impl Into<String>) -> Self {
        Self {
            id: UserId::generate(),
            email,
            name: name.into(),
            created_at: Utc::now(),
            plan: None,
            subscribed_at: None,
            projects: Vec::new(),
        }
    }

    /// Returns a new record with `plan` set and `subscribed_at` stamped.
    #[must_use]
    pub fn with_plan(mut self, plan: Plan, at: DateTime<Utc>) -> Self {
        self.plan = Some(plan);
        self.subscribed_at = Some(at);
        self
    }

    /// Returns a new record with `project` appended to the project list.
    ///
    /// Append at tail, order-preserving; no deduplication, no name-uniqueness
    /// check.
    #[must_use]
    pub fn with_project(mut self, project: Project) -> Self {
        self.projects.push(project);
        self
    }

    /// Whether the user has subscribed to a plan.
    #[must_use]
    pub const fn has_plan(&self) -> bool {
        self.plan.is_some()
    }

    /// Look up an owned project by ID.
    #[must_use]
    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::id::PlanId;
    use crate::types::plan::find_plan;

    fn test_user() -> User {
        User::new(Email::parse("ann@example.com").unwrap(), "Ann")
    }

    #[test]
    fn test_new_user_is_unsubscribed_and_empty() {
        let user = test_user();
        assert_eq!(user.email.as_str(), "ann@example.com");
        assert_eq!(user.name, "Ann");
        assert!(user.plan.is_none());
        assert!(user.subscribed_at.is_none());
        assert!(user.projects.is_empty());
    }

    #[test]
    fn test_with_plan_stamps_subscription() {
        let plan = find_plan(&PlanId::from("pro")).unwrap().clone();
        let at = Utc::now();
        let user = test_user().with_plan(plan, at);
        assert!(user.has_plan());
        assert_eq!(user.plan.as_ref().unwrap().id, PlanId::from("pro"));
        assert_eq!(user.subscribed_at, Some(at));
    }

    #[test]
    fn test_with_project_appends_in_order() {
        let p1 = Project::new("First", "first project description");
        let p2 = Project::new("Second", "second project description");
        let user = test_user().with_project(p1.clone()).with_project(p2.clone());
        assert_eq!(user.projects, vec![p1, p2]);
    }

    #[test]
    fn test_project_lookup() {
        let p = Project::new("Demo", "a demo project");
        let user = test_user().with_project(p.clone());
        assert_eq!(user.project(p.id), Some(&p));
        assert!(user.project(ProjectId::generate()).is_none());
    }

    #[test]
    fn test_serde_camel_case_layout() {
        let user = test_user();
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("projects").is_some());
        // Unset optionals are omitted entirely
        assert!(json.get("plan").is_none());
        assert!(json.get("subscribedAt").is_none());
    }

    #[test]
    fn test_serde_roundtrip_with_plan_and_projects() {
        let plan = find_plan(&PlanId::from("starter")).unwrap().clone();
        let user = test_user()
            .with_plan(plan, Utc::now())
            .with_project(Project::new("Demo", "a demo project"));
        let json = serde_json::to_string(&user).unwrap();
        let parsed: User = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, user);
    }
}
