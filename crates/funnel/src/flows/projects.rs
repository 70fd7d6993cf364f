//! Project creation and viewing flows.

use serde_json::json;

use driftwave_core::{Project, ProjectId, User};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Minimum length of a project name.
const MIN_NAME_LENGTH: usize = 2;

/// Description length bounds.
const MIN_DESCRIPTION_LENGTH: usize = 10;
const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Create a project for the session user.
///
/// Requires a signed-in user with a plan (the original sends plan-less users
/// back to pricing). On success the project is appended to the user record
/// and the identity's project counters are refreshed.
///
/// # Errors
///
/// Returns `SignedOut`/`PlanRequired` as redirect conditions, `InvalidInput`
/// for form-level constraint violations, or `Storage` if the record cannot
/// be written.
pub fn create_project(state: &AppState, name: &str, description: &str) -> Result<(User, Project)> {
    let user = state.store().current_user().ok_or(AppError::SignedOut)?;
    if !user.has_plan() {
        return Err(AppError::PlanRequired);
    }

    let name = name.trim();
    let description = description.trim();
    if name.chars().count() < MIN_NAME_LENGTH {
        return Err(AppError::InvalidInput(format!(
            "project name must be at least {MIN_NAME_LENGTH} characters"
        )));
    }
    let description_len = description.chars().count();
    if !(MIN_DESCRIPTION_LENGTH..=MAX_DESCRIPTION_LENGTH).contains(&description_len) {
        return Err(AppError::InvalidInput(format!(
            "description must be {MIN_DESCRIPTION_LENGTH} to {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }

    let tracker = state.tracker();
    tracker.project_creation_started();

    let project = Project::new(name, description);
    let user = state.store().add_project(&user, project.clone())?;

    let mut properties = serde_json::Map::new();
    properties.insert("projects_count".to_owned(), json!(user.projects.len()));
    properties.insert("has_projects".to_owned(), json!(true));
    tracker.set_user_properties(properties);

    tracker.project_created(&project);

    tracing::info!(user = %user.id, project = %project.id, "project created");
    Ok((user, project))
}

/// Open a project from the dashboard.
///
/// # Errors
///
/// Returns `SignedOut` with no session user, or `UnknownProject` if the
/// session user does not own `id` (the original redirects to the dashboard).
pub fn view_project(state: &AppState, id: ProjectId) -> Result<Project> {
    let user = state.store().current_user().ok_or(AppError::SignedOut)?;
    let project = user
        .project(id)
        .cloned()
        .ok_or(AppError::UnknownProject(id))?;

    state.tracker().project_viewed(id);
    Ok(project)
}
