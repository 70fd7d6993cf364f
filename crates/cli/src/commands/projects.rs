//! Dashboard commands: create, list, and show projects.

use driftwave_core::ProjectId;
use driftwave_funnel::error::AppError;
use driftwave_funnel::flows;
use driftwave_funnel::state::AppState;
use driftwave_funnel::tracking::Page;

/// Create a project for the session user.
#[allow(clippy::print_stdout)]
pub fn create(state: &AppState, name: &str, description: &str) -> Result<(), AppError> {
    match flows::create_project(state, name, description) {
        Ok((user, project)) => {
            println!("Created project \"{}\" ({})", project.name, project.id);
            println!("You now have {} project(s).", user.projects.len());
            Ok(())
        }
        Err(AppError::SignedOut) => {
            println!("You need an account first: dw-cli signup -e you@example.com -n \"You\"");
            Ok(())
        }
        Err(AppError::PlanRequired) => {
            println!("Pick a plan before creating projects: dw-cli plans");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// List the session user's projects the way the dashboard renders them.
#[allow(clippy::print_stdout)]
pub fn list(state: &AppState) {
    state.tracker().page_view(Page::Dashboard);

    let Some(user) = state.store().current_user() else {
        println!("You need an account first: dw-cli signup -e you@example.com -n \"You\"");
        return;
    };

    if user.projects.is_empty() {
        println!("No projects yet. Create one: dw-cli project create");
        return;
    }

    println!("Projects for {}:", user.name);
    for project in &user.projects {
        println!("  {}  {}  ({})", project.id, project.name, project.created_at);
    }
}

/// Show one project.
#[allow(clippy::print_stdout)]
pub fn show(state: &AppState, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let id: ProjectId = id.parse()?;

    match flows::view_project(state, id) {
        Ok(project) => {
            println!("{}", project.name);
            println!("  id:          {}", project.id);
            println!("  created at:  {}", project.created_at);
            println!("  description: {}", project.description);
            Ok(())
        }
        Err(AppError::SignedOut) => {
            println!("You need an account first: dw-cli signup -e you@example.com -n \"You\"");
            Ok(())
        }
        Err(AppError::UnknownProject(_)) => {
            println!("No such project. See them all: dw-cli project list");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
