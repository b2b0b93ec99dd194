//! Project loading, validation, and introspection.

use std::path::Path;

use tn_project::schema::Project;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// Counts shown by `validate` and `describe`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSummary {
    pub name: String,
    pub node_count: usize,
    pub interface_count: usize,
    /// Declared links only; every one gains a generated inverse when compiled.
    pub link_count: usize,
    pub duration_s: f64,
    pub timestep_s: f64,
}

/// Load a project from a `.yaml`, `.yml` or `.json` file. The file is
/// validated as part of loading.
pub fn load_project(path: &Path) -> AppResult<Project> {
    let project = tn_project::load(path)?;
    debug!(path = %path.display(), nodes = project.nodes.len(), "project loaded");
    Ok(project)
}

/// Validate project structure, reporting every problem at once.
pub fn validate_project(project: &Project) -> AppResult<()> {
    tn_project::validate_project(project).map_err(|e| {
        let lines: Vec<String> = e.problems.iter().map(|p| format!("  - {p}")).collect();
        AppError::Validation(format!(
            "{} problem(s)\n{}",
            e.problems.len(),
            lines.join("\n")
        ))
    })
}

pub fn summarize(project: &Project) -> ProjectSummary {
    let interfaces = project.nodes.iter().flat_map(|n| &n.interfaces);
    ProjectSummary {
        name: project.name.clone(),
        node_count: project.nodes.len(),
        interface_count: interfaces.clone().count(),
        link_count: interfaces.map(|i| i.links.len()).sum(),
        duration_s: project.simulation.duration_s,
        timestep_s: project.simulation.timestep_s,
    }
}
