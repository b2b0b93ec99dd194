//! Run execution service: load, compile, simulate, save.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::info;

use crate::compile;
use crate::error::{AppError, AppResult};
use crate::project_service;

/// File format for saved readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    /// JSON for a `.json` extension, CSV otherwise.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => OutputFormat::Json,
            _ => OutputFormat::Csv,
        }
    }
}

/// Request to execute a run.
#[derive(Debug, Clone)]
pub struct RunRequest<'a> {
    pub project_path: &'a Path,
    /// Overrides `simulation.duration_s`
    pub duration_s: Option<f64>,
    /// Overrides `simulation.timestep_s`
    pub timestep_s: Option<f64>,
    pub parallel: bool,
    pub output: Option<&'a Path>,
    pub format: OutputFormat,
}

impl<'a> RunRequest<'a> {
    pub fn new(project_path: &'a Path) -> Self {
        Self {
            project_path,
            duration_s: None,
            timestep_s: None,
            parallel: false,
            output: None,
            format: OutputFormat::Csv,
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub steps: usize,
    pub t_final_s: f64,
    /// `(node, kelvin)` after the last step, in declaration order.
    pub final_temperatures: Vec<(String, f64)>,
    pub output: Option<PathBuf>,
    pub elapsed_s: f64,
}

pub fn run(request: &RunRequest) -> AppResult<RunResponse> {
    let start = Instant::now();

    let mut project = project_service::load_project(request.project_path)?;
    if let Some(duration) = request.duration_s {
        project.simulation.duration_s = duration;
    }
    if let Some(timestep) = request.timestep_s {
        project.simulation.timestep_s = timestep;
    }
    if request.duration_s.is_some() || request.timestep_s.is_some() {
        project_service::validate_project(&project)
            .map_err(|e| AppError::InvalidInput(e.to_string()))?;
    }

    let mut engine = compile::compile_project(&project, request.parallel)?;
    let summary = engine.simulate()?;

    if let Some(path) = request.output {
        match request.format {
            OutputFormat::Csv => engine.save(path)?,
            OutputFormat::Json => tn_results::write_json(path, engine.readings())?,
        }
    }

    let final_temperatures = engine
        .network()
        .nodes()
        .iter()
        .map(|n| (n.name.clone(), n.temperature()))
        .collect();
    let elapsed_s = start.elapsed().as_secs_f64();
    info!(
        project = %project.name,
        steps = summary.steps,
        elapsed_s,
        "run complete"
    );

    Ok(RunResponse {
        steps: summary.steps,
        t_final_s: summary.t_final,
        final_temperatures,
        output: request.output.map(Path::to_path_buf),
        elapsed_s,
    })
}
