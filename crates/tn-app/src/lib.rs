//! Shared application service layer for thermonet.
//!
//! Turns declarative project files into running thermal networks: loading and
//! validating projects, compiling them in strict stages, and executing runs.

pub mod compile;
pub mod error;
pub mod project_service;
pub mod run_service;

// Re-export key types for convenience
pub use compile::{compile_network, compile_project, construct};
pub use error::{AppError, AppResult};
pub use project_service::{ProjectSummary, load_project, summarize, validate_project};
pub use run_service::{OutputFormat, RunRequest, RunResponse, run};
