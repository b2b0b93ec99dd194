//! Transient simulation of thermal networks.
//!
//! Provides:
//! - `TransientModel` trait for pluggable dynamic systems
//! - Explicit forward-Euler integrator
//! - Fixed-step driver with the truncated-final-step rule
//! - `ThermalNetwork`, the engine that steps a network and collects readings

pub mod error;
pub mod integrator;
pub mod model;
pub mod sim;
pub mod thermal;

// Re-exports for public API
pub use error::{SimError, SimResult};
pub use integrator::{ForwardEuler, Integrator};
pub use model::TransientModel;
pub use sim::{SimOptions, SimSummary, run_sim, step_count};
pub use thermal::{ThermalModel, ThermalNetwork};
