//! tn-core: stable foundation for thermonet.
//!
//! Contains:
//! - units (uom temperature scales, Stefan–Boltzmann constant)
//! - numeric (Real + tolerances + float helpers)
//! - ids (compact IDs for heat storage nodes, interface nodes and links)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{TnError, TnResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
