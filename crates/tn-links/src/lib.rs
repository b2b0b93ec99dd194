//! tn-links: heat-transfer physics for thermal network links.
//!
//! Provides the coupling modes a link can combine:
//! - Radiation between two grey surfaces with a view factor
//! - Conduction through a solid path
//! - Contact through a lumped contact resistance
//! - Manual rates supplied by the network (inverse links)
//!
//! Every mode is a pure function of the two endpoint temperatures and its own
//! typed parameters. Parameters are resolved once, at construction, from the raw
//! [`LinkParameters`] bag; a missing field is a construction error, never a
//! deferred evaluation error.
//!
//! # Example
//!
//! ```
//! use tn_links::{Emissivities, LinkMode, LinkParameters, NoManualLinks, resolve_modes};
//!
//! let params = LinkParameters {
//!     conduction_area: Some(1.0),
//!     conductivity: Some(1.0),
//!     length: Some(1.0),
//!     ..Default::default()
//! };
//! let physics = resolve_modes(&[LinkMode::Conduction], &params, Emissivities::default()).unwrap();
//!
//! let q = physics[0].heat_exchange_rate(100.0, 0.0, &NoManualLinks).unwrap();
//! assert_eq!(q, -100.0);
//! ```

pub mod error;
pub mod params;
pub mod physics;

// Re-exports
pub use error::{LinkError, LinkResult};
pub use params::{Emissivities, LinkMode, LinkParameters};
pub use physics::{
    ConductionParams, ContactParams, LinkEvaluator, LinkPhysics, ManualRate, NoManualLinks,
    RadiationParams,
    conduction_rate, contact_rate, radiation_rate, resolve_modes,
};
