//! tn-network: thermal network data model for thermonet.
//!
//! Provides:
//! - Heat storage nodes, interface nodes and links stored in flat arenas
//! - An incremental builder that rejects duplicate names, checks capacitance
//!   and generates the inverse of every declared link
//! - Read-only evaluation of link, interface and node exchange over a frozen
//!   temperature snapshot
//!
//! # Example
//!
//! ```
//! use tn_links::{LinkMode, LinkParameters};
//! use tn_network::{HeatStorageParams, InterfaceParams, NetworkBuilder};
//!
//! let mut builder = NetworkBuilder::new();
//! let hot = builder
//!     .add_heat_storage("Hot", HeatStorageParams::new(1.0, 1.0).with_temperature(100.0))
//!     .unwrap();
//! let cold = builder
//!     .add_heat_storage("Cold", HeatStorageParams::new(1.0, 1.0))
//!     .unwrap();
//! let a = builder.add_interface(hot, "face", InterfaceParams::default()).unwrap();
//! let b = builder.add_interface(cold, "face", InterfaceParams::default()).unwrap();
//! let params = LinkParameters {
//!     conduction_area: Some(1.0),
//!     conductivity: Some(1.0),
//!     length: Some(1.0),
//!     ..Default::default()
//! };
//! builder.add_link(a, "bar", b, &[LinkMode::Conduction], params).unwrap();
//! let network = builder.build().unwrap();
//!
//! let temps = network.temperatures();
//! assert_eq!(network.net_power(hot, &temps).unwrap(), -100.0);
//! assert_eq!(network.net_power(cold, &temps).unwrap(), 100.0);
//! ```

pub mod builder;
pub mod error;
pub mod network;
mod summary;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::{HeatStorageParams, InterfaceParams, NetworkBuilder};
pub use error::{NetworkError, NetworkResult};
pub use network::{HeatStorageNode, InterfaceNode, Link, LinkKind, Network};
