//! Network construction and evaluation errors.

use thiserror::Error;
use tn_core::Real;
use tn_links::LinkError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// A name is already used under the same parent.
    #[error("Duplicate {kind} name '{name}' in {parent}")]
    DuplicateName {
        kind: &'static str,
        name: String,
        parent: String,
    },

    #[error("Unknown heat storage node '{name}'")]
    UnknownHeatStorage { name: String },

    /// A link target that does not resolve to a declared interface node.
    #[error("Unknown interface node '{interface}' on heat storage node '{node}'")]
    UnknownInterface { node: String, interface: String },

    /// Mass times heat capacity must be a positive, finite capacitance.
    #[error(
        "Heat storage node '{node}' has non-positive capacitance (mass={mass}, heat_capacity={heat_capacity})"
    )]
    NonPositiveCapacitance {
        node: String,
        mass: Real,
        heat_capacity: Real,
    },

    #[error("Invalid {field} = {value} on '{owner}': {reason}")]
    InvalidParameter {
        owner: String,
        field: &'static str,
        value: Real,
        reason: &'static str,
    },

    #[error("Link '{link}': {source}")]
    Link {
        link: String,
        #[source]
        source: LinkError,
    },

    #[error("Temperature snapshot has {actual} entries, network has {expected} nodes")]
    SnapshotLength { expected: usize, actual: usize },

    #[error("{what} not found")]
    IdNotFound { what: &'static str },

    #[error("Invariant violated: {what}")]
    Invariant { what: String },
}

impl NetworkError {
    /// Configuration errors are mistakes in the model description; everything
    /// else is an arithmetic precondition or an internal invariant.
    pub fn is_configuration(&self) -> bool {
        match self {
            NetworkError::DuplicateName { .. }
            | NetworkError::UnknownHeatStorage { .. }
            | NetworkError::UnknownInterface { .. }
            | NetworkError::InvalidParameter { .. } => true,
            NetworkError::Link { source, .. } => source.is_configuration(),
            NetworkError::NonPositiveCapacitance { .. }
            | NetworkError::SnapshotLength { .. }
            | NetworkError::IdNotFound { .. }
            | NetworkError::Invariant { .. } => false,
        }
    }
}

pub type NetworkResult<T> = Result<T, NetworkError>;
