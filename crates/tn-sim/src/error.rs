//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered during transient simulation.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Unknown heat storage node '{name}'")]
    UnknownNode { name: String },

    #[error("Unknown link '{node}.{interface}.{link}'")]
    UnknownLink {
        node: String,
        interface: String,
        link: String,
    },

    #[error(transparent)]
    Core(#[from] tn_core::TnError),

    #[error(transparent)]
    Network(#[from] tn_network::NetworkError),

    #[error("Results error: {0}")]
    Results(#[from] tn_results::ResultsError),
}

impl SimError {
    /// Mirrors [`tn_network::NetworkError::is_configuration`] for the whole stack.
    pub fn is_configuration(&self) -> bool {
        match self {
            SimError::InvalidArg { .. }
            | SimError::UnknownNode { .. }
            | SimError::UnknownLink { .. }
            | SimError::Core(_) => true,
            SimError::Network(e) => e.is_configuration(),
            SimError::Results(_) => false,
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
