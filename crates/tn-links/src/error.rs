//! Error types for link construction and evaluation.

use tn_core::{LinkId, Real};
use thiserror::Error;

/// Errors raised while resolving or evaluating link physics.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinkError {
    #[error("Link has no transfer modes")]
    EmptyModes,

    #[error("Missing link parameters: {}", fields.join(", "))]
    MissingParameters { fields: Vec<&'static str> },

    #[error("Invalid link parameter {field} = {value}: {reason}")]
    InvalidParameter {
        field: &'static str,
        value: Real,
        reason: &'static str,
    },

    #[error("Link mode '{mode}' is not implemented")]
    Unsupported { mode: &'static str },

    #[error("Division by zero: {what} is zero or not finite ({value})")]
    DivisionByZero { what: &'static str, value: Real },

    #[error("Non-finite heat exchange rate from {mode} ({value})")]
    NonFinite { mode: &'static str, value: Real },

    #[error("Manual rate refers to unknown link {link}")]
    UnknownLink { link: LinkId },
}

impl LinkError {
    /// True for problems in the model description itself, as opposed to
    /// arithmetic preconditions that only surface when a link is evaluated.
    pub fn is_configuration(&self) -> bool {
        !matches!(
            self,
            LinkError::DivisionByZero { .. } | LinkError::NonFinite { .. }
        )
    }
}

pub type LinkResult<T> = Result<T, LinkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parameters_lists_every_field() {
        let err = LinkError::MissingParameters {
            fields: vec!["view_factor", "length"],
        };
        assert_eq!(err.to_string(), "Missing link parameters: view_factor, length");
        assert!(err.is_configuration());
    }

    #[test]
    fn division_by_zero_is_arithmetic() {
        let err = LinkError::DivisionByZero {
            what: "contact resistance",
            value: 0.0,
        };
        assert!(!err.is_configuration());
    }
}
