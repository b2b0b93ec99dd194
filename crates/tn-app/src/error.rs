//! Error types for the tn-app service layer.

/// Application error type that wraps errors from the library crates
/// and keeps the configuration / runtime split visible to frontends.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Project validation failed: {0}")]
    Validation(String),

    #[error("Invalid network configuration: {0}")]
    Configuration(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// Problems in the model description rather than in its evaluation.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            AppError::Project(_)
                | AppError::Validation(_)
                | AppError::Configuration(_)
                | AppError::InvalidInput(_)
        )
    }
}

/// Result type for tn-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<tn_project::ProjectError> for AppError {
    fn from(err: tn_project::ProjectError) -> Self {
        match err {
            tn_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<tn_network::NetworkError> for AppError {
    fn from(err: tn_network::NetworkError) -> Self {
        if err.is_configuration() {
            AppError::Configuration(err.to_string())
        } else {
            AppError::Simulation(err.to_string())
        }
    }
}

impl From<tn_sim::SimError> for AppError {
    fn from(err: tn_sim::SimError) -> Self {
        match err {
            tn_sim::SimError::Results(e) => e.into(),
            e if e.is_configuration() => AppError::Configuration(e.to_string()),
            e => AppError::Simulation(e.to_string()),
        }
    }
}

impl From<tn_results::ResultsError> for AppError {
    fn from(err: tn_results::ResultsError) -> Self {
        AppError::Results(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_errors_keep_their_class() {
        let dup: AppError = tn_network::NetworkError::UnknownHeatStorage {
            name: "Ghost".to_string(),
        }
        .into();
        assert!(dup.is_configuration());

        let zero: AppError = tn_network::NetworkError::NonPositiveCapacitance {
            node: "Lump".to_string(),
            mass: 0.0,
            heat_capacity: 1.0,
        }
        .into();
        assert!(zero.to_string().contains("Lump"));
    }
}
