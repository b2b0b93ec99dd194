//! tn-results: temperature time series and tabular persistence.

pub mod csv;
pub mod json;
pub mod types;

pub use csv::{read_csv, to_csv_string, write_csv};
pub use json::{read_json, write_json};
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Record at t={time_s} has {actual} values, series has {expected} nodes")]
    RowWidth {
        time_s: f64,
        expected: usize,
        actual: usize,
    },

    #[error("Malformed CSV at line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}
