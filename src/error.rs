//! Error types for parameter validation and simulation failures

use thiserror::Error;

use crate::amortization::RepaymentStrategy;

/// Errors raised by the amortization engine and its loaders
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Input outside its domain; raised before any month is simulated
    #[error("Invalid parameter {field}: {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    /// Balance still open after the iteration guard
    #[error("Numeric divergence: {strategy} balance {balance:.2} still open after {months} months")]
    NumericDivergence {
        strategy: RepaymentStrategy,
        months: u32,
        balance: f64,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimulationError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SimulationError::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SimulationError>;
