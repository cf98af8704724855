//! Mortgage Overpayment - Amortization engine for annuity mortgages with monthly overpayments
//!
//! This library provides:
//! - Annuity installment calculation
//! - Month-by-month simulation of the baseline schedule
//! - Shorten-term and reduce-installment overpayment strategies
//! - Comparative metrics and summary tables
//! - Parallel batch runs over many loan scenarios

pub mod error;
pub mod loan;
pub mod amortization;
pub mod comparison;
pub mod scenario;

// Re-export commonly used types
pub use error::{Result, SimulationError};
pub use loan::LoanParameters;
pub use amortization::{
    AmortizationEngine, MonthRecord, RepaymentStrategy, SimulationConfig, SimulationResult,
    compute_installment,
};
pub use comparison::{compare, ComparisonReport, ComparisonResult, StrategySummary};
pub use scenario::ScenarioRunner;
