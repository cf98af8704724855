//! Loan parameters and scenario loading

mod data;
pub mod loader;

pub use data::{LoanParameters, MAX_TERM_MONTHS, MONTHS_PER_YEAR};
pub use loader::{load_scenarios, load_scenarios_from_reader};
