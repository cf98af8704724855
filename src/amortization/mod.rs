//! Amortization engine: annuity formula, monthly simulation loop and schedules

mod annuity;
mod state;
mod engine;
mod schedule;

pub use annuity::{compute_installment, round_currency};
pub use state::AmortizationState;
pub use engine::{
    AmortizationEngine, RepaymentStrategy, SimulationConfig,
    simulate_baseline, simulate_shorten_term, simulate_reduce_installment,
    DEFAULT_BALANCE_TOLERANCE, DEFAULT_DIVERGENCE_FACTOR, MAX_BALANCE_TOLERANCE,
};
pub use schedule::{MonthRecord, SimulationResult};
