//! Core amortization engine for month-by-month loan simulations

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::annuity::compute_installment;
use super::schedule::{MonthRecord, SimulationResult};
use super::state::AmortizationState;
use crate::error::{Result, SimulationError};
use crate::loan::LoanParameters;

/// Residual balance treated as fully repaid (currency units)
pub const DEFAULT_BALANCE_TOLERANCE: f64 = 0.01;

/// Largest accepted tolerance; anything coarser ends loans early
pub const MAX_BALANCE_TOLERANCE: f64 = 1.0;

/// Simulation aborts after `term_months * factor` months without closing
pub const DEFAULT_DIVERGENCE_FACTOR: u32 = 2;

/// Configuration for a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Balance at or below this amount is closed out in the current month
    pub balance_tolerance: f64,

    /// Iteration guard as a multiple of the original term
    pub divergence_factor: u32,
}

impl SimulationConfig {
    /// Reject a tolerance or guard that would break the closing invariants
    pub fn validate(&self) -> Result<()> {
        if !self.balance_tolerance.is_finite() || self.balance_tolerance < 0.0 {
            return Err(SimulationError::invalid(
                "balance_tolerance",
                format!("must be a finite non-negative amount, got {}", self.balance_tolerance),
            ));
        }
        if self.balance_tolerance > MAX_BALANCE_TOLERANCE {
            return Err(SimulationError::invalid(
                "balance_tolerance",
                format!("must not exceed {}, got {}", MAX_BALANCE_TOLERANCE, self.balance_tolerance),
            ));
        }
        if self.divergence_factor < 1 {
            return Err(SimulationError::invalid(
                "divergence_factor",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            balance_tolerance: DEFAULT_BALANCE_TOLERANCE,
            divergence_factor: DEFAULT_DIVERGENCE_FACTOR,
        }
    }
}

/// How the borrower's monthly overpayment is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepaymentStrategy {
    /// Scheduled installment only; the overpayment is ignored
    Baseline,
    /// Installment fixed from the original terms, overpayment on top; loan ends early
    ShortenTerm,
    /// Overpayment on top, installment recalculated over the original remaining
    /// schedule after each overpaid month
    ReduceInstallment,
}

impl RepaymentStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepaymentStrategy::Baseline => "baseline",
            RepaymentStrategy::ShortenTerm => "shorten_term",
            RepaymentStrategy::ReduceInstallment => "reduce_installment",
        }
    }
}

impl fmt::Display for RepaymentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main amortization engine
#[derive(Debug, Clone, Default)]
pub struct AmortizationEngine {
    config: SimulationConfig,
}

impl AmortizationEngine {
    /// Create a new engine with a validated config
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run the month-by-month simulation for one strategy
    pub fn simulate(&self, params: &LoanParameters, strategy: RepaymentStrategy) -> Result<SimulationResult> {
        params.validate()?;

        let monthly_rate = params.monthly_rate();
        let installment = compute_installment(params.principal, params.annual_rate, params.term_months)?;
        let overpayment = match strategy {
            RepaymentStrategy::Baseline => 0.0,
            RepaymentStrategy::ShortenTerm | RepaymentStrategy::ReduceInstallment => params.overpayment,
        };

        debug!(
            "simulating {} for principal={:.2} rate={} term={} overpayment={:.2} installment={:.2}",
            strategy, params.principal, params.annual_rate, params.term_months, overpayment, installment
        );

        let max_months = params.term_months.saturating_mul(self.config.divergence_factor);
        let mut result = SimulationResult::new(strategy, installment);
        let mut state = AmortizationState::new(params.principal, installment, params.term_months);

        loop {
            if state.month >= max_months {
                warn!(
                    "{} did not close after {} months, balance {:.2}",
                    strategy, state.month, state.balance
                );
                return Err(SimulationError::NumericDivergence {
                    strategy,
                    months: state.month,
                    balance: state.balance,
                });
            }

            state.advance_month();
            let row = self.calculate_month(&mut state, monthly_rate, overpayment);
            result.add_row(row);

            if state.is_repaid() {
                break;
            }

            // Bank re-amortizes the lower balance over the original remaining schedule
            if strategy == RepaymentStrategy::ReduceInstallment
                && row.overpayment > 0.0
                && state.remaining_months() > 0
            {
                state.installment =
                    compute_installment(state.balance, params.annual_rate, state.remaining_months())?;
            }
        }

        debug!(
            "{} finished in {} months, total interest {:.2}, final installment {:.2}",
            strategy, result.total_months, result.total_interest, result.final_installment
        );

        Ok(result)
    }

    /// Apply one month's payment to the balance
    fn calculate_month(&self, state: &mut AmortizationState, monthly_rate: f64, overpayment: f64) -> MonthRecord {
        let opening_balance = state.balance;
        let interest = opening_balance * monthly_rate;

        let mut principal = (state.installment + overpayment - interest).min(opening_balance);

        // Last scheduled month closes out any rounding residual
        if state.remaining_months() == 0 || opening_balance - principal <= self.config.balance_tolerance {
            principal = opening_balance;
        }

        let payment = interest + principal;
        let overpayment_applied = (payment - state.installment).max(0.0).min(overpayment);

        state.balance = if principal >= opening_balance {
            0.0
        } else {
            opening_balance - principal
        };

        MonthRecord {
            month: state.month,
            opening_balance,
            interest,
            principal,
            overpayment: overpayment_applied,
            closing_balance: state.balance,
            installment: state.installment,
        }
    }
}

/// Simulate the loan with no overpayments
pub fn simulate_baseline(principal: f64, annual_rate: f64, term_months: u32) -> Result<SimulationResult> {
    let params = LoanParameters::new(principal, annual_rate, term_months, 0.0)?;
    AmortizationEngine::default().simulate(&params, RepaymentStrategy::Baseline)
}

/// Simulate a constant installment plus overpayment; the term shortens
pub fn simulate_shorten_term(
    principal: f64,
    annual_rate: f64,
    term_months: u32,
    overpayment: f64,
) -> Result<SimulationResult> {
    let params = LoanParameters::new(principal, annual_rate, term_months, overpayment)?;
    AmortizationEngine::default().simulate(&params, RepaymentStrategy::ShortenTerm)
}

/// Simulate overpayments with the installment recalculated downward each month
pub fn simulate_reduce_installment(
    principal: f64,
    annual_rate: f64,
    term_months: u32,
    overpayment: f64,
) -> Result<SimulationResult> {
    let params = LoanParameters::new(principal, annual_rate, term_months, overpayment)?;
    AmortizationEngine::default().simulate(&params, RepaymentStrategy::ReduceInstallment)
}
