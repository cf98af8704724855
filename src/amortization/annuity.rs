//! Annuity (equal installment) payment formula

use crate::error::{Result, SimulationError};
use crate::loan::{MAX_TERM_MONTHS, MONTHS_PER_YEAR};

/// Fixed monthly installment that repays `principal` over `remaining_months`
///
/// # Arguments
/// * `principal` - Outstanding amount, must be positive
/// * `annual_rate` - Nominal annual rate as a fraction, must be non-negative
/// * `remaining_months` - Months left on the schedule, at least 1
///
/// # Returns
/// * Installment at full precision; use [`round_currency`] for display only
pub fn compute_installment(principal: f64, annual_rate: f64, remaining_months: u32) -> Result<f64> {
    if !principal.is_finite() || principal <= 0.0 {
        return Err(SimulationError::invalid(
            "principal",
            format!("must be a positive amount, got {}", principal),
        ));
    }
    if !annual_rate.is_finite() || annual_rate < 0.0 {
        return Err(SimulationError::invalid(
            "annual_rate",
            format!("must be a non-negative fraction, got {}", annual_rate),
        ));
    }
    if remaining_months < 1 || remaining_months > MAX_TERM_MONTHS {
        return Err(SimulationError::invalid(
            "remaining_months",
            format!("must be between 1 and {} months, got {}", MAX_TERM_MONTHS, remaining_months),
        ));
    }

    let monthly_rate = annual_rate / MONTHS_PER_YEAR;

    // Last month closes out the balance plus one month of interest
    if remaining_months == 1 {
        return Ok(principal * (1.0 + monthly_rate));
    }

    if monthly_rate == 0.0 {
        return Ok(principal / remaining_months as f64);
    }

    // Discount form stays finite where (1+r)^n would overflow
    let periods = i32::try_from(remaining_months).map_err(|_| {
        SimulationError::invalid("remaining_months", format!("too large: {}", remaining_months))
    })?;
    let discount = (1.0 + monthly_rate).powi(-periods);
    Ok(principal * monthly_rate / (1.0 - discount))
}

/// Round an amount to currency precision (cents)
pub fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
