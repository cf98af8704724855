//! Loan parameter record shared by every simulation

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};

/// Months per year, used to derive the monthly rate from the annual one
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Longest accepted schedule (1000 years)
pub const MAX_TERM_MONTHS: u32 = 12_000;

/// Input to a single calculation request
///
/// Construct through [`LoanParameters::new`] or call [`LoanParameters::validate`]
/// after deserializing; the engine validates again before simulating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Amount borrowed, in currency units
    pub principal: f64,

    /// Nominal annual interest rate as a fraction (0.07 = 7%)
    pub annual_rate: f64,

    /// Original schedule length in months
    pub term_months: u32,

    /// Fixed extra amount paid every month on top of the installment
    #[serde(default)]
    pub overpayment: f64,
}

impl LoanParameters {
    /// Create validated loan parameters
    pub fn new(principal: f64, annual_rate: f64, term_months: u32, overpayment: f64) -> Result<Self> {
        let params = Self {
            principal,
            annual_rate,
            term_months,
            overpayment,
        };
        params.validate()?;
        Ok(params)
    }

    /// Reject values outside their domain; nothing is clamped
    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_finite() || self.principal <= 0.0 {
            return Err(SimulationError::invalid(
                "principal",
                format!("must be a positive amount, got {}", self.principal),
            ));
        }
        if !self.annual_rate.is_finite() || self.annual_rate < 0.0 {
            return Err(SimulationError::invalid(
                "annual_rate",
                format!("must be a non-negative fraction, got {}", self.annual_rate),
            ));
        }
        if self.term_months < 1 || self.term_months > MAX_TERM_MONTHS {
            return Err(SimulationError::invalid(
                "term_months",
                format!("must be between 1 and {} months, got {}", MAX_TERM_MONTHS, self.term_months),
            ));
        }
        if !self.overpayment.is_finite() || self.overpayment < 0.0 {
            return Err(SimulationError::invalid(
                "overpayment",
                format!("must be non-negative, got {}", self.overpayment),
            ));
        }
        Ok(())
    }

    /// Monthly interest rate (annual / 12)
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate / MONTHS_PER_YEAR
    }

    /// Same loan without any overpayment
    pub fn without_overpayment(&self) -> Self {
        Self {
            overpayment: 0.0,
            ..*self
        }
    }

    /// Same loan with a different monthly overpayment
    pub fn with_overpayment(&self, overpayment: f64) -> Result<Self> {
        Self::new(self.principal, self.annual_rate, self.term_months, overpayment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_parameters() {
        let params = LoanParameters::new(300_000.0, 0.07, 360, 500.0).unwrap();
        assert_eq!(params.term_months, 360);
        assert!((params.monthly_rate() - 0.07 / 12.0).abs() < 1e-15);
    }

    #[test]
    fn test_rejects_out_of_domain_values() {
        let cases = [
            (0.0, 0.07, 360, 0.0, "principal"),
            (-1.0, 0.07, 360, 0.0, "principal"),
            (f64::NAN, 0.07, 360, 0.0, "principal"),
            (100_000.0, -0.01, 360, 0.0, "annual_rate"),
            (100_000.0, 0.05, 0, 0.0, "term_months"),
            (100_000.0, 0.05, MAX_TERM_MONTHS + 1, 0.0, "term_months"),
            (100_000.0, 0.05, u32::MAX, 0.0, "term_months"),
            (100_000.0, 0.05, 120, -5.0, "overpayment"),
        ];

        for (principal, rate, term, overpayment, expected) in cases {
            match LoanParameters::new(principal, rate, term, overpayment) {
                Err(SimulationError::InvalidParameter { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected InvalidParameter for {}, got {:?}", expected, other),
            }
        }
    }

    #[test]
    fn test_zero_rate_and_zero_overpayment_are_valid() {
        assert!(LoanParameters::new(120_000.0, 0.0, 120, 0.0).is_ok());
    }

    #[test]
    fn test_deserialize_defaults_overpayment() {
        let params: LoanParameters =
            serde_json::from_str(r#"{"principal": 1000.0, "annual_rate": 0.05, "term_months": 12}"#).unwrap();
        assert_eq!(params.overpayment, 0.0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_without_overpayment() {
        let params = LoanParameters::new(300_000.0, 0.07, 360, 500.0).unwrap();
        let baseline = params.without_overpayment();
        assert_eq!(baseline.overpayment, 0.0);
        assert_eq!(baseline.principal, params.principal);
    }
}
