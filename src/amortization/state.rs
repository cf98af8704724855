//! Running state of a loan during simulation

/// State of the loan at a point in time during simulation
#[derive(Debug, Clone)]
pub struct AmortizationState {
    /// Current month (1-indexed once the first month is advanced)
    pub month: u32,

    /// Original schedule length in months
    pub term_months: u32,

    /// Outstanding balance
    pub balance: f64,

    /// Bank-required installment currently in force (excludes overpayment)
    pub installment: f64,
}

impl AmortizationState {
    /// Initialize state at loan origination
    pub fn new(principal: f64, installment: f64, term_months: u32) -> Self {
        Self {
            month: 0,
            term_months,
            balance: principal,
            installment,
        }
    }

    /// Advance to next month
    pub fn advance_month(&mut self) {
        self.month += 1;
    }

    /// Months left on the original schedule after the current month
    pub fn remaining_months(&self) -> u32 {
        self.term_months.saturating_sub(self.month)
    }

    /// Whether the balance has been closed out
    pub fn is_repaid(&self) -> bool {
        self.balance <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_months_follows_original_schedule() {
        let mut state = AmortizationState::new(1000.0, 100.0, 12);
        assert_eq!(state.remaining_months(), 12);

        state.advance_month();
        assert_eq!(state.month, 1);
        assert_eq!(state.remaining_months(), 11);

        for _ in 0..20 {
            state.advance_month();
        }
        assert_eq!(state.remaining_months(), 0);
    }

    #[test]
    fn test_is_repaid() {
        let mut state = AmortizationState::new(1000.0, 100.0, 12);
        assert!(!state.is_repaid());
        state.balance = 0.0;
        assert!(state.is_repaid());
    }
}
