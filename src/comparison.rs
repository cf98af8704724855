//! Comparative metrics between simulation results
//!
//! Produces the figures shown side by side for the two overpayment strategies:
//! - months and interest saved against the baseline
//! - installment reduction
//! - totals for the summary table and padded series for charts

use serde::{Deserialize, Serialize};

use crate::amortization::{AmortizationEngine, RepaymentStrategy, SimulationResult};
use crate::error::Result;
use crate::loan::LoanParameters;

/// Difference between a reference result and a compared result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Reference months minus compared months
    pub months_saved: i64,

    /// Reference interest minus compared interest
    pub interest_saved: f64,

    /// Reference initial installment minus compared final installment
    pub installment_delta: f64,

    /// Reference total paid minus compared total paid
    pub total_paid_delta: f64,

    /// Compared overpayments minus reference overpayments
    pub overpayment_delta: f64,
}

impl ComparisonResult {
    /// Months saved split into (years, months); negative savings report as zero
    pub fn time_saved(&self) -> (u32, u32) {
        let months = self.months_saved.max(0) as u32;
        (months / 12, months % 12)
    }
}

/// Compare a strategy result against a reference (usually the baseline)
pub fn compare(reference: &SimulationResult, compared: &SimulationResult) -> ComparisonResult {
    ComparisonResult {
        months_saved: i64::from(reference.total_months) - i64::from(compared.total_months),
        interest_saved: reference.total_interest - compared.total_interest,
        installment_delta: reference.initial_installment - compared.final_installment,
        total_paid_delta: reference.total_paid - compared.total_paid,
        overpayment_delta: compared.total_overpayment - reference.total_overpayment,
    }
}

/// One column of the summary table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategySummary {
    pub strategy: RepaymentStrategy,

    /// What the borrower pays per month under this strategy
    pub monthly_payment: f64,

    pub total_months: u32,
    pub total_interest: f64,
    pub interest_saved: f64,
    pub total_overpayment: f64,
    pub total_paid: f64,
}

/// Everything the presentation layer needs for one set of loan parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub params: LoanParameters,
    pub baseline: SimulationResult,
    pub shorten_term: SimulationResult,
    pub reduce_installment: SimulationResult,

    pub shorten_vs_baseline: ComparisonResult,
    pub reduce_vs_baseline: ComparisonResult,

    /// Reduce-installment as reference, shorten-term as compared
    pub shorten_vs_reduce: ComparisonResult,
}

impl ComparisonReport {
    /// Run the baseline and both strategies and derive every comparison
    pub fn build(engine: &AmortizationEngine, params: &LoanParameters) -> Result<Self> {
        let baseline = engine.simulate(params, RepaymentStrategy::Baseline)?;
        let shorten_term = engine.simulate(params, RepaymentStrategy::ShortenTerm)?;
        let reduce_installment = engine.simulate(params, RepaymentStrategy::ReduceInstallment)?;

        Ok(Self::from_results(*params, baseline, shorten_term, reduce_installment))
    }

    /// Assemble a report from already simulated results
    pub fn from_results(
        params: LoanParameters,
        baseline: SimulationResult,
        shorten_term: SimulationResult,
        reduce_installment: SimulationResult,
    ) -> Self {
        let shorten_vs_baseline = compare(&baseline, &shorten_term);
        let reduce_vs_baseline = compare(&baseline, &reduce_installment);
        let shorten_vs_reduce = compare(&reduce_installment, &shorten_term);

        Self {
            params,
            baseline,
            shorten_term,
            reduce_installment,
            shorten_vs_baseline,
            reduce_vs_baseline,
            shorten_vs_reduce,
        }
    }

    /// Summary table columns: baseline, shorten-term, reduce-installment
    pub fn summaries(&self) -> [StrategySummary; 3] {
        let installment = self.baseline.initial_installment;
        [
            self.summary(&self.baseline, installment, 0.0),
            self.summary(
                &self.shorten_term,
                installment + self.params.overpayment,
                self.shorten_vs_baseline.interest_saved,
            ),
            self.summary(
                &self.reduce_installment,
                self.reduce_installment.final_installment,
                self.reduce_vs_baseline.interest_saved,
            ),
        ]
    }

    fn summary(&self, result: &SimulationResult, monthly_payment: f64, interest_saved: f64) -> StrategySummary {
        StrategySummary {
            strategy: result.strategy,
            monthly_payment,
            total_months: result.total_months,
            total_interest: result.total_interest,
            interest_saved,
            total_overpayment: result.total_overpayment,
            total_paid: result.total_paid,
        }
    }

    /// Longest schedule among the two strategies; chart series share this length
    pub fn chart_months(&self) -> usize {
        self.shorten_term
            .schedule
            .len()
            .max(self.reduce_installment.schedule.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::{simulate_baseline, simulate_reduce_installment, simulate_shorten_term};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn report(overpayment: f64) -> ComparisonReport {
        let params = LoanParameters::new(300_000.0, 0.07, 360, overpayment).unwrap();
        ComparisonReport::build(&AmortizationEngine::default(), &params).unwrap()
    }

    #[test]
    fn test_shorten_term_comparison() {
        let baseline = simulate_baseline(300_000.0, 0.07, 360).unwrap();
        let shorten = simulate_shorten_term(300_000.0, 0.07, 360, 500.0).unwrap();
        let result = compare(&baseline, &shorten);

        assert_eq!(result.months_saved, 152);
        assert_eq!(result.time_saved(), (12, 8));
        assert!(result.interest_saved > 0.0);
        assert_eq!(result.installment_delta, 0.0);
        assert_relative_eq!(result.overpayment_delta, shorten.total_overpayment);
    }

    #[test]
    fn test_reduce_installment_comparison() {
        let baseline = simulate_baseline(300_000.0, 0.07, 360).unwrap();
        let reduce = simulate_reduce_installment(300_000.0, 0.07, 360, 100.0).unwrap();
        let result = compare(&baseline, &reduce);

        assert_eq!(result.months_saved, 0);
        assert_eq!(result.time_saved(), (0, 0));
        assert!(result.interest_saved > 0.0);
        assert!(result.installment_delta > 0.0);
        assert_abs_diff_eq!(result.installment_delta, 1995.91 - 1225.48, epsilon = 0.02);
    }

    #[test]
    fn test_interest_saved_never_negative() {
        for overpayment in [0.0, 10.0, 250.0, 1500.0] {
            let report = report(overpayment);
            assert!(report.shorten_vs_baseline.interest_saved >= 0.0);
            assert!(report.reduce_vs_baseline.interest_saved >= 0.0);
            assert!(report.shorten_vs_reduce.interest_saved >= 0.0);
            assert!(report.reduce_vs_baseline.installment_delta >= 0.0);
        }
    }

    #[test]
    fn test_zero_overpayment_report_is_neutral() {
        let report = report(0.0);
        for comparison in [report.shorten_vs_baseline, report.reduce_vs_baseline, report.shorten_vs_reduce] {
            assert_eq!(comparison.months_saved, 0);
            assert_eq!(comparison.interest_saved, 0.0);
            assert_eq!(comparison.installment_delta, 0.0);
        }
    }

    #[test]
    fn test_summaries() {
        let report = report(500.0);
        let [baseline, shorten, reduce] = report.summaries();

        assert_eq!(baseline.strategy, RepaymentStrategy::Baseline);
        assert_eq!(baseline.total_months, 360);
        assert_eq!(baseline.interest_saved, 0.0);
        assert_relative_eq!(shorten.monthly_payment, baseline.monthly_payment + 500.0);
        assert_eq!(shorten.total_months, 208);
        assert!(reduce.monthly_payment < baseline.monthly_payment);
        assert!(shorten.interest_saved >= reduce.interest_saved);
        assert_relative_eq!(shorten.total_overpayment, 103_500.0, max_relative = 1e-9);
    }

    #[test]
    fn test_chart_series_share_length() {
        let report = report(500.0);
        let months = report.chart_months();
        assert_eq!(months, 339);

        let shorten_balance = report.shorten_term.balance_series(months);
        let shorten_overpaid = report.shorten_term.cumulative_overpayments(months);
        assert_eq!(shorten_balance.len(), months);
        assert_eq!(shorten_balance[months - 1], 0.0);
        assert_relative_eq!(
            shorten_overpaid[months - 1],
            report.shorten_term.total_overpayment,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_report_serializes() {
        let report = report(100.0);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["shorten_term"]["strategy"], "shorten_term");
        assert_eq!(json["params"]["term_months"], 360);
        assert!(json["baseline"]["schedule"].as_array().unwrap().len() == 360);
    }
}
