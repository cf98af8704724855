//! Scenario runner for batch comparisons
//!
//! Holds one engine configuration and runs many independent loan scenarios
//! against it. Each scenario owns its own state, so batches run in parallel.

use log::info;
use rayon::prelude::*;

use crate::amortization::{AmortizationEngine, SimulationConfig};
use crate::comparison::ComparisonReport;
use crate::error::Result;
use crate::loan::LoanParameters;

/// Runner applying a shared engine configuration to many scenarios
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
///
/// // Same loan, several overpayment amounts
/// let reports = runner.run_overpayments(&params, &[100.0, 250.0, 500.0]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: AmortizationEngine,
}

impl ScenarioRunner {
    /// Create runner with the default tolerance and divergence guard
    pub fn new() -> Self {
        Self::default()
    }

    /// Create runner with a specific engine configuration
    pub fn with_config(config: SimulationConfig) -> Result<Self> {
        Ok(Self {
            engine: AmortizationEngine::new(config)?,
        })
    }

    /// Run baseline and both strategies for one loan
    pub fn run(&self, params: &LoanParameters) -> Result<ComparisonReport> {
        ComparisonReport::build(&self.engine, params)
    }

    /// Run many loans in parallel; results keep the input order
    pub fn run_batch(&self, scenarios: &[LoanParameters]) -> Vec<Result<ComparisonReport>> {
        info!("running {} loan scenarios", scenarios.len());
        scenarios.par_iter().map(|params| self.run(params)).collect()
    }

    /// Run the same loan with each overpayment amount
    pub fn run_overpayments(&self, params: &LoanParameters, overpayments: &[f64]) -> Vec<Result<ComparisonReport>> {
        info!("running {} overpayment scenarios", overpayments.len());
        overpayments
            .par_iter()
            .map(|&overpayment| self.run(&params.with_overpayment(overpayment)?))
            .collect()
    }

    pub fn engine(&self) -> &AmortizationEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimulationError;

    #[test]
    fn test_run_batch_preserves_order() {
        let runner = ScenarioRunner::new();
        let scenarios = vec![
            LoanParameters::new(300_000.0, 0.07, 360, 500.0).unwrap(),
            LoanParameters::new(100_000.0, 0.03, 120, 50.0).unwrap(),
            LoanParameters::new(120_000.0, 0.0, 120, 100.0).unwrap(),
        ];

        let reports: Vec<_> = runner
            .run_batch(&scenarios)
            .into_iter()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(reports.len(), 3);
        for (report, params) in reports.iter().zip(&scenarios) {
            assert_eq!(&report.params, params);
        }
        assert_eq!(reports[1].shorten_term.total_months, 114);
    }

    #[test]
    fn test_invalid_scenario_fails_alone() {
        let runner = ScenarioRunner::new();
        let scenarios = vec![
            LoanParameters::new(300_000.0, 0.07, 360, 500.0).unwrap(),
            LoanParameters {
                principal: -1.0,
                annual_rate: 0.07,
                term_months: 360,
                overpayment: 0.0,
            },
        ];

        let results = runner.run_batch(&scenarios);
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(SimulationError::InvalidParameter { field: "principal", .. })
        ));
    }

    #[test]
    fn test_with_config_rejects_negative_tolerance() {
        let config = SimulationConfig {
            balance_tolerance: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            ScenarioRunner::with_config(config),
            Err(SimulationError::InvalidParameter { field: "balance_tolerance", .. })
        ));
    }

    #[test]
    fn test_higher_overpayment_saves_more() {
        let runner = ScenarioRunner::new();
        let params = LoanParameters::new(500_000.0, 0.07, 300, 0.0).unwrap();

        let reports: Vec<_> = runner
            .run_overpayments(&params, &[100.0, 500.0, 1000.0])
            .into_iter()
            .collect::<Result<_>>()
            .unwrap();

        assert!(reports[2].shorten_vs_baseline.interest_saved > reports[0].shorten_vs_baseline.interest_saved);
        assert!(reports[2].shorten_term.total_months < reports[1].shorten_term.total_months);
        assert!(runner.run_overpayments(&params, &[-10.0])[0].is_err());
    }
}
