//! Run the strategy comparison for every loan in a CSV file
//!
//! Input columns: principal,annual_rate,term_months,overpayment
//! Outputs one summary row per loan; failed simulations are logged and skipped

use anyhow::{Context, Result};
use clap::Parser;
use log::warn;
use mortgage_overpayment::loan::load_scenarios;
use mortgage_overpayment::ScenarioRunner;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "run_batch", about = "Compare overpayment strategies for a batch of loans")]
struct Args {
    /// CSV file with one loan per row
    input: PathBuf,

    /// Summary CSV to write
    #[arg(short, long, default_value = "batch_summary.csv")]
    output: PathBuf,
}

/// One output row per loan
#[derive(Debug, Serialize)]
struct SummaryRow {
    row: usize,
    principal: f64,
    annual_rate: f64,
    term_months: u32,
    overpayment: f64,
    installment: f64,
    baseline_interest: f64,
    shorten_months: u32,
    shorten_interest: f64,
    shorten_interest_saved: f64,
    reduce_months: u32,
    reduce_interest: f64,
    reduce_interest_saved: f64,
    reduce_final_installment: f64,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let start = Instant::now();

    let scenarios = load_scenarios(&args.input)
        .with_context(|| format!("failed to load scenarios from {}", args.input.display()))?;
    println!("Loaded {} loans in {:?}", scenarios.len(), start.elapsed());

    let runner = ScenarioRunner::new();
    let results = runner.run_batch(&scenarios);

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("unable to create {}", args.output.display()))?;
    let mut failed = 0;

    for (index, result) in results.into_iter().enumerate() {
        let report = match result {
            Ok(report) => report,
            Err(e) => {
                warn!("loan {} skipped: {}", index + 1, e);
                failed += 1;
                continue;
            }
        };

        writer.serialize(SummaryRow {
            row: index + 1,
            principal: report.params.principal,
            annual_rate: report.params.annual_rate,
            term_months: report.params.term_months,
            overpayment: report.params.overpayment,
            installment: report.baseline.initial_installment,
            baseline_interest: report.baseline.total_interest,
            shorten_months: report.shorten_term.total_months,
            shorten_interest: report.shorten_term.total_interest,
            shorten_interest_saved: report.shorten_vs_baseline.interest_saved,
            reduce_months: report.reduce_installment.total_months,
            reduce_interest: report.reduce_installment.total_interest,
            reduce_interest_saved: report.reduce_vs_baseline.interest_saved,
            reduce_final_installment: report.reduce_installment.final_installment,
        })?;
    }
    writer.flush()?;

    println!("Output written to {}", args.output.display());
    if failed > 0 {
        println!("{} loans failed, see log for details", failed);
    }
    println!("Total time: {:?}", start.elapsed());

    Ok(())
}
