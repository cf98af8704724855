//! Mortgage Overpayment CLI
//!
//! Compares the shorten-term and reduce-installment strategies for one loan

use anyhow::{Context, Result};
use clap::Parser;
use mortgage_overpayment::{
    amortization::round_currency, ComparisonReport, LoanParameters, ScenarioRunner, SimulationConfig,
    SimulationResult, StrategySummary,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "mortgage_overpayment", version, about)]
struct Args {
    /// Loan amount
    #[arg(long, default_value_t = 500_000.0)]
    principal: f64,

    /// Annual interest rate in percent (7.0 = 7%)
    #[arg(long, default_value_t = 7.0)]
    rate: f64,

    /// Loan term in months
    #[arg(long, default_value_t = 300)]
    months: u32,

    /// Fixed monthly overpayment
    #[arg(long, default_value_t = 500.0)]
    overpayment: f64,

    /// Residual balance treated as repaid
    #[arg(long, default_value_t = mortgage_overpayment::amortization::DEFAULT_BALANCE_TOLERANCE)]
    tolerance: f64,

    /// Print the full report as JSON instead of the summary table
    #[arg(long)]
    json: bool,

    /// Write the three schedules as CSV files with this path prefix
    #[arg(long, value_name = "PREFIX")]
    schedule_csv: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let params = LoanParameters::new(args.principal, args.rate / 100.0, args.months, args.overpayment)
        .context("invalid loan parameters")?;

    let runner = ScenarioRunner::with_config(SimulationConfig {
        balance_tolerance: args.tolerance,
        ..Default::default()
    })
    .context("invalid simulation settings")?;
    let report = runner.run(&params).context("simulation failed")?;

    if let Some(prefix) = &args.schedule_csv {
        for result in [&report.baseline, &report.shorten_term, &report.reduce_installment] {
            let path = schedule_path(prefix, result);
            write_schedule(&path, result)?;
            println!("Schedule written to: {}", path.display());
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

fn schedule_path(prefix: &Path, result: &SimulationResult) -> PathBuf {
    let mut name = prefix.as_os_str().to_owned();
    name.push(format!("_{}.csv", result.strategy));
    PathBuf::from(name)
}

fn write_schedule(path: &Path, result: &SimulationResult) -> Result<()> {
    let file = File::create(path).with_context(|| format!("unable to create {}", path.display()))?;
    result
        .write_csv(BufWriter::new(file))
        .with_context(|| format!("unable to write {}", path.display()))?;
    Ok(())
}

fn print_report(report: &ComparisonReport) {
    let params = &report.params;
    println!("Mortgage Overpayment Comparison");
    println!("===============================\n");
    println!("Loan: {:.2} at {:.3}% over {} months, overpayment {:.2}/month",
        params.principal, params.annual_rate * 100.0, params.term_months, params.overpayment);
    println!("Base installment: {:.2}\n", round_currency(report.baseline.initial_installment));

    let (years, months) = report.shorten_vs_baseline.time_saved();
    println!("Strategy A: shorten term");
    println!("  Time saved:        {} years {} months", years, months);
    println!("  Interest saved:    {:.0}", report.shorten_vs_baseline.interest_saved);
    println!("  Monthly payment:   {:.2}", report.baseline.initial_installment + params.overpayment);
    println!("  Months:            {}\n", report.shorten_term.total_months);

    println!("Strategy B: reduce installment");
    println!("  Final installment: {:.2}", report.reduce_installment.final_installment);
    println!("  Installment drop:  {:.2}", report.reduce_vs_baseline.installment_delta);
    println!("  Interest saved:    {:.0}", report.reduce_vs_baseline.interest_saved);
    println!("  Months:            {}\n", report.reduce_installment.total_months);

    println!("{:<22} {:>16} {:>16} {:>16}", "Metric", "Baseline", "Strategy A", "Strategy B");
    println!("{}", "-".repeat(73));

    let summaries = report.summaries();
    print_row("Monthly payment", &summaries, |s| format!("{:.2}", s.monthly_payment));
    print_row("Term (months)", &summaries, |s| s.total_months.to_string());
    print_row("Total interest", &summaries, |s| format!("{:.2}", s.total_interest));
    print_row("Interest saved", &summaries, |s| format!("{:.2}", s.interest_saved));
    print_row("Total overpayment", &summaries, |s| format!("{:.2}", s.total_overpayment));
    print_row("Total paid", &summaries, |s| format!("{:.2}", s.total_paid));
}

fn print_row(label: &str, summaries: &[StrategySummary; 3], cell: impl Fn(&StrategySummary) -> String) {
    println!("{:<22} {:>16} {:>16} {:>16}", label, cell(&summaries[0]), cell(&summaries[1]), cell(&summaries[2]));
}
