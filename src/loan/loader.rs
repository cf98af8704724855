//! Load batches of loan scenarios from CSV
//!
//! Expected header: `principal,annual_rate,term_months,overpayment`
//! (`overpayment` may be left empty for a baseline-only row).

use csv::{Reader, Trim};
use std::path::Path;

use super::LoanParameters;
use crate::error::Result;

/// Raw CSV row before validation
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    principal: f64,
    annual_rate: f64,
    term_months: u32,
    #[serde(default)]
    overpayment: Option<f64>,
}

impl CsvRow {
    fn into_parameters(self) -> Result<LoanParameters> {
        LoanParameters::new(
            self.principal,
            self.annual_rate,
            self.term_months,
            self.overpayment.unwrap_or(0.0),
        )
    }
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<LoanParameters>> {
    let reader = csv::ReaderBuilder::new().trim(Trim::All).from_path(path)?;
    collect_rows(reader)
}

/// Load scenarios from any reader (e.g., string buffer, request body)
pub fn load_scenarios_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<LoanParameters>> {
    let csv_reader = csv::ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    collect_rows(csv_reader)
}

fn collect_rows<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<LoanParameters>> {
    let mut scenarios = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        scenarios.push(row.into_parameters()?);
    }

    Ok(scenarios)
}
