//! Month-by-month schedule output structures

use serde::{Deserialize, Serialize};
use std::io::Write;

use super::engine::RepaymentStrategy;
use crate::error::Result;

/// A single simulated month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthRecord {
    /// Month index (1..N)
    pub month: u32,

    pub opening_balance: f64,
    pub interest: f64,

    /// Principal repaid this month, including the overpayment
    pub principal: f64,

    /// Amount paid above the required installment
    pub overpayment: f64,

    pub closing_balance: f64,

    /// Bank-required installment in force this month
    pub installment: f64,
}

impl MonthRecord {
    /// Total cash paid this month
    pub fn payment(&self) -> f64 {
        self.interest + self.principal
    }
}

/// Complete simulation result for one strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub strategy: RepaymentStrategy,

    /// Monthly schedule rows
    pub schedule: Vec<MonthRecord>,

    /// Months until the balance closed
    pub total_months: u32,

    pub total_interest: f64,
    pub total_overpayment: f64,

    /// Interest plus principal over the whole schedule
    pub total_paid: f64,

    /// Installment computed from the original terms
    pub initial_installment: f64,

    /// Installment in force during the last simulated month
    pub final_installment: f64,
}

impl SimulationResult {
    pub fn new(strategy: RepaymentStrategy, initial_installment: f64) -> Self {
        Self {
            strategy,
            schedule: Vec::new(),
            total_months: 0,
            total_interest: 0.0,
            total_overpayment: 0.0,
            total_paid: 0.0,
            initial_installment,
            final_installment: initial_installment,
        }
    }

    /// Add a month and roll the totals forward
    pub fn add_row(&mut self, row: MonthRecord) {
        self.total_months = row.month;
        self.total_interest += row.interest;
        self.total_overpayment += row.overpayment;
        self.total_paid += row.payment();
        self.final_installment = row.installment;
        self.schedule.push(row);
    }

    /// Sum of principal portions across all months
    pub fn principal_repaid(&self) -> f64 {
        self.schedule.iter().map(|r| r.principal).sum()
    }

    /// Closing balance of the last month (0 when repaid)
    pub fn final_balance(&self) -> f64 {
        self.schedule.last().map(|r| r.closing_balance).unwrap_or(0.0)
    }

    /// Closing balance per month, padded with zeros up to `months`
    pub fn balance_series(&self, months: usize) -> Vec<f64> {
        (0..months)
            .map(|i| self.schedule.get(i).map(|r| r.closing_balance).unwrap_or(0.0))
            .collect()
    }

    /// Running total of overpayments, held flat after the loan closes
    pub fn cumulative_overpayments(&self, months: usize) -> Vec<f64> {
        let mut running = 0.0;
        (0..months)
            .map(|i| {
                if let Some(row) = self.schedule.get(i) {
                    running += row.overpayment;
                }
                running
            })
            .collect()
    }

    /// Write the schedule as CSV, one row per month
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for row in &self.schedule {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
