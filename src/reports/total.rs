//! Overall spending report

use std::io::Write;

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, Money, DATE_FORMAT};

use super::summary::total;

/// Grand total across the whole ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalReport {
    pub total: Money,
    pub expense_count: usize,
    /// Earliest and latest expense dates, if any
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

impl TotalReport {
    pub fn generate(expenses: &[Expense]) -> Self {
        let first = expenses.iter().map(|e| e.date).min();
        let last = expenses.iter().map(|e| e.date).max();

        Self {
            total: total(expenses),
            expense_count: expenses.len(),
            date_range: first.zip(last),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = format!(
            "\nTotal overall spending: {}\n",
            self.total.format_with_symbol(currency_symbol)
        );

        if let Some((first, last)) = self.date_range {
            output.push_str(&format!(
                "{} expenses from {} to {}\n",
                self.expense_count,
                first.format(DATE_FORMAT),
                last.format(DATE_FORMAT)
            ));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> LedgerResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| LedgerError::Export(e.to_string());

        let (first, last) = match self.date_range {
            Some((first, last)) => (
                first.format(DATE_FORMAT).to_string(),
                last.format(DATE_FORMAT).to_string(),
            ),
            None => (String::new(), String::new()),
        };

        csv.write_record(["Total", "Count", "First Date", "Last Date"])
            .map_err(export_err)?;
        csv.write_record([
            self.total.to_decimal_string(),
            self.expense_count.to_string(),
            first,
            last,
        ])
        .map_err(export_err)?;

        csv.flush()
            .map_err(|e| LedgerError::Export(e.to_string()))
    }
}
