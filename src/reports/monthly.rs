//! Spending over time report (monthly)

use std::io::Write;

use crate::display::chart::BarSeries;
use crate::display::report::format_percentage;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, Money, Month};

use super::summary::{by_month, percentage, total};

pub const CHART_TITLE: &str = "Monthly Spending Summary";
pub const CHART_X_LABEL: &str = "Month";
pub const CHART_Y_LABEL: &str = "Total Spending ($)";

/// One month line
#[derive(Debug, Clone, PartialEq)]
pub struct MonthRow {
    pub month: Month,
    pub total: Money,
    pub expense_count: usize,
    pub percentage: f64,
}

/// Spending grouped by month, in first-seen order
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyReport {
    pub rows: Vec<MonthRow>,
    pub total: Money,
}

impl MonthlyReport {
    pub fn generate(expenses: &[Expense]) -> Self {
        let overall = total(expenses);
        let rows = by_month(expenses)
            .iter()
            .map(|group| MonthRow {
                month: group.key,
                total: group.total,
                expense_count: group.count,
                percentage: percentage(group.total, overall),
            })
            .collect();

        Self {
            rows,
            total: overall,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::from("\nSpending over time (monthly):\n");

        for row in &self.rows {
            output.push_str(&format!(
                "{}: {} ({} {}, {})\n",
                row.month,
                row.total.format_with_symbol(currency_symbol),
                row.expense_count,
                if row.expense_count == 1 { "expense" } else { "expenses" },
                format_percentage(row.percentage)
            ));
        }

        output
    }

    /// Month totals in first-seen order, ready for a chart renderer
    pub fn chart_series(&self) -> BarSeries {
        BarSeries {
            title: CHART_TITLE.to_string(),
            x_label: CHART_X_LABEL.to_string(),
            y_label: CHART_Y_LABEL.to_string(),
            bars: self
                .rows
                .iter()
                .map(|row| (row.month.to_string(), row.total))
                .collect(),
        }
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> LedgerResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| LedgerError::Export(e.to_string());

        csv.write_record(["Month", "Amount", "Count", "Percentage"])
            .map_err(export_err)?;

        for row in &self.rows {
            csv.write_record([
                row.month.to_string(),
                row.total.to_decimal_string(),
                row.expense_count.to_string(),
                format!("{:.2}", row.percentage),
            ])
            .map_err(export_err)?;
        }

        csv.flush()
            .map_err(|e| LedgerError::Export(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_date;

    fn sample() -> Vec<Expense> {
        [
            (1250, "Food", "2024-03-01"),
            (4000, "Transport", "2024-03-15"),
            (999, "Food", "2024-04-02"),
        ]
        .into_iter()
        .map(|(c, cat, d)| Expense::new(Money::from_cents(c), cat, parse_date(d).unwrap()).unwrap())
        .collect()
    }

    #[test]
    fn test_format_terminal() {
        let output = MonthlyReport::generate(&sample()).format_terminal("$");

        assert!(output.contains("Spending over time (monthly):"));
        assert!(output.contains("2024-03: $52.50 (2 expenses, 84%)"));
        assert!(output.contains("2024-04: $9.99 (1 expense, 16%)"));
    }

    #[test]
    fn test_chart_series() {
        let series = MonthlyReport::generate(&sample()).chart_series();

        assert_eq!(series.title, "Monthly Spending Summary");
        assert_eq!(series.x_label, "Month");
        assert_eq!(series.y_label, "Total Spending ($)");
        assert_eq!(
            series.bars,
            vec![
                ("2024-03".to_string(), Money::from_cents(5250)),
                ("2024-04".to_string(), Money::from_cents(999)),
            ]
        );
    }

    #[test]
    fn test_export_csv() {
        let mut out = Vec::new();
        MonthlyReport::generate(&sample()).export_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text.lines().collect::<Vec<_>>(),
            vec![
                "Month,Amount,Count,Percentage",
                "2024-03,52.50,2,84.01",
                "2024-04,9.99,1,15.99",
            ]
        );
    }
}
