//! Spending by category report

use std::io::Write;

use crate::display::report::format_percentage;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, Money};

use super::summary::{by_category, percentage, total};

/// One category line
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRow {
    pub category: String,
    pub total: Money,
    pub expense_count: usize,
    /// Share of overall spending
    pub percentage: f64,
}

/// Spending grouped by category, in first-seen order
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryReport {
    pub rows: Vec<CategoryRow>,
    pub total: Money,
}

impl CategoryReport {
    pub fn generate(expenses: &[Expense]) -> Self {
        let overall = total(expenses);
        let rows = by_category(expenses)
            .iter()
            .map(|group| CategoryRow {
                category: group.key.clone(),
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
        let mut output = String::from("\nTotal spending by category:\n");

        for row in &self.rows {
            output.push_str(&format!(
                "{}: {} ({} {}, {})\n",
                row.category,
                row.total.format_with_symbol(currency_symbol),
                row.expense_count,
                if row.expense_count == 1 { "expense" } else { "expenses" },
                format_percentage(row.percentage)
            ));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> LedgerResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| LedgerError::Export(e.to_string());

        csv.write_record(["Category", "Amount", "Count", "Percentage"])
            .map_err(export_err)?;

        for row in &self.rows {
            csv.write_record([
                row.category.clone(),
                row.total.to_decimal_string(),
                row.expense_count.to_string(),
                format!("{:.2}", row.percentage),
            ])
            .map_err(export_err)?;
        }

        csv.write_record([
            "TOTAL".to_string(),
            self.total.to_decimal_string(),
            self.rows.iter().map(|r| r.expense_count).sum::<usize>().to_string(),
            "100.00".to_string(),
        ])
        .map_err(export_err)?;

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
    fn test_generate() {
        let report = CategoryReport::generate(&sample());

        assert_eq!(report.total, Money::from_cents(6249));
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].category, "Food");
        assert_eq!(report.rows[0].total, Money::from_cents(2249));
        assert_eq!(report.rows[0].expense_count, 2);
        assert_eq!(report.rows[1].category, "Transport");
        assert_eq!(report.rows[1].total, Money::from_cents(4000));
    }

    #[test]
    fn test_format_terminal() {
        let output = CategoryReport::generate(&sample()).format_terminal("$");

        assert!(output.contains("Total spending by category:"));
        assert!(output.contains("Food: $22.49 (2 expenses, 36%)"));
        assert!(output.contains("Transport: $40.00 (1 expense, 64%)"));
        assert!(output.find("Food").unwrap() < output.find("Transport").unwrap());
    }

    #[test]
    fn test_export_csv() {
        let mut out = Vec::new();
        CategoryReport::generate(&sample()).export_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Category,Amount,Count,Percentage");
        assert_eq!(lines[1], "Food,22.49,2,35.99");
        assert_eq!(lines[2], "Transport,40.00,1,64.01");
        assert_eq!(lines[3], "TOTAL,62.49,3,100.00");
    }
}
