//! Bar chart rendering
//!
//! Reports hand a [`BarSeries`] to a [`ChartRenderer`]; the renderer decides
//! how to draw it. The terminal renderer draws one horizontal bar per label.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Money;

use super::report::{format_bar, separator, truncate};

const LABEL_WIDTH: usize = 12;

/// Labelled values plus the fixed strings of a bar chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarSeries {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Bars in display order
    pub bars: Vec<(String, Money)>,
}

/// Something that can display a bar chart
pub trait ChartRenderer {
    fn render(&mut self, series: &BarSeries) -> LedgerResult<()>;
}

/// Draws bar charts with block characters
pub struct TerminalBarChart<W: Write> {
    out: W,
    width: usize,
    currency_symbol: String,
}

impl<W: Write> TerminalBarChart<W> {
    pub fn new(out: W, width: usize, currency_symbol: impl Into<String>) -> Self {
        Self {
            out,
            width: width.max(1),
            currency_symbol: currency_symbol.into(),
        }
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ChartRenderer for TerminalBarChart<W> {
    fn render(&mut self, series: &BarSeries) -> LedgerResult<()> {
        let max = series
            .bars
            .iter()
            .map(|(_, total)| total.as_f64())
            .fold(0.0, f64::max);

        let mut text = String::new();
        text.push('\n');
        text.push_str(&series.title);
        text.push('\n');
        text.push_str(&separator(LABEL_WIDTH + self.width + 16));
        text.push('\n');
        text.push_str(&format!(
            "{:<label$} {}\n",
            series.x_label,
            series.y_label,
            label = LABEL_WIDTH
        ));

        for (label, total) in &series.bars {
            text.push_str(&format!(
                "{:<label$} {} {}\n",
                truncate(label, LABEL_WIDTH),
                format_bar(total.as_f64(), max, self.width),
                total.format_with_symbol(&self.currency_symbol),
                label = LABEL_WIDTH
            ));
        }

        self.out
            .write_all(text.as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(|e| LedgerError::Chart(format!("Failed to draw chart: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> BarSeries {
        BarSeries {
            title: "Monthly Spending Summary".into(),
            x_label: "Month".into(),
            y_label: "Total Spending ($)".into(),
            bars: vec![
                ("2024-03".into(), Money::from_cents(5250)),
                ("2024-04".into(), Money::from_cents(999)),
            ],
        }
    }

    #[test]
    fn test_terminal_chart_layout() {
        let mut chart = TerminalBarChart::new(Vec::new(), 10, "$");
        chart.render(&series()).unwrap();
        let text = String::from_utf8(chart.into_inner()).unwrap();

        assert!(text.contains("Monthly Spending Summary"));
        assert!(text.contains("Month"));
        assert!(text.contains("Total Spending ($)"));

        let rows: Vec<&str> = text.lines().filter(|l| l.starts_with("2024-")).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("2024-03"));
        assert!(rows[0].contains("██████████ $52.50"));
        assert!(rows[1].starts_with("2024-04"));
        assert!(rows[1].ends_with("$9.99"));
    }

    #[test]
    fn test_terminal_chart_all_zero() {
        let mut chart = TerminalBarChart::new(Vec::new(), 5, "$");
        let mut zero = series();
        zero.bars = vec![("2024-01".into(), Money::zero())];
        chart.render(&zero).unwrap();

        let text = String::from_utf8(chart.into_inner()).unwrap();
        assert!(text.contains("2024-01"));
        assert!(!text.contains('█'));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_render_failure_is_reported() {
        let mut chart = TerminalBarChart::new(BrokenPipe, 5, "$");
        assert!(matches!(
            chart.render(&series()),
            Err(LedgerError::Chart(_))
        ));
    }
}
