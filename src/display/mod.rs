//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses, report lines and charts for
//! terminal display.

pub mod chart;
pub mod expense;
pub mod report;

pub use chart::{BarSeries, ChartRenderer, TerminalBarChart};
pub use expense::format_expense_list;
