//! Reports module for the expense ledger
//!
//! `summary` holds the pure grouping functions; the report types wrap them
//! with terminal formatting and CSV export.

pub mod category;
pub mod monthly;
pub mod summary;
pub mod total;

pub use category::{CategoryReport, CategoryRow};
pub use monthly::{MonthRow, MonthlyReport, CHART_TITLE, CHART_X_LABEL, CHART_Y_LABEL};
pub use summary::{by_category, by_month, total, GroupTotal, OrderedTotals};
pub use total::TotalReport;
