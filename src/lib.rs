//! Expense Ledger - terminal-based personal expense tracking
//!
//! This library provides the core functionality for the `expense` command
//! line tool. Expenses are kept in a flat CSV file, one record per line, and
//! summarized by category, overall or by month.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, expenses, months)
//! - `storage`: CSV file storage layer
//! - `reports`: Grouping and report generation
//! - `display`: Terminal formatting and charts
//! - `services`: Business logic layer
//! - `audit`: Audit logging of additions and deletions
//! - `cli`: Command handlers and the interactive menu
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_ledger::config::{LedgerPaths, Settings};
//! use expense_ledger::services::{ExpenseService, SummaryKind};
//! use expense_ledger::storage::Storage;
//!
//! let paths = LedgerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::from_config(&paths, &settings, None);
//! let summary = ExpenseService::new(&storage).summary(SummaryKind::Monthly)?;
//! ```

use std::sync::Once;

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::LedgerError;

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber once
///
/// Filtering follows `RUST_LOG` and defaults to `warn` so interactive output
/// stays clean. Events go to stderr.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}
