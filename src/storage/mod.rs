//! Storage layer for the expense ledger
//!
//! Flat CSV file storage with atomic rewrites and automatic directory
//! creation, plus the audit trail of mutations.

pub mod expenses;
pub mod file_io;

pub use expenses::ExpenseStore;
pub use file_io::{append_to, write_atomic};

use std::path::PathBuf;

use tracing::warn;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::{LedgerPaths, Settings};
use crate::models::Expense;

/// Storage coordinator: the expense file plus the optional audit log
pub struct Storage {
    pub expenses: ExpenseStore,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// Create storage over an explicit ledger file
    pub fn new(ledger_file: impl Into<PathBuf>, audit_log: Option<PathBuf>) -> Self {
        Self {
            expenses: ExpenseStore::new(ledger_file),
            audit: audit_log.map(AuditLogger::new),
        }
    }

    /// Create storage from resolved paths and settings
    ///
    /// `ledger_override` wins over the settings, which win over the default
    /// location under the data directory.
    pub fn from_config(
        paths: &LedgerPaths,
        settings: &Settings,
        ledger_override: Option<PathBuf>,
    ) -> Self {
        let ledger_file = ledger_override.unwrap_or_else(|| settings.ledger_path(paths));
        let audit_log = settings.audit_enabled.then(|| paths.audit_log());
        Self::new(ledger_file, audit_log)
    }

    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Record an added expense; audit failures are logged, never fatal
    pub fn log_create(&self, position: usize, expense: &Expense) {
        self.write_audit(AuditEntry::create(position, expense));
    }

    /// Record a removed expense; audit failures are logged, never fatal
    pub fn log_delete(&self, position: usize, expense: &Expense) {
        self.write_audit(AuditEntry::delete(position, expense));
    }

    fn write_audit(&self, entry: AuditEntry) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.record(&entry) {
                warn!(error = %e, "failed to write audit entry");
            }
        }
    }
}
