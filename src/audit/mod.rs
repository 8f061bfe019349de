//! Audit logging for the expense ledger
//!
//! Records every added and deleted expense in an append-only, line-delimited
//! JSON log (JSONL). Since expenses have no identity beyond their position,
//! the log is the only record of what a deletion removed.

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
