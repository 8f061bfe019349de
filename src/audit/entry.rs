//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::Expense;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Expense was added
    Create,
    /// Expense was removed
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    /// 1-based position of the expense in the ledger at the time
    pub position: usize,

    /// The expense that was added or removed
    pub expense: Expense,
}

impl AuditEntry {
    pub fn create(position: usize, expense: &Expense) -> Self {
        Self::new(Operation::Create, position, expense)
    }

    pub fn delete(position: usize, expense: &Expense) -> Self {
        Self::new(Operation::Delete, position, expense)
    }

    fn new(operation: Operation, position: usize, expense: &Expense) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            position,
            expense: expense.clone(),
        }
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:<6} #{} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.operation,
            self.position,
            self.expense
        )
    }
}
