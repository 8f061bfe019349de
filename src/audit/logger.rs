//! Audit log file
//!
//! One JSON object per line, appended through the same synced append path as
//! the ledger itself. Reading only ever serves `history`, so it keeps the
//! newest entries and drops the rest while streaming.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use serde_json::Deserializer;

use crate::error::{LedgerError, LedgerResult};
use crate::storage::append_to;

use super::entry::AuditEntry;

/// Appends to and reads back the audit log
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry as a JSON line
    pub fn record(&self, entry: &AuditEntry) -> LedgerResult<()> {
        append_to(&self.log_path, |file| {
            serde_json::to_writer(&mut *file, entry)?;
            file.write_all(b"\n")?;
            Ok(())
        })
    }

    /// The newest `limit` entries, oldest first
    pub fn recent(&self, limit: usize) -> LedgerResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| LedgerError::Io(format!("Failed to open audit log: {}", e)))?;

        let mut newest = VecDeque::with_capacity(limit.min(64));
        for (n, entry) in Deserializer::from_reader(BufReader::new(file))
            .into_iter::<AuditEntry>()
            .enumerate()
        {
            let entry = entry.map_err(|e| {
                LedgerError::Json(format!("Bad audit entry #{}: {}", n + 1, e))
            })?;
            if newest.len() == limit {
                newest.pop_front();
            }
            if limit > 0 {
                newest.push_back(entry);
            }
        }

        Ok(newest.into())
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}
