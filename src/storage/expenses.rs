//! Expense store backed by a headerless CSV file
//!
//! One record per line: `amount,category,date`. Categories containing the
//! delimiter or quotes are quoted by the writer so they survive a round trip.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use tracing::{debug, info};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{parse_date, Expense, Money, DATE_FORMAT};

use super::file_io::{append_to, write_atomic};

const FIELD_COUNT: usize = 3;

/// Durable storage for the ledger
#[derive(Debug, Clone)]
pub struct ExpenseStore {
    path: PathBuf,
}

impl ExpenseStore {
    /// Create a store over the given file; nothing is touched until first use
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load every expense in file order
    ///
    /// A missing file is an empty ledger. The first line that does not parse,
    /// including a blank one, aborts the load with
    /// [`LedgerError::MalformedRecord`]. Amounts with more than two decimals
    /// are rounded to the nearest cent.
    pub fn load(&self) -> LedgerResult<Vec<Expense>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "ledger file missing, starting empty");
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| {
            LedgerError::Storage(format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        // Categories never span lines, so every line must hold a record
        if let Some(blank) = contents.lines().position(|line| line.trim().is_empty()) {
            return Err(LedgerError::malformed(blank as u64 + 1, "empty line"));
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(contents.as_bytes());

        let mut expenses = Vec::new();
        for result in reader.records() {
            let record = result.map_err(csv_read_error)?;
            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(expenses.len() as u64 + 1);
            expenses.push(parse_record(&record, line)?);
        }

        debug!(path = %self.path.display(), count = expenses.len(), "loaded ledger");
        Ok(expenses)
    }

    /// Append one expense, leaving existing lines untouched
    pub fn append(&self, expense: &Expense) -> LedgerResult<()> {
        expense
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        append_to(&self.path, |file| write_records(file, std::iter::once(expense)))?;

        info!(path = %self.path.display(), category = %expense.category, "appended expense");
        Ok(())
    }

    /// Replace the whole file with the given expenses, in order
    pub fn overwrite(&self, expenses: &[Expense]) -> LedgerResult<()> {
        write_atomic(&self.path, |writer| write_records(writer, expenses.iter()))?;

        info!(path = %self.path.display(), count = expenses.len(), "rewrote ledger");
        Ok(())
    }
}

fn write_records<'a, W, I>(out: W, expenses: I) -> LedgerResult<()>
where
    W: Write,
    I: Iterator<Item = &'a Expense>,
{
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out);

    for expense in expenses {
        let date = expense.date.format(DATE_FORMAT).to_string();
        writer
            .write_record([
                expense.amount.to_decimal_string().as_str(),
                expense.category.as_str(),
                date.as_str(),
            ])
            .map_err(|e| LedgerError::Storage(format!("Failed to write record: {}", e)))?;
    }

    writer
        .flush()
        .map_err(|e| LedgerError::Storage(format!("Failed to flush records: {}", e)))
}

fn parse_record(record: &StringRecord, line: u64) -> LedgerResult<Expense> {
    if record.len() != FIELD_COUNT {
        return Err(LedgerError::malformed(
            line,
            format!("expected {} fields, found {}", FIELD_COUNT, record.len()),
        ));
    }

    let amount = Money::parse_rounded(&record[0]).map_err(|_| {
        LedgerError::malformed(line, format!("amount '{}' is not a number", &record[0]))
    })?;
    let date = parse_date(&record[2]).map_err(|e| LedgerError::malformed(line, e.to_string()))?;

    Expense::new(amount, &record[1], date).map_err(|e| LedgerError::malformed(line, e.to_string()))
}

fn csv_read_error(err: csv::Error) -> LedgerError {
    match err.position() {
        Some(pos) => LedgerError::malformed(pos.line(), err.to_string()),
        None => LedgerError::Storage(format!("Failed to read ledger: {}", err)),
    }
}
