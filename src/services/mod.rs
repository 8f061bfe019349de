//! Service layer for the expense ledger
//!
//! The service layer provides business logic on top of the storage layer,
//! handling input parsing, validation and the delete flow.

pub mod expense;

pub use expense::{parse_selection, CreateExpenseInput, ExpenseService, Summary, SummaryKind};
