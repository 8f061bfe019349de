//! Core data models for the expense ledger

pub mod expense;
pub mod money;
pub mod month;

pub use expense::{parse_date, Expense, ExpenseValidationError, DATE_FORMAT, MAX_AMOUNT};
pub use money::{Money, MoneyParseError};
pub use month::Month;
