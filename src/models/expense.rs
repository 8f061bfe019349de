//! Expense model
//!
//! One recorded expense: how much, on what, and when.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use super::month::Month;

/// Date format used for input, storage and display
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Largest amount a single expense may have ($10,000,000,000.00)
///
/// Keeps ledger totals far away from `i64` overflow.
pub const MAX_AMOUNT: Money = Money::from_cents(1_000_000_000_000);

/// A single expense entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Amount spent (never negative)
    pub amount: Money,

    /// Category, matched exactly when grouping
    pub category: String,

    /// Date the money was spent
    pub date: NaiveDate,
}

impl Expense {
    /// Create a validated expense
    pub fn new(
        amount: Money,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Result<Self, ExpenseValidationError> {
        let expense = Self {
            amount,
            category: category.into(),
            date,
        };
        expense.validate()?;
        Ok(expense)
    }

    /// Month this expense is grouped under
    pub fn month(&self) -> Month {
        Month::of(self.date)
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.amount.is_negative() {
            return Err(ExpenseValidationError::NegativeAmount(self.amount));
        }
        if self.amount > MAX_AMOUNT {
            return Err(ExpenseValidationError::AmountTooLarge(self.amount));
        }

        if self.category.is_empty() {
            return Err(ExpenseValidationError::EmptyCategory);
        }

        if self.category.contains(['\n', '\r']) {
            return Err(ExpenseValidationError::MultilineCategory);
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}",
            self.category,
            self.amount,
            self.date.format(DATE_FORMAT)
        )
    }
}

/// Parse a date in YYYY-MM-DD format
pub fn parse_date(s: &str) -> Result<NaiveDate, ExpenseValidationError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| ExpenseValidationError::InvalidDate(s.to_string()))
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NegativeAmount(Money),
    AmountTooLarge(Money),
    EmptyCategory,
    MultilineCategory,
    InvalidDate(String),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount(amount) => {
                write!(f, "Amount cannot be negative: {}", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Amount {} exceeds the maximum of {}", amount, MAX_AMOUNT)
            }
            Self::EmptyCategory => write!(f, "Category cannot be empty"),
            Self::MultilineCategory => write!(f, "Category cannot contain line breaks"),
            Self::InvalidDate(s) => {
                write!(f, "Invalid date '{}'. Use YYYY-MM-DD", s)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
