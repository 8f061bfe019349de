//! Expense service
//!
//! Business logic for adding, listing, summarizing and deleting expenses on
//! top of the storage layer.

use chrono::NaiveDate;
use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{parse_date, Expense, Money};
use crate::reports::{CategoryReport, MonthlyReport, TotalReport};
use crate::storage::Storage;

/// Input for adding an expense
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    pub amount: Money,
    pub category: String,
    /// Defaults to today when absent
    pub date: Option<NaiveDate>,
}

impl CreateExpenseInput {
    /// Parse raw user input; an empty or missing date means today
    pub fn parse(amount: &str, category: &str, date: Option<&str>) -> LedgerResult<Self> {
        let amount = Money::parse(amount).map_err(|e| LedgerError::Validation(e.to_string()))?;

        let date = match date.map(str::trim).filter(|d| !d.is_empty()) {
            Some(d) => Some(parse_date(d).map_err(|e| LedgerError::Validation(e.to_string()))?),
            None => None,
        };

        Ok(Self {
            amount,
            category: category.to_string(),
            date,
        })
    }
}

/// Which summary to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryKind {
    Category,
    Total,
    Monthly,
}

/// A generated summary
#[derive(Debug, Clone, PartialEq)]
pub enum Summary {
    Category(CategoryReport),
    Total(TotalReport),
    Monthly(MonthlyReport),
}

impl Summary {
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        match self {
            Summary::Category(report) => report.format_terminal(currency_symbol),
            Summary::Total(report) => report.format_terminal(currency_symbol),
            Summary::Monthly(report) => report.format_terminal(currency_symbol),
        }
    }

    pub fn export_csv<W: std::io::Write>(&self, writer: W) -> LedgerResult<()> {
        match self {
            Summary::Category(report) => report.export_csv(writer),
            Summary::Total(report) => report.export_csv(writer),
            Summary::Monthly(report) => report.export_csv(writer),
        }
    }
}

/// Parse a 1-based selection against a list of `len` items
pub fn parse_selection(input: &str, len: usize) -> LedgerResult<usize> {
    let input = input.trim();
    let index: usize = input
        .parse()
        .map_err(|_| LedgerError::InvalidSelection(format!("'{}' is not a number", input)))?;

    check_position(index, len)
}

fn check_position(position: usize, len: usize) -> LedgerResult<usize> {
    if position == 0 || position > len {
        return Err(LedgerError::InvalidSelection(format!(
            "{} is out of range (1-{})",
            position, len
        )));
    }
    Ok(position)
}

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All expenses in ledger order
    pub fn list(&self) -> LedgerResult<Vec<Expense>> {
        self.storage.expenses.load()
    }

    /// Add an expense to the end of the ledger
    pub fn add(&self, input: CreateExpenseInput) -> LedgerResult<Expense> {
        let date = input
            .date
            .unwrap_or_else(|| chrono::Local::now().date_naive());

        let expense = Expense::new(input.amount, input.category, date)
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        // Loading first refuses to append to a file that no longer parses
        let position = self.storage.expenses.load()?.len() + 1;
        self.storage.expenses.append(&expense)?;
        self.storage.log_create(position, &expense);

        info!(position, category = %expense.category, "added expense");
        Ok(expense)
    }

    /// Build a summary of the whole ledger
    pub fn summary(&self, kind: SummaryKind) -> LedgerResult<Summary> {
        let expenses = self.storage.expenses.load()?;
        if expenses.is_empty() {
            return Err(LedgerError::EmptyLedger("display"));
        }

        Ok(match kind {
            SummaryKind::Category => Summary::Category(CategoryReport::generate(&expenses)),
            SummaryKind::Total => Summary::Total(TotalReport::generate(&expenses)),
            SummaryKind::Monthly => Summary::Monthly(MonthlyReport::generate(&expenses)),
        })
    }

    /// Remove the expense at 1-based `position` and persist the rest
    ///
    /// Out-of-range positions and an empty ledger leave the file untouched.
    pub fn delete(&self, position: usize) -> LedgerResult<Expense> {
        let mut expenses = self.storage.expenses.load()?;
        if expenses.is_empty() {
            return Err(LedgerError::EmptyLedger("delete"));
        }

        let position = check_position(position, expenses.len())?;
        let removed = expenses.remove(position - 1);

        self.storage.expenses.overwrite(&expenses)?;
        self.storage.log_delete(position, &removed);

        info!(position, category = %removed.category, "deleted expense");
        Ok(removed)
    }

    /// Delete using raw user input for the position
    pub fn delete_selection(&self, input: &str) -> LedgerResult<Expense> {
        let len = self.storage.expenses.load()?.len();
        if len == 0 {
            return Err(LedgerError::EmptyLedger("delete"));
        }
        self.delete(parse_selection(input, len)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::models::MAX_AMOUNT;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(
            temp_dir.path().join("expenses.csv"),
            Some(temp_dir.path().join("audit.log")),
        );
        (temp_dir, storage)
    }

    fn add(service: &ExpenseService, amount: &str, category: &str, date: &str) -> Expense {
        service
            .add(CreateExpenseInput::parse(amount, category, Some(date)).unwrap())
            .unwrap()
    }

    fn seed(service: &ExpenseService) {
        add(service, "12.50", "Food", "2024-03-01");
        add(service, "40.00", "Transport", "2024-03-15");
        add(service, "9.99", "Food", "2024-04-02");
    }

    #[test]
    fn test_add_then_list() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        seed(&service);

        let expenses = service.list().unwrap();
        assert_eq!(expenses.len(), 3);
        assert_eq!(expenses[0].category, "Food");
        assert_eq!(expenses[1].amount, Money::from_cents(4000));
        assert_eq!(expenses[2].date.to_string(), "2024-04-02");
    }

    #[test]
    fn test_add_defaults_to_today() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let input = CreateExpenseInput::parse("5", "Coffee", Some("  ")).unwrap();
        assert!(input.date.is_none());

        let expense = service.add(input).unwrap();
        assert_eq!(expense.date, chrono::Local::now().date_naive());
    }

    #[test]
    fn test_add_rejects_bad_input() {
        assert!(CreateExpenseInput::parse("ten", "Food", None)
            .unwrap_err()
            .is_validation());
        assert!(CreateExpenseInput::parse("10", "Food", Some("tomorrow"))
            .unwrap_err()
            .is_validation());

        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let negative = CreateExpenseInput::parse("-3", "Food", None).unwrap();
        assert!(service.add(negative).unwrap_err().is_validation());
        let empty = CreateExpenseInput::parse("3", "", None).unwrap();
        assert!(service.add(empty).unwrap_err().is_validation());
        assert!(!storage.expenses.exists());
    }

    #[test]
    fn test_add_rejects_extra_decimals() {
        let err = CreateExpenseInput::parse("12.345", "Food", None).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("more than two decimal places"));
    }

    #[test]
    fn test_huge_amounts_cannot_break_totals() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        for _ in 0..2 {
            let input = CreateExpenseInput::parse("92233720368547758.07", "Big", Some("2024-01-01"))
                .unwrap();
            assert!(service.add(input).unwrap_err().is_validation());
        }
        assert!(!storage.expenses.exists());

        let largest = MAX_AMOUNT.to_decimal_string();
        add(&service, &largest, "Big", "2024-01-01");
        add(&service, &largest, "Big", "2024-01-02");

        match service.summary(SummaryKind::Total).unwrap() {
            Summary::Total(report) => {
                assert_eq!(report.total.cents(), MAX_AMOUNT.cents() * 2)
            }
            other => panic!("unexpected summary {:?}", other),
        }
    }

    #[test]
    fn test_summaries() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        seed(&service);

        match service.summary(SummaryKind::Category).unwrap() {
            Summary::Category(report) => {
                assert_eq!(report.rows[0].total, Money::from_cents(2249));
                assert_eq!(report.rows[1].total, Money::from_cents(4000));
            }
            other => panic!("unexpected summary {:?}", other),
        }

        match service.summary(SummaryKind::Total).unwrap() {
            Summary::Total(report) => assert_eq!(report.total, Money::from_cents(6249)),
            other => panic!("unexpected summary {:?}", other),
        }

        match service.summary(SummaryKind::Monthly).unwrap() {
            Summary::Monthly(report) => {
                assert_eq!(report.rows[0].month.to_string(), "2024-03");
                assert_eq!(report.rows[0].total, Money::from_cents(5250));
                assert_eq!(report.rows[1].total, Money::from_cents(999));
            }
            other => panic!("unexpected summary {:?}", other),
        }
    }

    #[test]
    fn test_summary_empty_ledger() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let err = service.summary(SummaryKind::Total).unwrap_err();
        assert!(matches!(err, LedgerError::EmptyLedger(_)));
        assert_eq!(err.to_string(), "No expenses to display.");
    }

    #[test]
    fn test_delete_keeps_relative_order() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        seed(&service);
        let before = service.list().unwrap();

        let removed = service.delete(2).unwrap();
        assert_eq!(removed, before[1]);

        let after = service.list().unwrap();
        assert_eq!(after, vec![before[0].clone(), before[2].clone()]);
    }

    #[test]
    fn test_delete_every_position() {
        for i in 1..=3 {
            let (_temp_dir, storage) = create_test_storage();
            let service = ExpenseService::new(&storage);
            seed(&service);
            let mut expected = service.list().unwrap();
            expected.remove(i - 1);

            service.delete(i).unwrap();
            assert_eq!(service.list().unwrap(), expected);
        }
    }

    #[test]
    fn test_invalid_delete_leaves_file_unchanged() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        seed(&service);
        let original = fs::read(storage.expenses.path()).unwrap();

        for input in ["0", "4", "abc", "", "-1", "1.5"] {
            let err = service.delete_selection(input).unwrap_err();
            assert!(
                matches!(err, LedgerError::InvalidSelection(_)),
                "input {:?} gave {:?}",
                input,
                err
            );
        }
        assert!(matches!(
            service.delete(4),
            Err(LedgerError::InvalidSelection(_))
        ));

        assert_eq!(fs::read(storage.expenses.path()).unwrap(), original);
    }

    #[test]
    fn test_delete_empty_ledger() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        assert!(matches!(
            service.delete_selection("1"),
            Err(LedgerError::EmptyLedger("delete"))
        ));
        assert!(!storage.expenses.exists());
    }

    #[test]
    fn test_mutations_are_audited() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        seed(&service);
        service.delete_selection("1").unwrap();

        let entries = storage.audit().unwrap().recent(usize::MAX).unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[2].position, 3);
        assert_eq!(entries[3].operation, Operation::Delete);
        assert_eq!(entries[3].position, 1);
        assert_eq!(entries[3].expense.category, "Food");
    }

    #[test]
    fn test_parse_selection() {
        assert_eq!(parse_selection(" 2 ", 3).unwrap(), 2);
        assert!(parse_selection("0", 3).is_err());
        assert!(parse_selection("3", 2).is_err());
        assert!(parse_selection("two", 3).is_err());
    }
}
