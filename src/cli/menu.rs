//! Interactive menu
//!
//! A numbered read-eval loop over any `BufRead`/`Write` pair. Bad input and
//! failed operations are reported and the menu is shown again; end of input
//! leaves the loop.

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::config::Settings;
use crate::display::format_expense_list;
use crate::error::{LedgerError, LedgerResult};
use crate::services::{CreateExpenseInput, ExpenseService, SummaryKind};

use super::commands::print_summary;

const MAIN_MENU: &str = "\nExpense Ledger\n\
    1. Add expense\n\
    2. View summary\n\
    3. Delete expense\n\
    4. Exit\n";

const SUMMARY_MENU: &str = "\nSummary options\n\
    1. By category\n\
    2. Overall total\n\
    3. Monthly\n";

enum Step {
    Continue,
    Quit,
}

/// Run the menu until the user exits or input ends
pub fn run_menu<R: BufRead, W: Write>(
    service: &ExpenseService,
    settings: &Settings,
    input: &mut R,
    out: &mut W,
) -> LedgerResult<()> {
    loop {
        write!(out, "{}", MAIN_MENU)?;
        let Some(choice) = prompt(input, out, "Choose an option (1-4): ")? else {
            writeln!(out)?;
            break;
        };
        debug!(choice = %choice.trim(), "menu choice");

        let result = match choice.trim() {
            "1" => add_expense(service, settings, input, out),
            "2" => view_summary(service, settings, input, out),
            "3" => delete_expense(service, settings, input, out),
            "4" => {
                writeln!(out, "Goodbye!")?;
                break;
            }
            other => Err(LedgerError::InvalidSelection(format!(
                "'{}' is not a menu option",
                other
            ))),
        };

        match result {
            Ok(Step::Continue) => {}
            Ok(Step::Quit) => {
                writeln!(out)?;
                break;
            }
            Err(e) => {
                if !e.is_recoverable() {
                    warn!(error = %e, "menu operation failed");
                }
                writeln!(out, "Error: {}", e)?;
            }
        }
    }

    Ok(())
}

fn add_expense<R: BufRead, W: Write>(
    service: &ExpenseService,
    settings: &Settings,
    input: &mut R,
    out: &mut W,
) -> LedgerResult<Step> {
    let Some(amount) = prompt(input, out, "Amount: ")? else {
        return Ok(Step::Quit);
    };
    let Some(category) = prompt(input, out, "Category: ")? else {
        return Ok(Step::Quit);
    };
    let Some(date) = prompt(input, out, "Date (YYYY-MM-DD, empty for today): ")? else {
        return Ok(Step::Quit);
    };

    let expense = service.add(CreateExpenseInput::parse(
        &amount,
        &category,
        Some(date.as_str()),
    )?)?;

    writeln!(
        out,
        "Added {} {} on {}",
        expense.category,
        expense.amount.format_with_symbol(&settings.currency_symbol),
        expense.date
    )?;
    Ok(Step::Continue)
}

fn view_summary<R: BufRead, W: Write>(
    service: &ExpenseService,
    settings: &Settings,
    input: &mut R,
    out: &mut W,
) -> LedgerResult<Step> {
    if service.list()?.is_empty() {
        return Err(LedgerError::EmptyLedger("display"));
    }

    write!(out, "{}", SUMMARY_MENU)?;
    let Some(choice) = prompt(input, out, "Choose a summary (1-3): ")? else {
        return Ok(Step::Quit);
    };

    let kind = match choice.trim() {
        "1" => SummaryKind::Category,
        "2" => SummaryKind::Total,
        "3" => SummaryKind::Monthly,
        other => {
            return Err(LedgerError::InvalidSelection(format!(
                "'{}' is not a summary option",
                other
            )))
        }
    };

    let summary = service.summary(kind)?;
    print_summary(out, &summary, settings, true)?;
    Ok(Step::Continue)
}

fn delete_expense<R: BufRead, W: Write>(
    service: &ExpenseService,
    settings: &Settings,
    input: &mut R,
    out: &mut W,
) -> LedgerResult<Step> {
    let expenses = service.list()?;
    if expenses.is_empty() {
        return Err(LedgerError::EmptyLedger("delete"));
    }

    write!(
        out,
        "{}",
        format_expense_list(&expenses, &settings.currency_symbol)
    )?;
    let Some(selection) = prompt(input, out, "Number of the expense to delete: ")? else {
        return Ok(Step::Quit);
    };

    let removed = service.delete_selection(&selection)?;
    writeln!(out, "Deleted: {}", removed)?;
    Ok(Step::Continue)
}

/// Show `text` and read one line without its line ending; `None` on end of input
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, text: &str) -> LedgerResult<Option<String>> {
    write!(out, "{}", text)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}
