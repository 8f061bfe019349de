//! CLI command handlers
//!
//! Bridges the clap argument parsing with the expense service. Output goes to
//! a caller-supplied writer.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use crate::config::{LedgerPaths, Settings};
use crate::display::{format_expense_list, ChartRenderer, TerminalBarChart};
use crate::error::{LedgerError, LedgerResult};
use crate::services::{CreateExpenseInput, ExpenseService, Summary, SummaryKind};
use crate::storage::Storage;

use super::menu::run_menu;

/// Top-level subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive menu (the default)
    Menu,

    /// Add an expense
    Add {
        /// Amount, e.g. 12.50
        amount: String,
        /// Category name
        category: String,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List all expenses with their numbers
    #[command(alias = "ls")]
    List,

    /// Delete an expense by its number in `list`
    #[command(alias = "rm")]
    Delete {
        /// 1-based expense number
        index: String,
    },

    /// Show a spending summary
    Summary {
        /// Which summary to show
        #[arg(value_enum)]
        kind: SummaryArg,

        /// Skip the bar chart of the monthly summary
        #[arg(long)]
        no_chart: bool,

        /// Export the summary to a CSV file instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show resolved paths and settings
    Config,

    /// Show recent additions and deletions
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

/// Summary selector on the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SummaryArg {
    Category,
    Total,
    Monthly,
}

impl From<SummaryArg> for SummaryKind {
    fn from(arg: SummaryArg) -> Self {
        match arg {
            SummaryArg::Category => SummaryKind::Category,
            SummaryArg::Total => SummaryKind::Total,
            SummaryArg::Monthly => SummaryKind::Monthly,
        }
    }
}

/// Handle a top-level command
pub fn handle_command<W: Write>(
    storage: &Storage,
    paths: &LedgerPaths,
    settings: &Settings,
    cmd: Commands,
    out: &mut W,
) -> LedgerResult<()> {
    let service = ExpenseService::new(storage);

    match cmd {
        Commands::Menu => {
            let stdin = io::stdin();
            run_menu(&service, settings, &mut stdin.lock(), out)?;
        }

        Commands::Add {
            amount,
            category,
            date,
        } => {
            let input = CreateExpenseInput::parse(&amount, &category, date.as_deref())?;
            let expense = service.add(input)?;
            writeln!(out, "Added expense:")?;
            writeln!(
                out,
                "  {} {} on {}",
                expense.category,
                expense.amount.format_with_symbol(&settings.currency_symbol),
                expense.date
            )?;
        }

        Commands::List => {
            let expenses = service.list()?;
            write!(
                out,
                "{}",
                format_expense_list(&expenses, &settings.currency_symbol)
            )?;
        }

        Commands::Delete { index } => {
            let removed = service.delete_selection(&index)?;
            writeln!(out, "Deleted expense #{}: {}", index.trim(), removed)?;
        }

        Commands::Summary {
            kind,
            no_chart,
            output,
        } => {
            let summary = service.summary(kind.into())?;

            if let Some(path) = output {
                let file = File::create(&path).map_err(|e| {
                    LedgerError::Export(format!("Failed to create {}: {}", path.display(), e))
                })?;
                summary.export_csv(BufWriter::new(file))?;
                writeln!(out, "Summary exported to: {}", path.display())?;
            } else {
                print_summary(out, &summary, settings, !no_chart)?;
            }
        }

        Commands::Config => {
            writeln!(out, "Expense Ledger Configuration")?;
            writeln!(out, "============================")?;
            writeln!(out, "Base directory: {}", paths.base_dir().display())?;
            writeln!(out, "Settings file:  {}", paths.settings_file().display())?;
            writeln!(out, "Ledger file:    {}", storage.expenses.path().display())?;
            match storage.audit() {
                Some(audit) => writeln!(out, "Audit log:      {}", audit.path().display())?,
                None => writeln!(out, "Audit log:      (disabled)")?,
            }
            writeln!(out)?;
            writeln!(out, "Settings:")?;
            writeln!(out, "  Currency symbol: {}", settings.currency_symbol)?;
            writeln!(out, "  Chart width:     {}", settings.chart_width)?;
            writeln!(out, "  Audit enabled:   {}", settings.audit_enabled)?;
        }

        Commands::History { limit } => {
            let Some(audit) = storage.audit() else {
                writeln!(out, "Audit logging is disabled.")?;
                return Ok(());
            };

            let entries = audit.recent(limit)?;
            if entries.is_empty() {
                writeln!(out, "No history recorded.")?;
            }
            for entry in entries {
                writeln!(out, "{}", entry)?;
            }
        }
    }

    Ok(())
}

/// Print a summary, followed by its chart for the monthly view
pub fn print_summary<W: Write>(
    out: &mut W,
    summary: &Summary,
    settings: &Settings,
    show_chart: bool,
) -> LedgerResult<()> {
    write!(out, "{}", summary.format_terminal(&settings.currency_symbol))?;

    if let Summary::Monthly(report) = summary {
        if show_chart {
            let mut chart =
                TerminalBarChart::new(&mut *out, settings.chart_width, &settings.currency_symbol);
            chart.render(&report.chart_series())?;
        }
    }

    Ok(())
}
