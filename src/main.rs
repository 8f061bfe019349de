use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use expense_ledger::cli::{handle_command, Commands};
use expense_ledger::config::{LedgerPaths, Settings};
use expense_ledger::storage::Storage;

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Terminal-based personal expense ledger",
    long_about = "Records expenses in a plain CSV file and summarizes them by \
                  category, overall, or by month. Run without a command to use \
                  the interactive menu."
)]
struct Cli {
    /// Ledger file to use instead of the configured one
    #[arg(long, global = true, env = "EXPENSE_LEDGER_FILE")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() -> Result<()> {
    expense_ledger::init_tracing();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = LedgerPaths::new()?;
    paths.ensure_directories()?;
    let settings = Settings::load_or_create(&paths)?;

    let storage = Storage::from_config(&paths, &settings, cli.file);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    handle_command(
        &storage,
        &paths,
        &settings,
        cli.command.unwrap_or(Commands::Menu),
        &mut out,
    )?;

    Ok(())
}
