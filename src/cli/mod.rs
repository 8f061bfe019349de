//! CLI command handlers
//!
//! This module contains the implementation of CLI commands and the
//! interactive menu, bridging the clap argument parsing with the service
//! layer.

pub mod commands;
pub mod menu;

pub use commands::{handle_command, print_summary, Commands, SummaryArg};
pub use menu::run_menu;
