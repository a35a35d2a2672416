//! Timesheet CLI library.
//!
//! This crate provides the command-line interface over the entry store.

mod cli;
pub mod commands;
mod config;
pub mod period;

pub use cli::{AddArgs, Cli, Commands, DeleteArgs, EditArgs, ListArgs, PeriodArgs, ReportArgs};
pub use config::{Config, ConfigError};
