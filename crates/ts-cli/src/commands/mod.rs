//! CLI subcommand implementations.
//!
//! Each command writes its output to a caller-supplied writer so it can be
//! exercised against an in-memory store and buffer.

pub mod add;
pub mod delete;
pub mod edit;
pub mod report;
pub mod util;

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use ts_db::{DocumentStore, EntryStore};

use crate::Commands;

/// Runs `command` against `store`. Named periods are resolved relative to `today`.
pub fn run<W: Write, S: DocumentStore>(
    writer: &mut W,
    store: &mut EntryStore<S>,
    command: &Commands,
    today: NaiveDate,
) -> Result<()> {
    match command {
        Commands::Add(args) => add::run(writer, store, args),
        Commands::Edit(args) => edit::run(writer, store, args),
        Commands::Delete(args) => delete::run(writer, store, args),
        Commands::List(args) => report::run(writer, store, &args.options(today)),
        Commands::Report(args) => report::run(writer, store, &args.options(today)),
    }
}
