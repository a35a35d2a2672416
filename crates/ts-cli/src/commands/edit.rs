//! Edit command.

use std::io::Write;

use anyhow::Result;
use ts_core::{ReportMode, ReportOptions, render};
use ts_db::{DocumentStore, EntryStore};

use crate::EditArgs;

/// Applies the requested changes, then dumps the entry as stored.
pub fn run<W: Write, S: DocumentStore>(
    writer: &mut W,
    store: &mut EntryStore<S>,
    args: &EditArgs,
) -> Result<()> {
    let changes = args.changes();
    let entry = if changes.is_empty() {
        store.find(args.record_number)?
    } else {
        store.update(args.record_number, &changes)?
    };
    render(
        writer,
        std::slice::from_ref(&entry),
        &ReportOptions::new([ReportMode::Dump]),
    )?;
    Ok(())
}
