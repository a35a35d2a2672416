//! Add command.

use std::io::Write;

use anyhow::Result;
use ts_core::TimeEntry;
use ts_db::{DocumentStore, EntryStore};

use crate::AddArgs;

pub fn run<W: Write, S: DocumentStore>(
    writer: &mut W,
    store: &mut EntryStore<S>,
    args: &AddArgs,
) -> Result<()> {
    let mut entry = TimeEntry::new(
        args.project.clone(),
        args.start,
        args.end,
        args.comment.clone(),
    )?;
    let record_number = store.add(&mut entry)?;
    writeln!(writer, "Added record {record_number}")?;
    Ok(())
}
