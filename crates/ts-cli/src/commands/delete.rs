//! Delete command.

use std::io::Write;

use anyhow::Result;
use ts_db::{DocumentStore, EntryStore};

use crate::DeleteArgs;

pub fn run<W: Write, S: DocumentStore>(
    writer: &mut W,
    store: &mut EntryStore<S>,
    args: &DeleteArgs,
) -> Result<()> {
    let removed = store.delete(args.record_number)?;
    tracing::debug!(project = %removed.project, "deleted entry");
    writeln!(writer, "Deleted record {}", args.record_number)?;
    Ok(())
}
