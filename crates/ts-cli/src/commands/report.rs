//! List and report commands.

use std::io::Write;

use anyhow::{Context, Result};
use ts_core::{ReportOptions, render};
use ts_db::{DocumentStore, EntryStore};

/// Renders the entries overlapping the options' window.
///
/// Options without a window cover every entry.
pub fn run<W: Write, S: DocumentStore>(
    writer: &mut W,
    store: &mut EntryStore<S>,
    options: &ReportOptions,
) -> Result<()> {
    let entries = match (options.start, options.end) {
        (Some(start), Some(end)) => store.extract(start, end)?,
        _ => store.all()?,
    };
    tracing::debug!(entries = entries.len(), "extracted entries for report");
    render(writer, &entries, options).context("failed to write report")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{DateTime, Local, TimeZone};
    use insta::assert_snapshot;
    use ts_core::{ReportMode, TimeEntry};
    use ts_db::MemoryStore;

    fn at(day: u32, hour: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2009, 12, day, hour, 0, 0).unwrap()
    }

    fn store() -> EntryStore<MemoryStore> {
        let mut store = EntryStore::open(MemoryStore::new()).unwrap();
        let entries = [
            ("ProjectA", 1, 9, 12, "comment 1"),
            ("ProjectB", 1, 13, 17, "comment 2"),
            ("ProjectA", 3, 9, 17, "comment 3"),
            ("ProjectC", 8, 9, 17, "comment 4"),
        ];
        for (project, day, from, to, comment) in entries {
            let mut entry =
                TimeEntry::new(project, at(day, from), at(day, to), Some(comment.to_string()))
                    .unwrap();
            store.add(&mut entry).unwrap();
        }
        store
    }

    fn report(store: &mut EntryStore<MemoryStore>, options: &ReportOptions) -> String {
        let mut output = Vec::new();
        run(&mut output, store, options).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn summary_covers_only_the_window() {
        let mut store = store();
        let options = ReportOptions::new([ReportMode::Summary]).within(at(1, 0), at(6, 0));
        assert_snapshot!(report(&mut store, &options), @r"
        ProjectA  11h  0m
        ProjectB   4h  0m
        -----------------
           Total  15h  0m
        ");
    }

    #[test]
    fn listing_shows_record_numbers() {
        let mut store = store();
        let options = ReportOptions::new([ReportMode::Detail]).within(at(1, 0), at(2, 0));
        assert_snapshot!(report(&mut store, &options), @r"
        +-----------------------------------------------------------------------------+
        |  Id   | Project  |             Start - Stop             | Hours |  Comment  |
        +-----------------------------------------------------------------------------+
        |     1 | ProjectA |  12/01/2009 at 09:00 AM to 12:00 PM  | 3h 0m | comment 1 |
        |     2 | ProjectB |  12/01/2009 at 01:00 PM to 05:00 PM  | 4h 0m | comment 2 |
        +-----------------------------------------------------------------------------+
        ");
    }

    #[test]
    fn empty_window_has_no_data() {
        let mut store = store();
        let options = ReportOptions::new([ReportMode::Summary]).within(at(20, 0), at(21, 0));
        assert_eq!(report(&mut store, &options), "No data available.\n");
    }

    #[test]
    fn no_window_reports_every_entry() {
        let mut store = store();
        let output = report(&mut store, &ReportOptions::new([ReportMode::Summary]));
        assert!(output.contains("ProjectC"));
        assert!(output.ends_with("Total  23h  0m\n"));
    }
}
