//! Report rendering.
//!
//! A report takes the entries extracted for a window and renders one or more
//! of four styles to any [`io::Write`] sink:
//!
//! - **dump**: the first entry as six labelled lines
//! - **detail**: a bordered table with one row per entry
//! - **summary**: total time per project plus a grand total
//! - **byday**: time and comments per project for each calendar day
//!
//! Every style works on [`ReportItem`]s, so times and durations are clipped to
//! the report window.

use std::collections::BTreeMap;
use std::io::{self, Write};

use chrono::{DateTime, Local, NaiveDate, TimeDelta};

use crate::entry::TimeEntry;
use crate::report_item::{ReportItem, format_hours_minutes, hours_minutes};

/// Printed instead of any report when there are no entries.
pub const NO_DATA: &str = "No data available.";

/// Report style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportMode {
    Dump,
    Detail,
    Summary,
    ByDay,
}

impl ReportMode {
    /// All styles, in the order they are rendered.
    pub const ALL: [Self; 4] = [Self::Dump, Self::Detail, Self::Summary, Self::ByDay];
}

/// Which styles to render and the window to clip entries to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportOptions {
    pub modes: Vec<ReportMode>,
    pub start: Option<DateTime<Local>>,
    pub end: Option<DateTime<Local>>,
}

impl ReportOptions {
    /// Options for the given styles with no window.
    pub fn new(modes: impl IntoIterator<Item = ReportMode>) -> Self {
        Self {
            modes: modes.into_iter().collect(),
            start: None,
            end: None,
        }
    }

    /// Constrains the report to `[start, end]`.
    #[must_use]
    pub const fn within(mut self, start: DateTime<Local>, end: DateTime<Local>) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn includes(&self, mode: ReportMode) -> bool {
        self.modes.contains(&mode)
    }
}

/// Renders every requested style, in [`ReportMode::ALL`] order, over the same entries.
///
/// With no entries only [`NO_DATA`] is written.
pub fn render<W: Write>(
    writer: &mut W,
    entries: &[TimeEntry],
    options: &ReportOptions,
) -> io::Result<()> {
    tracing::debug!(entries = entries.len(), modes = ?options.modes, "rendering report");

    if entries.is_empty() {
        writeln!(writer, "{NO_DATA}")?;
        return Ok(());
    }

    let items: Vec<ReportItem<'_>> = entries
        .iter()
        .map(|entry| ReportItem::new(entry, options))
        .collect();

    for mode in ReportMode::ALL {
        if !options.includes(mode) {
            continue;
        }
        match mode {
            ReportMode::Dump => dump_report(writer, &items[0])?,
            ReportMode::Detail => detail_report(writer, &items)?,
            ReportMode::Summary => summary_report(writer, &items)?,
            ReportMode::ByDay => byday_report(writer, &items)?,
        }
    }

    Ok(())
}

// ========== Dump ==========

fn dump_report<W: Write>(writer: &mut W, item: &ReportItem<'_>) -> io::Result<()> {
    let fields = [
        ("Record:", item.record_number()),
        ("Project:", item.project().to_string()),
        ("Start:", item.formatted_start_time()),
        ("End:", item.formatted_end_time()),
        ("Hours:", item.formatted_duration()),
        ("Comment:", item.comment().to_string()),
    ];

    let label_width = fields
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0);
    for (label, value) in &fields {
        writeln!(writer, "{label:<label_width$} {value}")?;
    }
    Ok(())
}

// ========== Detail ==========

const DETAIL_HEADERS: [&str; 5] = ["Id", "Project", "Start - Stop", "Hours", "Comment"];

fn detail_row(item: &ReportItem<'_>) -> [String; 5] {
    [
        item.formatted_record_number(),
        item.project().to_string(),
        item.formatted_times(),
        item.formatted_duration(),
        item.comment().to_string(),
    ]
}

fn detail_report<W: Write>(writer: &mut W, items: &[ReportItem<'_>]) -> io::Result<()> {
    let mut sorted: Vec<&ReportItem<'_>> = items.iter().collect();
    sorted.sort_by_key(|item| item.effective_start());
    let rows: Vec<[String; 5]> = sorted.into_iter().map(detail_row).collect();

    // Widths cover the whole result set before any row is printed.
    let mut widths = DETAIL_HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut header = String::from("|");
    for (name, width) in DETAIL_HEADERS.iter().zip(widths) {
        header.push_str(&format!(" {name:^width$} |"));
    }
    let separator = format!("+{}+", "-".repeat(header.chars().count() - 2));

    writeln!(writer, "{separator}")?;
    writeln!(writer, "{header}")?;
    writeln!(writer, "{separator}")?;
    for row in &rows {
        let mut line = String::from("|");
        for (cell, width) in row.iter().zip(widths) {
            line.push_str(&format!(" {cell:<width$} |"));
        }
        writeln!(writer, "{line}")?;
    }
    writeln!(writer, "{separator}")?;
    Ok(())
}

// ========== Summary ==========

fn summary_line(label: &str, width: usize, duration: TimeDelta) -> String {
    let (hours, minutes) = hours_minutes(duration);
    let hours = format!("{hours}h");
    let minutes = format!("{minutes}m");
    format!("{label:>width$} {hours:>4}{minutes:>4}")
}

fn summary_report<W: Write>(writer: &mut W, items: &[ReportItem<'_>]) -> io::Result<()> {
    let mut by_project: BTreeMap<&str, TimeDelta> = BTreeMap::new();
    let mut total = TimeDelta::zero();
    for item in items {
        let duration = item.duration();
        let project = by_project.entry(item.project()).or_insert_with(TimeDelta::zero);
        *project = *project + duration;
        total = total + duration;
    }

    let width = by_project
        .keys()
        .map(|project| project.chars().count())
        .max()
        .unwrap_or(0);

    for (project, duration) in &by_project {
        writeln!(writer, "{}", summary_line(project, width, *duration))?;
    }
    writeln!(writer, "{}", "-".repeat(width + 4 + 4 + 1))?;
    writeln!(writer, "{}", summary_line("Total", width, total))?;
    Ok(())
}

// ========== By Day ==========

struct ProjectDay<'a> {
    duration: TimeDelta,
    comments: Vec<&'a str>,
}

fn byday_report<W: Write>(writer: &mut W, items: &[ReportItem<'_>]) -> io::Result<()> {
    // Days come from the entry's own start, not the clipped one.
    let mut days: BTreeMap<NaiveDate, BTreeMap<&str, ProjectDay<'_>>> = BTreeMap::new();
    for item in items {
        let day = item.entry().start().date_naive();
        let project = days
            .entry(day)
            .or_default()
            .entry(item.project())
            .or_insert_with(|| ProjectDay {
                duration: TimeDelta::zero(),
                comments: Vec::new(),
            });
        project.duration = project.duration + item.duration();
        project.comments.push(item.comment());
    }

    for (day, projects) in &days {
        writeln!(writer, "{}", day.format("%m/%d/%y"))?;
        for (project, totals) in projects {
            writeln!(
                writer,
                "\t{project} {}",
                format_hours_minutes(totals.duration)
            )?;
            for comment in &totals.comments {
                writeln!(writer, "\t - {comment}")?;
            }
        }
    }
    Ok(())
}
