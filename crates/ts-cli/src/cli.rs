//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::{DateTime, Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use ts_core::{EntryChanges, ReportMode, ReportOptions};

use crate::commands::util::parse_datetime;
use crate::period::{Period, local_midnight};

/// Keep track of time spent on projects.
///
/// Entries are stored in `~/.timesheet/store.db` unless the `TIMESHEET_DATA_FILE`
/// environment variable or a config file names another location.
#[derive(Debug, Parser)]
#[command(name = "timesheet", version, about, long_about = None)]
pub struct Cli {
    /// Show debugging information, including full error details.
    #[arg(long, global = true)]
    pub debug: bool,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Add an entry. Fails if it overlaps an existing entry.
    Add(AddArgs),

    /// Change an existing entry, then show it.
    ///
    /// An edit without any changes just shows the entry.
    Edit(EditArgs),

    /// Delete an existing entry.
    Delete(DeleteArgs),

    /// List every entry in a period, with record numbers.
    List(ListArgs),

    /// Report hours for a period (defaults: --summary, --today).
    Report(ReportArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Project name.
    #[arg(long)]
    pub project: String,

    /// Start date-time.
    #[arg(long, value_parser = parse_time_arg)]
    pub start: DateTime<Local>,

    /// End date-time.
    #[arg(long, value_parser = parse_time_arg)]
    pub end: DateTime<Local>,

    /// Comment.
    #[arg(long)]
    pub comment: Option<String>,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Record number of the entry to edit.
    #[arg(short, long)]
    pub record_number: u64,

    /// New project name.
    #[arg(long)]
    pub project: Option<String>,

    /// New start date-time.
    #[arg(long, value_parser = parse_time_arg)]
    pub start: Option<DateTime<Local>>,

    /// New end date-time.
    #[arg(long, value_parser = parse_time_arg)]
    pub end: Option<DateTime<Local>>,

    /// New comment.
    #[arg(long)]
    pub comment: Option<String>,
}

impl EditArgs {
    pub fn changes(&self) -> EntryChanges {
        EntryChanges {
            project: self.project.clone(),
            start: self.start,
            end: self.end,
            comment: self.comment.clone(),
        }
    }
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Record number of the entry to delete.
    #[arg(short, long)]
    pub record_number: u64,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub period: PeriodArgs,
}

impl ListArgs {
    pub fn options(&self, today: NaiveDate) -> ReportOptions {
        let (start, end) = self.period.window(today);
        ReportOptions::new([ReportMode::Detail]).within(start, end)
    }
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Hours per project, without comments.
    #[arg(long)]
    pub summary: bool,

    /// Hours for each entry.
    #[arg(long)]
    pub detail: bool,

    /// Hours and comments per project for each day.
    #[arg(long)]
    pub byday: bool,

    #[command(flatten)]
    pub period: PeriodArgs,
}

impl ReportArgs {
    /// Requested report styles; `--summary` when none was given.
    pub fn modes(&self) -> Vec<ReportMode> {
        let requested = [
            (self.detail, ReportMode::Detail),
            (self.summary, ReportMode::Summary),
            (self.byday, ReportMode::ByDay),
        ];
        let modes: Vec<_> = requested
            .into_iter()
            .filter_map(|(on, mode)| on.then_some(mode))
            .collect();
        if modes.is_empty() {
            vec![ReportMode::Summary]
        } else {
            modes
        }
    }

    pub fn options(&self, today: NaiveDate) -> ReportOptions {
        let (start, end) = self.period.window(today);
        ReportOptions::new(self.modes()).within(start, end)
    }
}

/// The window a listing or report covers. At most one may be given; defaults to today.
#[derive(Debug, Default, Args)]
#[expect(clippy::struct_excessive_bools, reason = "CLI flag passthrough")]
pub struct PeriodArgs {
    /// Current day.
    #[arg(long, group = "period")]
    pub today: bool,

    /// Yesterday.
    #[arg(long, group = "period")]
    pub yesterday: bool,

    /// Current week, starting Monday.
    #[arg(long, group = "period")]
    pub current_week: bool,

    /// Last week, starting Monday.
    #[arg(long, group = "period")]
    pub last_week: bool,

    /// Current month.
    #[arg(long, group = "period")]
    pub current_month: bool,

    /// Last month.
    #[arg(long, group = "period")]
    pub last_month: bool,

    /// Start date-time (requires --end).
    #[arg(long, value_parser = parse_time_arg, group = "period", requires = "end")]
    pub start: Option<DateTime<Local>>,

    /// End date-time (requires --start).
    #[arg(long, value_parser = parse_time_arg, requires = "start")]
    pub end: Option<DateTime<Local>>,
}

impl PeriodArgs {
    /// The named period, if one was selected.
    pub const fn period(&self) -> Option<Period> {
        if self.today {
            Some(Period::Today)
        } else if self.yesterday {
            Some(Period::Yesterday)
        } else if self.current_week {
            Some(Period::CurrentWeek)
        } else if self.last_week {
            Some(Period::LastWeek)
        } else if self.current_month {
            Some(Period::CurrentMonth)
        } else if self.last_month {
            Some(Period::LastMonth)
        } else {
            None
        }
    }

    /// Resolves the window relative to `today`.
    pub fn window(&self, today: NaiveDate) -> (DateTime<Local>, DateTime<Local>) {
        match (self.start, self.end, self.period()) {
            (Some(start), Some(end), _) => (start, end),
            (Some(start), None, _) => (start, local_midnight(today + chrono::Days::new(1))),
            (None, _, Some(period)) => period.boundaries(today),
            (None, _, None) => Period::Today.boundaries(today),
        }
    }
}

fn parse_time_arg(s: &str) -> Result<DateTime<Local>, String> {
    parse_datetime(s).map_err(|err| err.to_string())
}
