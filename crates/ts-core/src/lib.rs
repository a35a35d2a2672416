//! Core domain logic for timesheet.
//!
//! This crate contains the fundamental types and logic for:
//! - Entries: validated time spans against a project, with conflict detection
//! - Report items: entries clipped against a report window
//! - Reports: dump, detail, summary and by-day renderings

mod entry;
mod report;
mod report_item;

pub use entry::{EntryChanges, RangeError, TimeEntry};
pub use report::{ReportMode, ReportOptions, render};
pub use report_item::{ReportItem, format_duration, format_hours_minutes};
