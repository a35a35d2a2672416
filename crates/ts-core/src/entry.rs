//! Time entries - a span of time recorded against a project.

use std::cmp::Ordering;

use chrono::{DateTime, Local, TimeDelta};
use thiserror::Error;

/// A time span whose start comes after its end.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("start time ({start}) must not come after end time ({end})")]
pub struct RangeError {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
}

/// A recorded span of time against a project.
///
/// The bounds are private so that `start <= end` holds for every value of this type.
/// Each setter validates the new bound against the *current* opposite bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeEntry {
    /// Project the time was spent on.
    pub project: String,

    /// Free-form note.
    pub comment: Option<String>,

    /// Identifier assigned when the entry is stored; `None` until then.
    pub record_number: Option<u64>,

    start: DateTime<Local>,
    end: DateTime<Local>,
}

impl TimeEntry {
    /// Creates a new, unstored entry.
    pub fn new(
        project: impl Into<String>,
        start: DateTime<Local>,
        end: DateTime<Local>,
        comment: Option<String>,
    ) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError { start, end });
        }
        Ok(Self {
            project: project.into(),
            comment,
            record_number: None,
            start,
            end,
        })
    }

    pub const fn start(&self) -> DateTime<Local> {
        self.start
    }

    pub const fn end(&self) -> DateTime<Local> {
        self.end
    }

    /// Replaces the start time. Fails, leaving the entry unchanged, if `start` is after the current end.
    pub fn set_start(&mut self, start: DateTime<Local>) -> Result<(), RangeError> {
        if start > self.end {
            return Err(RangeError {
                start,
                end: self.end,
            });
        }
        self.start = start;
        Ok(())
    }

    /// Replaces the end time. Fails, leaving the entry unchanged, if the current start is after `end`.
    pub fn set_end(&mut self, end: DateTime<Local>) -> Result<(), RangeError> {
        if self.start > end {
            return Err(RangeError {
                start: self.start,
                end,
            });
        }
        self.end = end;
        Ok(())
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Two entries conflict when their spans share more than a single boundary point.
    pub fn conflicts_with(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether `instant` lies within the entry's span, both bounds included.
    pub fn covers(&self, instant: DateTime<Local>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Whether the entry's span touches `[start, end]`, both ends included.
    pub fn overlaps_window(&self, start: DateTime<Local>, end: DateTime<Local>) -> bool {
        self.start <= end && start <= self.end
    }

    /// Orders entries by start time.
    pub fn cmp_by_start(&self, other: &Self) -> Ordering {
        self.start.cmp(&other.start)
    }
}

/// A partial update to an entry; only the fields that are `Some` are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryChanges {
    pub project: Option<String>,
    pub start: Option<DateTime<Local>>,
    pub end: Option<DateTime<Local>>,
    pub comment: Option<String>,
}

impl EntryChanges {
    pub const fn is_empty(&self) -> bool {
        self.project.is_none() && self.start.is_none() && self.end.is_none() && self.comment.is_none()
    }

    /// Applies the present fields in the order project, start, end, comment.
    ///
    /// Each bound is validated against the entry's bound as it stands at that step, so
    /// moving both bounds past the current end in one update is rejected. Fields applied
    /// before a failing step remain applied.
    pub fn apply_to(&self, entry: &mut TimeEntry) -> Result<(), RangeError> {
        if let Some(project) = &self.project {
            entry.project.clone_from(project);
        }
        if let Some(start) = self.start {
            entry.set_start(start)?;
        }
        if let Some(end) = self.end {
            entry.set_end(end)?;
        }
        if let Some(comment) = &self.comment {
            entry.comment = Some(comment.clone());
        }
        Ok(())
    }
}
