//! Entries as seen through a report window.

use chrono::{DateTime, Datelike, Local, TimeDelta};

use crate::entry::TimeEntry;
use crate::report::ReportOptions;

const MINUTES_PER_HOUR: i64 = 60;
const MINUTES_PER_DAY: i64 = 24 * MINUTES_PER_HOUR;

/// A [`TimeEntry`] clipped against the window of the report that renders it.
///
/// Items are built fresh for every render and only borrow the entry.
#[derive(Debug, Clone, Copy)]
pub struct ReportItem<'a> {
    entry: &'a TimeEntry,
    window_start: Option<DateTime<Local>>,
    window_end: Option<DateTime<Local>>,
}

impl<'a> ReportItem<'a> {
    pub const fn new(entry: &'a TimeEntry, options: &ReportOptions) -> Self {
        Self {
            entry,
            window_start: options.start,
            window_end: options.end,
        }
    }

    pub const fn entry(&self) -> &'a TimeEntry {
        self.entry
    }

    pub fn project(&self) -> &'a str {
        &self.entry.project
    }

    pub fn comment(&self) -> &'a str {
        self.entry.comment.as_deref().unwrap_or("")
    }

    /// Whether the window starts inside the entry, so the entry is cut at the window start.
    pub fn start_sliced(&self) -> bool {
        self.window_start.is_some_and(|start| self.entry.covers(start))
    }

    /// Whether the window ends inside the entry, so the entry is cut at the window end.
    pub fn end_sliced(&self) -> bool {
        self.window_end.is_some_and(|end| self.entry.covers(end))
    }

    pub fn effective_start(&self) -> DateTime<Local> {
        match self.window_start {
            Some(start) if self.entry.covers(start) => start,
            _ => self.entry.start(),
        }
    }

    pub fn effective_end(&self) -> DateTime<Local> {
        match self.window_end {
            Some(end) if self.entry.covers(end) => end,
            _ => self.entry.end(),
        }
    }

    /// Time between the effective bounds, never negative.
    pub fn duration(&self) -> TimeDelta {
        (self.effective_end() - self.effective_start()).max(TimeDelta::zero())
    }

    /// Record number, or `N/A` for an entry that was never stored.
    pub fn record_number(&self) -> String {
        self.entry
            .record_number
            .map_or_else(|| "N/A".to_string(), |n| n.to_string())
    }

    /// Record number right-aligned to five columns; unstored entries show `0`.
    pub fn formatted_record_number(&self) -> String {
        format!("{:>5}", self.entry.record_number.unwrap_or(0))
    }

    pub fn formatted_start_time(&self) -> String {
        self.effective_start()
            .format("%m/%d/%Y at %I:%M:%S %p")
            .to_string()
    }

    pub fn formatted_end_time(&self) -> String {
        self.effective_end()
            .format("%m/%d/%Y at %I:%M:%S %p")
            .to_string()
    }

    /// Renders `[<]MM/DD/YYYY at hh:mm AM to [MM/DD/YYYY at ]hh:mm PM[>]`.
    ///
    /// The end date is only repeated when it falls on another day. A space takes the
    /// place of each slice marker that does not apply.
    pub fn formatted_times(&self) -> String {
        let start = self.effective_start();
        let end = self.effective_end();

        let mut out = String::new();
        out.push(if self.start_sliced() { '<' } else { ' ' });
        out.push_str(&start.format("%m/%d/%Y at %I:%M %p").to_string());
        out.push_str(" to ");
        if start.year() != end.year() || start.ordinal() != end.ordinal() {
            out.push_str(&end.format("%m/%d/%Y at ").to_string());
        }
        out.push_str(&end.format("%I:%M %p").to_string());
        out.push(if self.end_sliced() { '>' } else { ' ' });
        out
    }

    pub fn formatted_duration(&self) -> String {
        format_duration(self.duration())
    }
}

/// Splits a duration into whole hours and the remaining minutes.
///
/// Seconds are floored away; negative durations count as zero.
pub(crate) fn hours_minutes(duration: TimeDelta) -> (i64, i64) {
    let minutes = duration.num_minutes().max(0);
    (minutes / MINUTES_PER_HOUR, minutes % MINUTES_PER_HOUR)
}

/// Formats a duration as `Hh Mm`, prefixed with `N Days ` once it reaches a full day.
pub fn format_duration(duration: TimeDelta) -> String {
    let minutes = duration.num_minutes().max(0);
    let days = minutes / MINUTES_PER_DAY;
    let hours = (minutes % MINUTES_PER_DAY) / MINUTES_PER_HOUR;
    let minutes = minutes % MINUTES_PER_HOUR;

    if days > 0 {
        format!("{days} Days {hours}h {minutes}m")
    } else {
        format!("{hours}h {minutes}m")
    }
}

/// Formats a duration as `Hh Mm` without folding hours into days.
pub fn format_hours_minutes(duration: TimeDelta) -> String {
    let (hours, minutes) = hours_minutes(duration);
    format!("{hours}h {minutes}m")
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;

    use crate::report::ReportMode;

    fn at(month: u32, day: u32, hour: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2009, month, day, hour, 0, 0).unwrap()
    }

    fn window(start: DateTime<Local>, end: DateTime<Local>) -> ReportOptions {
        ReportOptions::new([ReportMode::Detail]).within(start, end)
    }

    fn nine_to_six() -> TimeEntry {
        TimeEntry::new("Project", at(12, 1, 9), at(12, 1, 18), None).unwrap()
    }

    #[test]
    fn start_is_clipped_to_window_start_inside_the_entry() {
        let entry = nine_to_six();
        let options = window(at(12, 1, 12), at(12, 2, 0));
        let item = ReportItem::new(&entry, &options);

        assert!(item.start_sliced());
        assert_eq!(item.effective_start(), at(12, 1, 12));
        assert!(item.formatted_times().starts_with('<'));
        assert_eq!(item.duration(), TimeDelta::hours(6));
    }

    #[test]
    fn start_is_kept_when_window_starts_before_the_entry() {
        let entry = nine_to_six();
        let options = window(at(11, 1, 12), at(12, 2, 12));
        let item = ReportItem::new(&entry, &options);

        assert!(!item.start_sliced());
        assert_eq!(item.effective_start(), entry.start());
    }

    #[test]
    fn end_is_clipped_to_window_end_inside_the_entry() {
        let entry = nine_to_six();
        let options = window(at(11, 1, 12), at(12, 1, 12));
        let item = ReportItem::new(&entry, &options);

        assert!(item.end_sliced());
        assert_eq!(item.effective_end(), at(12, 1, 12));
    }

    #[test]
    fn end_is_kept_when_window_ends_after_the_entry() {
        let entry = nine_to_six();
        let options = window(at(11, 1, 12), at(12, 2, 12));
        let item = ReportItem::new(&entry, &options);

        assert!(!item.end_sliced());
        assert_eq!(item.effective_end(), entry.end());
    }

    #[test]
    fn missing_window_never_slices() {
        let entry = nine_to_six();
        let options = ReportOptions::new([ReportMode::Dump]);
        let item = ReportItem::new(&entry, &options);

        assert!(!item.start_sliced());
        assert!(!item.end_sliced());
        assert_eq!(item.duration(), TimeDelta::hours(9));
    }

    #[test]
    fn formats_record_number() {
        let mut entry = nine_to_six();
        let options = ReportOptions::default();
        assert_eq!(ReportItem::new(&entry, &options).formatted_record_number(), "    0");
        assert_eq!(ReportItem::new(&entry, &options).record_number(), "N/A");

        entry.record_number = Some(1);
        assert_eq!(ReportItem::new(&entry, &options).formatted_record_number(), "    1");
        assert_eq!(ReportItem::new(&entry, &options).record_number(), "1");
    }

    #[test]
    fn times_on_same_day_show_the_date_once() {
        let entry = TimeEntry::new("Project", at(12, 1, 9), at(12, 1, 17), None).unwrap();
        let options = window(at(12, 1, 8), at(12, 1, 18));
        assert_eq!(
            ReportItem::new(&entry, &options).formatted_times(),
            " 12/01/2009 at 09:00 AM to 05:00 PM "
        );
    }

    #[test]
    fn times_sliced_at_both_ends_carry_both_markers() {
        let entry = TimeEntry::new("Project", at(12, 1, 9), at(12, 1, 17), None).unwrap();
        let options = window(at(12, 1, 10), at(12, 1, 16));
        assert_eq!(
            ReportItem::new(&entry, &options).formatted_times(),
            "<12/01/2009 at 10:00 AM to 04:00 PM>"
        );
    }

    #[test]
    fn times_on_different_days_show_both_dates() {
        let entry = TimeEntry::new("Project", at(12, 1, 9), at(12, 2, 18), None).unwrap();
        let options = window(at(12, 1, 8), at(12, 2, 19));
        assert_eq!(
            ReportItem::new(&entry, &options).formatted_times(),
            " 12/01/2009 at 09:00 AM to 12/02/2009 at 06:00 PM "
        );
    }

    #[test]
    fn start_and_end_times_include_seconds() {
        let entry = nine_to_six();
        let options = ReportOptions::default();
        let item = ReportItem::new(&entry, &options);
        assert_eq!(item.formatted_start_time(), "12/01/2009 at 09:00:00 AM");
        assert_eq!(item.formatted_end_time(), "12/01/2009 at 06:00:00 PM");
    }

    #[test]
    fn duration_over_a_day_includes_days() {
        let duration = TimeDelta::hours(30) + TimeDelta::minutes(15);
        assert_eq!(format_duration(duration), "1 Days 6h 15m");
    }

    #[test]
    fn duration_under_a_day_omits_days() {
        let duration = TimeDelta::hours(12) + TimeDelta::minutes(15);
        assert_eq!(format_duration(duration), "12h 15m");
    }

    #[test]
    fn duration_floors_seconds() {
        assert_eq!(format_duration(TimeDelta::seconds(119)), "0h 1m");
    }

    #[test]
    fn hours_minutes_do_not_fold_into_days() {
        assert_eq!(format_hours_minutes(TimeDelta::hours(43)), "43h 0m");
        assert_eq!(hours_minutes(TimeDelta::minutes(-5)), (0, 0));
    }
}
