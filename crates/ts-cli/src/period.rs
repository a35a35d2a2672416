//! Named report periods and their local-time boundaries.

use chrono::{DateTime, Datelike, Days, Local, Months, NaiveDate, NaiveTime, TimeDelta, TimeZone};

/// A period relative to the current day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Today,
    Yesterday,
    CurrentWeek,
    LastWeek,
    CurrentMonth,
    LastMonth,
}

impl Period {
    /// Midnight-to-midnight local boundaries of the period containing `today`.
    ///
    /// Weeks start on Monday; months start on the 1st.
    pub fn boundaries(self, today: NaiveDate) -> (DateTime<Local>, DateTime<Local>) {
        let (first, next) = match self {
            Self::Today => (today, today + Days::new(1)),
            Self::Yesterday => (today - Days::new(1), today),
            Self::CurrentWeek => {
                let monday = week_start(today);
                (monday, monday + Days::new(7))
            }
            Self::LastWeek => {
                let monday = week_start(today);
                (monday - Days::new(7), monday)
            }
            Self::CurrentMonth => {
                let first = month_start(today);
                (first, first + Months::new(1))
            }
            Self::LastMonth => {
                let first = month_start(today);
                (first - Months::new(1), first)
            }
        };
        (local_midnight(first), local_midnight(next))
    }
}

fn week_start(day: NaiveDate) -> NaiveDate {
    day - Days::new(u64::from(day.weekday().num_days_from_monday()))
}

fn month_start(day: NaiveDate) -> NaiveDate {
    day - Days::new(u64::from(day.day0()))
}

/// Start of `date` in local time.
///
/// Ambiguous midnights (DST fall-back) resolve to the earlier instant. A midnight
/// skipped by a spring-forward gap resolves to 01:00.
pub fn local_midnight(date: NaiveDate) -> DateTime<Local> {
    let midnight = date.and_time(NaiveTime::MIN);
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .or_else(|| {
            Local
                .from_local_datetime(&(midnight + TimeDelta::hours(1)))
                .earliest()
        })
        .unwrap_or_else(|| Local.from_utc_datetime(&midnight))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn local_dates(period: Period, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let (start, end) = period.boundaries(today);
        (start.date_naive(), end.date_naive())
    }

    #[test]
    fn today_and_yesterday() {
        // Dec 2, 2009 is a Wednesday
        let today = date(2009, 12, 2);
        assert_eq!(
            local_dates(Period::Today, today),
            (date(2009, 12, 2), date(2009, 12, 3))
        );
        assert_eq!(
            local_dates(Period::Yesterday, today),
            (date(2009, 12, 1), date(2009, 12, 2))
        );
    }

    #[test]
    fn boundaries_fall_on_midnight() {
        let (start, end) = Period::Today.boundaries(date(2009, 12, 2));
        assert_eq!(start.time(), NaiveTime::MIN);
        assert_eq!(end.time(), NaiveTime::MIN);
    }

    #[test]
    fn weeks_start_on_monday() {
        let expected = (date(2009, 11, 30), date(2009, 12, 7));
        // Monday, Wednesday and Sunday of the same week
        for day in [30, 2, 6] {
            let month = if day == 30 { 11 } else { 12 };
            assert_eq!(
                local_dates(Period::CurrentWeek, date(2009, month, day)),
                expected
            );
        }
    }

    #[test]
    fn last_week_is_the_previous_monday_to_monday() {
        assert_eq!(
            local_dates(Period::LastWeek, date(2009, 12, 2)),
            (date(2009, 11, 23), date(2009, 11, 30))
        );
    }

    #[test]
    fn current_month_runs_to_the_first_of_next_month() {
        assert_eq!(
            local_dates(Period::CurrentMonth, date(2009, 12, 15)),
            (date(2009, 12, 1), date(2010, 1, 1))
        );
    }

    #[test]
    fn last_month_crosses_year_boundary() {
        assert_eq!(
            local_dates(Period::LastMonth, date(2010, 1, 31)),
            (date(2009, 12, 1), date(2010, 1, 1))
        );
    }

    #[test]
    fn last_month_from_march_covers_february() {
        assert_eq!(
            local_dates(Period::LastMonth, date(2012, 3, 31)),
            (date(2012, 2, 1), date(2012, 3, 1))
        );
    }
}
