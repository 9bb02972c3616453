use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Dates the studio is closed on top of weekends
pub fn default_blocked_dates() -> Vec<NaiveDate> {
    [(2025, 7, 15), (2025, 7, 16)]
        .into_iter()
        .filter_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
        .collect()
}

/// Parses a comma-separated list of `YYYY-MM-DD` dates; blank entries are ignored
pub fn parse_blocked_dates(raw: &str) -> Result<Vec<NaiveDate>, chrono::ParseError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub unavailable: bool,
}

/// Whole-day closures: every Saturday and Sunday plus a deny-list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingCalendar {
    blocked_dates: BTreeSet<NaiveDate>,
}

impl BookingCalendar {
    pub fn new(blocked_dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            blocked_dates: blocked_dates.into_iter().collect(),
        }
    }

    pub fn blocked_dates(&self) -> impl Iterator<Item = &NaiveDate> {
        self.blocked_dates.iter()
    }

    pub fn is_date_unavailable(&self, date: NaiveDate) -> bool {
        let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
        weekend || self.blocked_dates.contains(&date)
    }

    /// Flags every day in `from..=to`; empty when `to` precedes `from`
    pub fn days_between(&self, from: NaiveDate, to: NaiveDate) -> Vec<DayAvailability> {
        from.iter_days()
            .take_while(|date| *date <= to)
            .map(|date| DayAvailability {
                date,
                unavailable: self.is_date_unavailable(date),
            })
            .collect()
    }
}

impl Default for BookingCalendar {
    fn default() -> Self {
        Self::new(default_blocked_dates())
    }
}
