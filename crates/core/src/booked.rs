//! # Booked Slots
//!
//! Turns committed appointments from the store into a per-day lookup the slot
//! generator can consume.
//!
//! The fetch covers a closed window running from the start of "today" to the
//! last millisecond of the day three months later, both in the studio's
//! time zone. Each row is reshaped into a [`BookedSlot`] and appended to the
//! list for its [`DayKey`]; because the store returns rows in ascending
//! timestamp order, every day's list ends up chronological.
//!
//! When the store cannot be read, [`FetchFailurePolicy`] decides what happens.
//! The default keeps offering slots as if nothing were booked (fail-open),
//! which can let a double booking through on a transient error. Appointment
//! writes re-check availability, so the risk is bounded to what that re-check
//! also fails to see.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{
    DateTime, Datelike, Duration, LocalResult, Months, NaiveDate, NaiveDateTime, NaiveTime,
    TimeZone, Timelike, Utc,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{BookingError, BookingResult};
use crate::slots::format_hhmm;

/// How far ahead of today customers may book
pub const BOOKING_HORIZON_MONTHS: u32 = 3;

/// A calendar day used to group booked slots
///
/// `month` is 1-based. The [`fmt::Display`] form reproduces the legacy
/// `day-monthIndex-year` text key (zero-based month) so logs stay comparable
/// with the old front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DayKey {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DayKey {
    pub fn to_date(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.day, self.month.saturating_sub(1), self.year)
    }
}

/// A committed reservation on one day, in studio-local minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedSlot {
    /// Minute of the day the appointment starts (seconds are truncated)
    pub start_minute: u32,
    pub duration_minutes: u32,
}

impl BookedSlot {
    /// Start time as "HH:MM"
    pub fn start_time(&self) -> String {
        format_hhmm(self.start_minute)
    }

    pub fn end_minute(&self) -> u32 {
        self.start_minute + self.duration_minutes
    }
}

pub type BookedSlotMap = HashMap<DayKey, Vec<BookedSlot>>;

/// The two columns read back from the appointment store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedRow {
    pub appointment_datetime_slot: DateTime<Utc>,
    pub duration: i32,
}

/// Closed UTC interval covering whole studio-local days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    first_day: NaiveDate,
    last_day: NaiveDate,
}

impl BookingWindow {
    /// Window from the start of `today` to the end of the day three months later
    pub fn from_today(today: NaiveDate, tz: Tz) -> Self {
        let last_day = today
            .checked_add_months(Months::new(BOOKING_HORIZON_MONTHS))
            .unwrap_or(NaiveDate::MAX);
        Self::spanning(today, last_day, tz)
    }

    pub fn single_day(day: NaiveDate, tz: Tz) -> Self {
        Self::spanning(day, day, tz)
    }

    /// Window for the inclusive day range `first_day..=last_day`
    pub fn spanning(first_day: NaiveDate, last_day: NaiveDate, tz: Tz) -> Self {
        let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
        Self {
            start: local_to_utc(tz, first_day.and_time(NaiveTime::MIN)),
            end: local_to_utc(tz, last_day.and_time(end_of_day)),
            first_day,
            last_day,
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn last_day(&self) -> NaiveDate {
        self.last_day
    }

    pub fn contains_day(&self, day: NaiveDate) -> bool {
        day >= self.first_day && day <= self.last_day
    }
}

/// Resolves a studio-local wall-clock time to UTC.
///
/// Ambiguous times (DST fall-back) take the earlier instant. Times inside a
/// DST gap are moved forward by the length of the gap.
pub fn local_to_utc(tz: Tz, local: NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(t) | LocalResult::Ambiguous(t, _) => t.with_timezone(&Utc),
        LocalResult::None => match tz.from_local_datetime(&(local + Duration::hours(1))) {
            LocalResult::Single(t) | LocalResult::Ambiguous(t, _) => t.with_timezone(&Utc),
            LocalResult::None => Utc.from_utc_datetime(&local),
        },
    }
}

/// Read access to committed appointments
///
/// Implementations must return the rows whose timestamp lies inside the
/// window, ordered by timestamp ascending.
#[async_trait]
pub trait BookedSlotSource: Send + Sync {
    async fn fetch_booked(&self, window: &BookingWindow) -> eyre::Result<Vec<BookedRow>>;
}

/// Groups fetched rows by studio-local day, keeping fetch order within a day
pub fn group_booked_slots(rows: &[BookedRow], tz: Tz) -> BookedSlotMap {
    let mut slots = BookedSlotMap::new();

    for row in rows {
        let Ok(duration_minutes) = u32::try_from(row.duration) else {
            warn!(
                "Skipping booked row at {} with negative duration {}",
                row.appointment_datetime_slot, row.duration
            );
            continue;
        };

        let local = row.appointment_datetime_slot.with_timezone(&tz);
        let key = DayKey::from(local.date_naive());

        slots.entry(key).or_default().push(BookedSlot {
            start_minute: local.hour() * 60 + local.minute(),
            duration_minutes,
        });
    }

    slots
}

/// What to do when the booked-slot read fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchFailurePolicy {
    /// Treat the day as having no bookings and flag the result as degraded
    #[default]
    FailOpen,
    /// Refuse to offer slots until the store can be read
    FailClosed,
}

impl FromStr for FetchFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail_open" | "open" => Ok(Self::FailOpen),
            "fail_closed" | "closed" => Ok(Self::FailClosed),
            other => Err(format!("Unknown fetch failure policy: {}", other)),
        }
    }
}

/// Result of one booked-slot refresh
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookedSlots {
    pub slots: BookedSlotMap,
    /// Set when the store read failed and the map was assumed empty
    pub degraded: bool,
}

impl BookedSlots {
    pub fn for_day(&self, day: NaiveDate) -> &[BookedSlot] {
        self.slots
            .get(&DayKey::from(day))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

pub async fn fetch_booked_slots(
    source: &dyn BookedSlotSource,
    window: &BookingWindow,
    tz: Tz,
    policy: FetchFailurePolicy,
) -> BookingResult<BookedSlots> {
    match source.fetch_booked(window).await {
        Ok(rows) => Ok(BookedSlots {
            slots: group_booked_slots(&rows, tz),
            degraded: false,
        }),
        Err(err) => match policy {
            FetchFailurePolicy::FailOpen => {
                warn!(
                    "Booked slot fetch for {}..{} failed, offering all slots: {}",
                    window.first_day(),
                    window.last_day(),
                    err
                );
                Ok(BookedSlots {
                    slots: BookedSlotMap::new(),
                    degraded: true,
                })
            }
            FetchFailurePolicy::FailClosed => Err(BookingError::Unavailable(format!(
                "booked appointments could not be read: {}",
                err
            ))),
        },
    }
}
