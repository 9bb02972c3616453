//! # Slot Generation
//!
//! Produces the start times a customer may pick on one day.
//!
//! Candidates are walked minute-by-minute from opening to closing (inclusive)
//! in steps of the booking interval. How a committed booking removes
//! candidates is selected by [`BufferPolicy`]:
//!
//! - [`BufferPolicy::RetractPrior`] is the studio's established rule. When the
//!   walk lands exactly on a booked start it jumps past the booking's duration
//!   plus the buffer and withdraws the two most recently offered times. Two
//!   withdrawn candidates equal the 60 minute pre-buffer only because the
//!   interval is 30 minutes; bookings that do not start on an interval
//!   boundary are never matched.
//! - [`BufferPolicy::ExclusionWindow`] drops every candidate inside
//!   `[start - buffer, end + buffer)` of any booking, independent of the
//!   interval. It offers different times than the established rule and is
//!   only enabled by configuration.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::booked::BookedSlot;

/// Opening hours and spacing rules, in minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHours {
    /// First offerable minute of the day (10:00)
    pub opening_minute: u32,
    /// Last offerable minute of the day (18:00), inclusive
    pub closing_minute: u32,
    pub interval_minutes: u32,
    /// Idle time kept around an existing booking
    pub buffer_minutes: u32,
}

impl BusinessHours {
    pub const STANDARD: Self = Self {
        opening_minute: 10 * 60,
        closing_minute: 18 * 60,
        interval_minutes: 30,
        buffer_minutes: 60,
    };

    /// Number of candidates on a day with no bookings
    pub fn open_slot_count(&self) -> usize {
        if self.closing_minute < self.opening_minute {
            return 0;
        }
        ((self.closing_minute - self.opening_minute) / self.step()) as usize + 1
    }

    // A zero interval would never advance the walk.
    fn step(&self) -> u32 {
        self.interval_minutes.max(1)
    }
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// One selectable start time: `value` is "HH:MM", `label` is "h:mm AM"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSlot {
    pub value: String,
    pub label: String,
}

impl CandidateSlot {
    pub fn at(minute: u32) -> Self {
        Self {
            value: format_hhmm(minute),
            label: format_label(minute),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BufferPolicy {
    #[default]
    RetractPrior,
    ExclusionWindow,
}

impl FromStr for BufferPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "retract_prior" => Ok(Self::RetractPrior),
            "exclusion_window" => Ok(Self::ExclusionWindow),
            other => Err(format!("Unknown slot buffer policy: {}", other)),
        }
    }
}

/// Returns the offerable start times for one day, ascending
///
/// `booked` is the day's list of committed bookings (possibly empty). The
/// function is pure: identical inputs always give identical output.
pub fn generate_slots(
    booked: &[BookedSlot],
    hours: &BusinessHours,
    policy: BufferPolicy,
) -> Vec<CandidateSlot> {
    match policy {
        BufferPolicy::RetractPrior => retract_prior(booked, hours),
        BufferPolicy::ExclusionWindow => exclusion_window(booked, hours),
    }
}

fn retract_prior(booked: &[BookedSlot], hours: &BusinessHours) -> Vec<CandidateSlot> {
    let step = hours.step();
    // Later rows win when two bookings share a start time.
    let lookup: HashMap<u32, u32> = booked
        .iter()
        .map(|slot| (slot.start_minute, slot.duration_minutes))
        .collect();

    let mut slots = Vec::with_capacity(hours.open_slot_count());
    let mut minute = hours.opening_minute;

    while minute <= hours.closing_minute {
        match lookup.get(&minute) {
            Some(&duration) => {
                // Net of the loop's own step, this skips duration + buffer.
                let skip = duration.saturating_add(hours.buffer_minutes).saturating_sub(step);
                minute = minute.saturating_add(skip);
                slots.pop();
                slots.pop();
            }
            None => slots.push(CandidateSlot::at(minute)),
        }
        minute = minute.saturating_add(step);
    }

    slots
}

fn exclusion_window(booked: &[BookedSlot], hours: &BusinessHours) -> Vec<CandidateSlot> {
    if hours.closing_minute < hours.opening_minute {
        return Vec::new();
    }

    let blocked = |minute: u32| {
        booked.iter().any(|slot| {
            let from = slot.start_minute.saturating_sub(hours.buffer_minutes);
            let until = slot.end_minute().saturating_add(hours.buffer_minutes);
            minute >= from && minute < until
        })
    };

    (hours.opening_minute..=hours.closing_minute)
        .step_by(hours.step() as usize)
        .filter(|&minute| !blocked(minute))
        .map(CandidateSlot::at)
        .collect()
}

/// Formats a minute of the day as zero-padded 24h "HH:MM"
pub fn format_hhmm(minute: u32) -> String {
    format!("{:02}:{:02}", minute / 60, minute % 60)
}

/// Formats a minute of the day as a 12h label, e.g. "6:00 PM" or "12:30 AM"
pub fn format_label(minute: u32) -> String {
    let hours = minute / 60;
    let minutes = minute % 60;
    let meridiem = if hours >= 12 { "PM" } else { "AM" };
    let display_hours = match hours {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    format!("{}:{:02} {}", display_hours, minutes, meridiem)
}

/// Parses "HH:MM" (24h) into a minute of the day
pub fn parse_hhmm(value: &str) -> Option<u32> {
    let (hours, minutes) = value.trim().split_once(':')?;
    if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
        return None;
    }
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    (hours < 24 && minutes < 60).then_some(hours * 60 + minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_covers_midnight_noon_and_evening() {
        assert_eq!(format_label(0), "12:00 AM");
        assert_eq!(format_label(45), "12:45 AM");
        assert_eq!(format_label(11 * 60 + 30), "11:30 AM");
        assert_eq!(format_label(12 * 60), "12:00 PM");
        assert_eq!(format_label(18 * 60), "6:00 PM");
    }

    #[test]
    fn parse_rejects_malformed_times() {
        assert_eq!(parse_hhmm("09:05"), Some(545));
        assert_eq!(parse_hhmm("9:05"), Some(545));
        assert_eq!(parse_hhmm("24:00"), None);
        assert_eq!(parse_hhmm("12:60"), None);
        assert_eq!(parse_hhmm("12:5"), None);
        assert_eq!(parse_hhmm("noon"), None);
    }

    #[test]
    fn zero_interval_still_terminates() {
        let hours = BusinessHours {
            interval_minutes: 0,
            closing_minute: 10 * 60 + 2,
            ..BusinessHours::STANDARD
        };
        assert_eq!(generate_slots(&[], &hours, BufferPolicy::RetractPrior).len(), 3);
    }
}
