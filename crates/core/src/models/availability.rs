use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::DayAvailability;
use crate::slots::CandidateSlot;

/// Longest range the day listing will answer for in one request
pub const MAX_DAY_RANGE: i64 = 93;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotsQuery {
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySlotsResponse {
    pub date: NaiveDate,
    /// Legacy "day-monthIndex-year" key of the day
    pub day_key: String,
    pub unavailable: bool,
    /// True when bookings could not be read and every slot is offered
    pub degraded: bool,
    pub slots: Vec<CandidateSlot>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DaysQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaysResponse {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub days: Vec<DayAvailability>,
}
