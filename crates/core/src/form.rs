//! # Booking Form Flow
//!
//! The booking form is filled in five steps: contact details, service
//! choice, date and time, inspiration photos and notes, then a review of the
//! whole order. [`BookingFlow`] tracks the current step and only moves
//! forward once that step's fields pass validation; moving back is always
//! allowed. The review step and submission both re-run every step through
//! [`BookingFlow::complete`], so a client that skips steps gets the same
//! errors it would have seen along the way.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::booked::BookingWindow;
use crate::calendar::BookingCalendar;
use crate::models::appointment::{NailLength, NailShape, ServiceTier};
use crate::slots::parse_hhmm;
use crate::validation::{check_email, check_name, check_phone, check_photos, FieldErrors};

pub const DEFAULT_BOOKING_TIME: &str = "10:00";

fn default_booking_time() -> String {
    DEFAULT_BOOKING_TIME.to_string()
}

/// Everything the customer has entered so far
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub service_tier: ServiceTier,
    #[serde(default)]
    pub nail_shape: NailShape,
    #[serde(default)]
    pub nail_length: NailLength,
    pub date: Option<NaiveDate>,
    #[serde(default = "default_booking_time")]
    pub time: String,
    /// CDN URLs of photos the browser already uploaded
    #[serde(default)]
    pub inspiration_photos: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

impl Default for BookingDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            service_tier: ServiceTier::default(),
            nail_shape: NailShape::default(),
            nail_length: NailLength::default(),
            date: None,
            time: default_booking_time(),
            inspiration_photos: Vec::new(),
            notes: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStep {
    Contact,
    Service,
    Schedule,
    Inspiration,
    Review,
    Submitted,
}

impl BookingStep {
    pub fn number(&self) -> u8 {
        match self {
            Self::Contact => 1,
            Self::Service => 2,
            Self::Schedule => 3,
            Self::Inspiration => 4,
            Self::Review => 5,
            Self::Submitted => 6,
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Contact => Self::Service,
            Self::Service => Self::Schedule,
            Self::Schedule => Self::Inspiration,
            Self::Inspiration => Self::Review,
            Self::Review | Self::Submitted => Self::Submitted,
        }
    }

    fn previous(self) -> Self {
        match self {
            Self::Contact | Self::Service => Self::Contact,
            Self::Schedule => Self::Service,
            Self::Inspiration => Self::Schedule,
            Self::Review => Self::Inspiration,
            Self::Submitted => Self::Review,
        }
    }
}

/// Calendar constraints the schedule step is checked against
#[derive(Debug, Clone, Copy)]
pub struct ScheduleRules<'a> {
    pub calendar: &'a BookingCalendar,
    pub window: &'a BookingWindow,
}

/// A draft that passed every step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedBooking {
    pub date: NaiveDate,
    pub start_minute: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingFlow {
    step: BookingStep,
}

impl Default for BookingFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingFlow {
    pub fn new() -> Self {
        Self::at(BookingStep::Contact)
    }

    pub fn at(step: BookingStep) -> Self {
        Self { step }
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn validate_step(
        step: BookingStep,
        draft: &BookingDraft,
        rules: ScheduleRules<'_>,
    ) -> FieldErrors {
        let mut errors = FieldErrors::new();
        match step {
            BookingStep::Contact => {
                check_name(&mut errors, &draft.name);
                check_email(&mut errors, &draft.email);
                check_phone(&mut errors, &draft.phone);
            }
            // Tier, shape and length are closed enums, so serde already checked them.
            BookingStep::Service => {}
            BookingStep::Schedule => {
                check_schedule(&mut errors, draft, rules);
            }
            BookingStep::Inspiration => check_photos(&mut errors, &draft.inspiration_photos),
            BookingStep::Review => {
                if let Err(all) = Self::complete(draft, rules) {
                    errors.extend(all);
                }
            }
            BookingStep::Submitted => {}
        }
        errors
    }

    /// Validates the current step and moves to the next one if it passes
    pub fn advance(
        &mut self,
        draft: &BookingDraft,
        rules: ScheduleRules<'_>,
    ) -> Result<BookingStep, FieldErrors> {
        Self::validate_step(self.step, draft, rules).into_result()?;
        self.step = self.step.next();
        Ok(self.step)
    }

    pub fn back(&mut self) -> BookingStep {
        self.step = self.step.previous();
        self.step
    }

    /// Runs every step's rules, collecting all failures
    pub fn complete(
        draft: &BookingDraft,
        rules: ScheduleRules<'_>,
    ) -> Result<ValidatedBooking, FieldErrors> {
        let mut errors = FieldErrors::new();
        for step in [BookingStep::Contact, BookingStep::Service, BookingStep::Inspiration] {
            errors.extend(Self::validate_step(step, draft, rules));
        }
        // check_schedule only yields a booking when it recorded no errors.
        match check_schedule(&mut errors, draft, rules) {
            Some(booking) if errors.is_empty() => Ok(booking),
            _ => Err(errors),
        }
    }
}

fn check_schedule(
    errors: &mut FieldErrors,
    draft: &BookingDraft,
    rules: ScheduleRules<'_>,
) -> Option<ValidatedBooking> {
    let date = match draft.date {
        None => {
            errors.add("date", "Date is required");
            None
        }
        Some(date) if !rules.window.contains_day(date) => {
            errors.add("date", "Date is outside the booking window");
            None
        }
        Some(date) if rules.calendar.is_date_unavailable(date) => {
            errors.add("date", "Date is unavailable");
            None
        }
        Some(date) => Some(date),
    };

    let start_minute = parse_hhmm(&draft.time);
    if start_minute.is_none() {
        errors.add("time", "Valid time is required");
    }

    Some(ValidatedBooking {
        date: date?,
        start_minute: start_minute?,
    })
}

/// Body of a single-step check from the multi-step form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepValidationRequest {
    pub step: BookingStep,
    #[serde(default)]
    pub draft: BookingDraft,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepValidationResponse {
    pub valid: bool,
    /// The step the form should show next; unchanged when `valid` is false
    pub next_step: BookingStep,
    pub errors: FieldErrors,
}

impl StepValidationRequest {
    pub fn evaluate(&self, rules: ScheduleRules<'_>) -> StepValidationResponse {
        let mut flow = BookingFlow::at(self.step);
        match flow.advance(&self.draft, rules) {
            Ok(next_step) => StepValidationResponse {
                valid: true,
                next_step,
                errors: FieldErrors::new(),
            },
            Err(errors) => StepValidationResponse {
                valid: false,
                next_step: self.step,
                errors,
            },
        }
    }
}
