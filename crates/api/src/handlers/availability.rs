//! # Availability Handlers
//!
//! Answers the two questions the booking calendar asks: which days can be
//! picked at all, and which start times are still free on a given day.
//!
//! Free times are recomputed from a fresh read of the booked appointments on
//! every request. When that read fails the configured
//! [`FetchFailurePolicy`](klawed_core::booked::FetchFailurePolicy) decides
//! between offering every slot (flagged as `degraded`) and answering 503.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use klawed_core::{
    booked::{fetch_booked_slots, DayKey},
    errors::{BookingError, BookingResult},
    models::availability::{DaySlotsResponse, DaysQuery, DaysResponse, SlotsQuery, MAX_DAY_RANGE},
    slots::generate_slots,
};
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

/// Lists the free start times of one day
///
/// # Endpoint
///
/// ```text
/// GET /api/availability/slots?date=2026-10-15
/// ```
///
/// Weekends and blocked dates answer with an empty list. Dates outside the
/// booking window are rejected with 400.
#[axum::debug_handler]
pub async fn get_slots(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<DaySlotsResponse>, AppError> {
    let window = state.booking_window();
    if !window.contains_day(query.date) {
        return Err(AppError(BookingError::Validation(format!(
            "{} is outside the booking window {} to {}",
            query.date,
            window.first_day(),
            window.last_day()
        ))));
    }

    Ok(Json(day_slots(&state, query.date).await?))
}

/// Free slots for `date`, honouring the calendar and the fetch policy
pub(crate) async fn day_slots(state: &ApiState, date: NaiveDate) -> BookingResult<DaySlotsResponse> {
    let day_key = DayKey::from(date).to_string();

    if state.calendar.is_date_unavailable(date) {
        tracing::debug!("{} is closed, no slots offered", date);
        return Ok(DaySlotsResponse {
            date,
            day_key,
            unavailable: true,
            degraded: false,
            slots: Vec::new(),
        });
    }

    // The whole window is read, as the calendar widget does, then indexed by day.
    let window = state.booking_window();
    let booked = fetch_booked_slots(
        state.booked.as_ref(),
        &window,
        state.timezone,
        state.fetch_policy,
    )
    .await?;

    let slots = generate_slots(booked.for_day(date), &state.hours, state.buffer_policy);
    tracing::debug!(
        "{} has {} booked, {} free slots",
        date,
        booked.for_day(date).len(),
        slots.len()
    );

    Ok(DaySlotsResponse {
        date,
        day_key,
        unavailable: false,
        degraded: booked.degraded,
        slots,
    })
}

/// Flags every day in a range as selectable or not
///
/// # Endpoint
///
/// ```text
/// GET /api/availability/days?from=2026-10-14&to=2026-11-14
/// ```
///
/// Both bounds default to the booking window. At most 93 days are listed.
#[axum::debug_handler]
pub async fn get_days(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<DaysQuery>,
) -> Result<Json<DaysResponse>, AppError> {
    let window = state.booking_window();
    let from = query.from.unwrap_or_else(|| window.first_day());
    let to = query.to.unwrap_or_else(|| window.last_day());

    if to < from {
        return Err(AppError(BookingError::Validation(format!(
            "Range end {} is before its start {}",
            to, from
        ))));
    }

    let span = (to - from).num_days() + 1;
    if span > MAX_DAY_RANGE {
        return Err(AppError(BookingError::Validation(format!(
            "At most {} days can be listed, {} requested",
            MAX_DAY_RANGE, span
        ))));
    }

    Ok(Json(DaysResponse {
        from,
        to,
        days: state.calendar.days_between(from, to),
    }))
}
