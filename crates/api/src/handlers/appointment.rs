//! # Appointment Handlers
//!
//! Booking requests from the public form. A request is only written once the
//! whole form validates and the requested start time is still offered.

use axum::{extract::State, http::StatusCode, Json};
use chrono::NaiveTime;
use klawed_core::{
    booked::local_to_utc,
    errors::BookingError,
    form::{BookingDraft, BookingFlow, StepValidationRequest, StepValidationResponse},
    models::appointment::{Appointment, CreateAppointmentResponse, APPOINTMENT_DURATION_MINUTES},
    slots::format_hhmm,
    validation::FormVariant,
};
use klawed_db::repositories::appointment as appointment_repo;
use std::sync::Arc;

use crate::{handlers::availability::day_slots, middleware::error_handling::AppError, ApiState};

/// Submits a booking request
///
/// # Endpoint
///
/// ```text
/// POST /api/appointments
/// ```
///
/// Answers 201 with the stored request, 422 with per-field errors when the
/// form is incomplete, or 409 when the chosen time was taken meanwhile.
#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    Json(draft): Json<BookingDraft>,
) -> Result<(StatusCode, Json<CreateAppointmentResponse>), AppError> {
    let window = state.booking_window();
    let booking =
        BookingFlow::complete(&draft, state.schedule_rules(&window)).map_err(BookingError::InvalidForm)?;

    let requested = format_hhmm(booking.start_minute);
    let day = day_slots(&state, booking.date).await?;
    if !day.slots.iter().any(|slot| slot.value == requested) {
        return Err(AppError(BookingError::Conflict(format!(
            "{} on {} is no longer available",
            requested, booking.date
        ))));
    }

    let start = NaiveTime::from_hms_opt(booking.start_minute / 60, booking.start_minute % 60, 0)
        .ok_or_else(|| BookingError::Validation(format!("Invalid start time {}", requested)))?;
    let slot = local_to_utc(state.timezone, booking.date.and_time(start));

    let row = appointment_repo::create_appointment(
        &state.db_pool,
        &draft,
        slot,
        APPOINTMENT_DURATION_MINUTES,
    )
    .await?;
    let appointment = Appointment::try_from(row)?;

    tracing::info!(
        "Booking request {} for {} at {}",
        appointment.id,
        booking.date,
        requested
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateAppointmentResponse {
            id: appointment.id,
            appointment_datetime_slot: appointment.appointment_datetime_slot,
            duration: appointment.duration,
            status: appointment.status,
            message: FormVariant::Booking.success_message().to_string(),
        }),
    ))
}

/// Checks one step of the booking form
///
/// # Endpoint
///
/// ```text
/// POST /api/appointments/validate
/// ```
#[axum::debug_handler]
pub async fn validate_step(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<StepValidationRequest>,
) -> Json<StepValidationResponse> {
    let window = state.booking_window();
    Json(request.evaluate(state.schedule_rules(&window)))
}
