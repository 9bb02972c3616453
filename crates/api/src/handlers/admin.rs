//! # Admin Console Handlers
//!
//! Login for the single studio account and the console views built on it:
//! the appointment list with status changes and the dashboard counters.
//! Inquiry and gallery administration live with their public handlers.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use klawed_core::{
    errors::BookingError,
    models::{
        admin::{AdminUser, DashboardStats, LoginRequest, LoginResponse, LogoutResponse},
        appointment::{
            Appointment, AppointmentFilter, AppointmentStatus, UpdateAppointmentStatusRequest,
            UpdateAppointmentStatusResponse,
        },
        inquiry::InquiryStatus,
        Page,
    },
};
use klawed_db::repositories::{
    appointment as appointment_repo, gallery as gallery_repo, inquiry as inquiry_repo,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    middleware::{
        auth::{verify_password, AdminSession},
        error_handling::AppError,
    },
    ApiState,
};

/// Exchanges the admin email and password for a bearer token
#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let email_matches = request.email.trim().eq_ignore_ascii_case(&state.admin.email);
    let password_matches = verify_password(&state.admin.password_hash, &request.password)
        .map_err(|e| BookingError::Internal(e.into()))?;

    if !(email_matches && password_matches) {
        tracing::warn!("Rejected admin login for {}", request.email.trim());
        return Err(AppError(BookingError::Authentication(
            "Invalid email or password".to_string(),
        )));
    }

    let (token, session) = state.sessions.create(&state.admin.email).await;
    tracing::info!("Admin {} logged in", session.email);

    Ok(Json(LoginResponse {
        token,
        user: AdminUser {
            uid: session.email.to_lowercase(),
            email: session.email,
            is_admin: true,
        },
        expires_at: session.expires_at,
    }))
}

#[axum::debug_handler]
pub async fn logout(
    session: AdminSession,
    State(state): State<Arc<ApiState>>,
) -> Json<LogoutResponse> {
    let logged_out = state.sessions.revoke(&session.token).await;
    Json(LogoutResponse { logged_out })
}

/// Appointment list with status filter, search and 1-based pages
#[axum::debug_handler]
pub async fn list_appointments(
    _session: AdminSession,
    State(state): State<Arc<ApiState>>,
    Query(filter): Query<AppointmentFilter>,
) -> Result<Json<Page<Appointment>>, AppError> {
    let appointments = appointment_repo::list_appointments(&state.db_pool)
        .await?
        .into_iter()
        .map(Appointment::try_from)
        .collect::<eyre::Result<Vec<_>>>()?;

    let page = filter.apply(appointments).map_err(BookingError::Validation)?;
    Ok(Json(page))
}

#[axum::debug_handler]
pub async fn update_appointment_status(
    session: AdminSession,
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateAppointmentStatusRequest>,
) -> Result<Json<UpdateAppointmentStatusResponse>, AppError> {
    let row = appointment_repo::update_appointment_status(&state.db_pool, id, request.status.as_str())
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Appointment {}", id)))?;
    let appointment = Appointment::try_from(row)?;

    tracing::info!("{} marked appointment {} as {}", session.email, id, appointment.status);
    Ok(Json(UpdateAppointmentStatusResponse {
        id: appointment.id,
        status: appointment.status,
    }))
}

#[axum::debug_handler]
pub async fn dashboard(
    _session: AdminSession,
    State(state): State<Arc<ApiState>>,
) -> Result<Json<DashboardStats>, AppError> {
    let pool = &state.db_pool;

    let (pending_appointments, new_inquiries, gallery_items, total_clients) = tokio::try_join!(
        appointment_repo::count_appointments_by_status(pool, AppointmentStatus::Pending.as_str()),
        inquiry_repo::count_inquiries_by_status(pool, InquiryStatus::New.as_str()),
        gallery_repo::count_gallery_items(pool),
        appointment_repo::count_distinct_clients(pool),
    )?;

    Ok(Json(DashboardStats {
        pending_appointments,
        new_inquiries,
        gallery_items,
        total_clients,
    }))
}
