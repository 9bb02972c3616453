use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use klawed_core::{
    errors::BookingError,
    models::inquiry::{
        CreateInquiryRequest, CreateInquiryResponse, Inquiry, InquiryQuery,
        UpdateInquiryStatusRequest, UpdateInquiryStatusResponse,
    },
    validation::{validate_inquiry, FormVariant},
};
use klawed_db::repositories::inquiry as inquiry_repo;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    middleware::{auth::AdminSession, error_handling::AppError},
    ApiState,
};

#[axum::debug_handler]
pub async fn create_inquiry(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<CreateInquiryRequest>,
) -> Result<(StatusCode, Json<CreateInquiryResponse>), AppError> {
    validate_inquiry(&request).map_err(BookingError::InvalidForm)?;

    let inquiry = Inquiry::try_from(inquiry_repo::create_inquiry(&state.db_pool, &request).await?)?;
    tracing::info!("Design inquiry {} received", inquiry.id);

    Ok((
        StatusCode::CREATED,
        Json(CreateInquiryResponse {
            id: inquiry.id,
            status: inquiry.status,
            created_at: inquiry.created_at,
            message: FormVariant::Inquiry.success_message().to_string(),
        }),
    ))
}

#[axum::debug_handler]
pub async fn list_inquiries(
    _session: AdminSession,
    State(state): State<Arc<ApiState>>,
    Query(query): Query<InquiryQuery>,
) -> Result<Json<Vec<Inquiry>>, AppError> {
    let status = query.status_filter().map_err(BookingError::Validation)?;

    let inquiries = inquiry_repo::list_inquiries(&state.db_pool, status.map(|s| s.as_str()))
        .await?
        .into_iter()
        .map(Inquiry::try_from)
        .collect::<eyre::Result<Vec<_>>>()?;

    Ok(Json(inquiries))
}

#[axum::debug_handler]
pub async fn update_inquiry_status(
    session: AdminSession,
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateInquiryStatusRequest>,
) -> Result<Json<UpdateInquiryStatusResponse>, AppError> {
    let row = inquiry_repo::update_inquiry_status(&state.db_pool, id, request.status.as_str())
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Inquiry {}", id)))?;
    let inquiry = Inquiry::try_from(row)?;

    tracing::info!("{} marked inquiry {} as {}", session.email, id, inquiry.status);
    Ok(Json(UpdateInquiryStatusResponse {
        id: inquiry.id,
        status: inquiry.status,
    }))
}
