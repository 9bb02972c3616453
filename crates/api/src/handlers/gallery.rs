//! # Gallery Handlers
//!
//! The public portfolio, browsable by tier, and the admin endpoints that
//! curate it.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use klawed_core::{
    errors::BookingError,
    models::gallery::{
        CreateGalleryItemRequest, GalleryItem, GalleryListResponse, GalleryQuery,
        UpdateGalleryItemRequest,
    },
    validation::{validate_gallery_item, validate_gallery_update},
};
use klawed_db::repositories::gallery as gallery_repo;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    middleware::{auth::AdminSession, error_handling::AppError},
    ApiState,
};

#[derive(Debug, Serialize)]
pub struct DeleteGalleryItemResponse {
    pub id: Uuid,
    pub deleted: bool,
}

/// Newest items first, optionally for one tier
#[axum::debug_handler]
pub async fn list_gallery(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<GalleryQuery>,
) -> Result<Json<GalleryListResponse>, AppError> {
    let tier = query.tier_filter().map_err(BookingError::Validation)?;
    let (offset, limit) = (query.offset(), query.limit());

    let items = gallery_repo::list_gallery_items(
        &state.db_pool,
        tier.map(|t| t.as_str()),
        offset,
        limit,
    )
    .await?
    .into_iter()
    .map(GalleryItem::try_from)
    .collect::<eyre::Result<Vec<_>>>()?;

    Ok(Json(GalleryListResponse {
        items,
        offset,
        limit,
    }))
}

#[axum::debug_handler]
pub async fn create_gallery_item(
    session: AdminSession,
    State(state): State<Arc<ApiState>>,
    Json(request): Json<CreateGalleryItemRequest>,
) -> Result<(StatusCode, Json<GalleryItem>), AppError> {
    let url = validate_gallery_item(&request, &state.cdn_cloud_name).map_err(BookingError::InvalidForm)?;

    let item = GalleryItem::try_from(
        gallery_repo::create_gallery_item(&state.db_pool, &request, &url).await?,
    )?;
    tracing::info!("{} added gallery item {} to {}", session.email, item.id, item.tier);

    Ok((StatusCode::CREATED, Json(item)))
}

#[axum::debug_handler]
pub async fn update_gallery_item(
    _session: AdminSession,
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateGalleryItemRequest>,
) -> Result<Json<GalleryItem>, AppError> {
    validate_gallery_update(&request).map_err(BookingError::InvalidForm)?;

    let row = gallery_repo::update_gallery_item(&state.db_pool, id, &request)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Gallery item {}", id)))?;

    Ok(Json(GalleryItem::try_from(row)?))
}

#[axum::debug_handler]
pub async fn delete_gallery_item(
    session: AdminSession,
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteGalleryItemResponse>, AppError> {
    if !gallery_repo::delete_gallery_item(&state.db_pool, id).await? {
        return Err(AppError(BookingError::NotFound(format!("Gallery item {}", id))));
    }

    tracing::info!("{} deleted gallery item {}", session.email, id);
    Ok(Json(DeleteGalleryItemResponse { id, deleted: true }))
}
