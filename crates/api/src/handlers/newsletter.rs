use axum::{extract::State, Json};
use klawed_core::{
    errors::BookingError,
    models::newsletter::{SubscribeRequest, SubscribeResponse, DEFAULT_NEWSLETTER_ID},
    validation::{validate_subscription, FormVariant},
};
use klawed_db::repositories::newsletter as newsletter_repo;
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

/// Signs an address up for the studio newsletter; repeating a signup is not an error
#[axum::debug_handler]
pub async fn subscribe(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<SubscribeRequest>,
) -> Result<Json<SubscribeResponse>, AppError> {
    validate_subscription(&request.email).map_err(BookingError::InvalidForm)?;

    let email = request.email.trim().to_string();
    let newly_subscribed =
        newsletter_repo::subscribe(&state.db_pool, &email, DEFAULT_NEWSLETTER_ID).await?;

    Ok(Json(SubscribeResponse {
        email,
        newly_subscribed,
        message: FormVariant::Newsletter.success_message().to_string(),
    }))
}
