//! # Error Handling Middleware
//!
//! Maps [`BookingError`] values to HTTP status codes and JSON error bodies so
//! every handler reports failures the same way.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use klawed_core::errors::BookingError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use klawed_api::middleware::error_handling::AppError;
/// use klawed_core::errors::BookingError;
///
/// async fn handler(found: bool) -> Result<Json<&'static str>, AppError> {
///     if !found {
///         return Err(AppError(BookingError::NotFound("appointment".to_string())));
///     }
///     Ok(Json("ok"))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub BookingError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::Validation(_) => StatusCode::BAD_REQUEST,
            BookingError::InvalidForm(_) => StatusCode::UNPROCESSABLE_ENTITY,
            BookingError::Conflict(_) => StatusCode::CONFLICT,
            BookingError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            BookingError::Authentication(_) => StatusCode::UNAUTHORIZED,
            BookingError::Authorization(_) => StatusCode::FORBIDDEN,
            BookingError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BookingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        }

        let message = self.0.to_string();
        let body = match &self.0 {
            BookingError::InvalidForm(errors) => json!({ "error": message, "errors": errors }),
            _ => json!({ "error": message }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}

/// Repository failures surface as database errors
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(BookingError::Database(err))
    }
}

/// Maps a BookingError to an HTTP response
pub fn map_error(err: BookingError) -> Response {
    AppError(err).into_response()
}
