use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/inquiries", post(handlers::inquiry::create_inquiry))
        .route("/api/admin/inquiries", get(handlers::inquiry::list_inquiries))
        .route(
            "/api/admin/inquiries/:id/status",
            put(handlers::inquiry::update_inquiry_status),
        )
}
