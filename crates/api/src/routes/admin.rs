use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/admin/login", post(handlers::admin::login))
        .route("/api/admin/logout", post(handlers::admin::logout))
        .route("/api/admin/appointments", get(handlers::admin::list_appointments))
        .route(
            "/api/admin/appointments/:id/status",
            put(handlers::admin::update_appointment_status),
        )
        .route("/api/admin/dashboard", get(handlers::admin::dashboard))
}
