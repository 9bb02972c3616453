use axum::{routing::post, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/appointments", post(handlers::appointment::create_appointment))
        .route(
            "/api/appointments/validate",
            post(handlers::appointment::validate_step),
        )
}
