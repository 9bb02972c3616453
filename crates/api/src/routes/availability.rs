use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/availability/slots", get(handlers::availability::get_slots))
        .route("/api/availability/days", get(handlers::availability::get_days))
}
