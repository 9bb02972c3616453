use axum::{routing::post, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route("/api/newsletter", post(handlers::newsletter::subscribe))
}
