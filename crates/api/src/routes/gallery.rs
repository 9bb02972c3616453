use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/gallery", get(handlers::gallery::list_gallery))
        .route("/api/admin/gallery", post(handlers::gallery::create_gallery_item))
        .route(
            "/api/admin/gallery/:id",
            put(handlers::gallery::update_gallery_item)
                .delete(handlers::gallery::delete_gallery_item),
        )
}
