pub mod products;

use std::path::Path;

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Product pages plus static serving of uploaded images.
pub fn create_router(upload_root: &Path, max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .merge(products::routes())
        .nest_service("/uploads", ServeDir::new(upload_root))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}
