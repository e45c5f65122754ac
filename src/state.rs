// src/state.rs
use std::sync::Arc;

use crate::services::product_pages::ProductPageHandler;
use crate::views::Views;

#[derive(Clone)]
pub struct AppState {
    pub pages: Arc<ProductPageHandler>,
    pub views: Arc<Views>,
}

impl AppState {
    pub fn new(pages: ProductPageHandler, views: Views) -> Self {
        Self {
            pages: Arc::new(pages),
            views: Arc::new(views),
        }
    }
}
