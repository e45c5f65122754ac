use axum::{
    routing::{get, post},
    Router,
};
use crate::handlers::product::{
    list_products, show_add_form, add_product, show_edit_form, update_product, delete_product
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/add", get(show_add_form).post(add_product))
        .route("/products/edit/{id}", get(show_edit_form))
        .route("/products/update/{id}", post(update_product))
        .route("/products/delete/{id}", get(delete_product))
}
