// src/handlers/product.rs
use axum::{
    extract::{Multipart, Path, Query, State},
    response::Response,
};
use serde::Deserialize;
use tracing::instrument;

use crate::dtos::product::ProductForm;
use crate::error::AppError;
use crate::images::UploadedImage;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProductListParams {
    pub query: Option<String>,
}

/// Reads the multipart product form; unknown parts are ignored.
async fn read_product_form(
    mut multipart: Multipart,
) -> Result<(ProductForm, Option<UploadedImage>), AppError> {
    let mut form = ProductForm::default();
    let mut image = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                image = Some(UploadedImage::new(file_name, bytes));
            }
            "name" => form.name = field.text().await?,
            "description" => form.description = field.text().await?,
            "price" => form.price = field.text().await?,
            "category_id" => form.category_id = field.text().await?,
            "image_url" => form.image_url = Some(field.text().await?),
            _ => {}
        }
    }

    Ok((form, image))
}

// GET /products?query= - List or search products
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ProductListParams>,
) -> Result<Response, AppError> {
    let page = state.pages.list_products(params.query.as_deref()).await?;
    state.views.respond(page)
}

// GET /products/add - Blank add form
#[instrument(skip(state))]
pub async fn show_add_form(State(state): State<AppState>) -> Result<Response, AppError> {
    let page = state.pages.show_add_form().await?;
    state.views.respond(page)
}

// POST /products/add - Create product, optionally with an image
#[instrument(skip(state, multipart))]
pub async fn add_product(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let (form, image) = read_product_form(multipart).await?;
    let page = state.pages.add_product(form, image).await?;
    state.views.respond(page)
}

// GET /products/edit/{id} - Edit form for an existing product
#[instrument(skip(state))]
pub async fn show_edit_form(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let page = state.pages.show_edit_form(id).await?;
    state.views.respond(page)
}

// POST /products/update/{id} - Replace product fields
#[instrument(skip(state, multipart))]
pub async fn update_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let (form, image) = read_product_form(multipart).await?;
    let page = state.pages.update_product(id, form, image).await?;
    state.views.respond(page)
}

// GET /products/delete/{id} - Delete product
#[instrument(skip(state))]
pub async fn delete_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let page = state.pages.delete_product(id).await?;
    state.views.respond(page)
}
