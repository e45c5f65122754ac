//! Product catalog pages: list, add, edit, delete.
//!
//! Every operation is framework-free: it returns a [`Page`] for the HTTP layer
//! to render or redirect, and never touches request or response types.

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, instrument};

use crate::dtos::product::{FieldErrors, ProductForm};
use crate::images::{ImageStore, UploadedImage};
use crate::repositories::{CategoryRepository, ProductRepository, RepositoryError};
use crate::views::{Page, View, ADD_PRODUCT, PRODUCT_LIST, PRODUCT_LIST_PATH, UPDATE_PRODUCT};

pub const IMAGE_WRITE_ERROR: &str = "Could not save image file";

#[derive(Debug, Error)]
pub enum PageError {
    #[error("Invalid product id: {0}")]
    ProductNotFound(i64),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type PageResult = Result<Page, PageError>;

pub struct ProductPageHandler {
    products: Arc<dyn ProductRepository>,
    categories: Arc<dyn CategoryRepository>,
    images: Arc<dyn ImageStore>,
}

impl ProductPageHandler {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        categories: Arc<dyn CategoryRepository>,
        images: Arc<dyn ImageStore>,
    ) -> Self {
        Self {
            products,
            categories,
            images,
        }
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self, query: Option<&str>) -> PageResult {
        let query = query.filter(|q| !q.is_empty());
        let products = match query {
            Some(q) => self.products.search_by_name(q).await?,
            None => self.products.get_all().await?,
        };

        Ok(Page::Render(
            View::new(PRODUCT_LIST)
                .with("products", &products)
                .with("query", query.unwrap_or_default()),
        ))
    }

    pub async fn show_add_form(&self) -> PageResult {
        let view = self
            .form_view(ADD_PRODUCT, &ProductForm::default(), &FieldErrors::new())
            .await?;
        Ok(Page::Render(view))
    }

    #[instrument(skip(self, form, image), fields(name = %form.name))]
    pub async fn add_product(&self, form: ProductForm, image: Option<UploadedImage>) -> PageResult {
        let mut input = match form.validate_input() {
            Ok(input) => input,
            Err(errors) => return self.rerender(ADD_PRODUCT, &form, &errors).await,
        };

        if let Some(image) = image.filter(|i| !i.is_empty()) {
            match self.store_image(&image).await {
                Ok(url) => input.image_url = Some(url),
                Err(errors) => return self.rerender(ADD_PRODUCT, &form, &errors).await,
            }
        }

        let product = self.products.add(&input).await?;
        info!(id = product.id, "Product added");

        Ok(Page::Redirect(PRODUCT_LIST_PATH))
    }

    #[instrument(skip(self))]
    pub async fn show_edit_form(&self, id: i64) -> PageResult {
        let product = self
            .products
            .get_by_id(id)
            .await?
            .ok_or(PageError::ProductNotFound(id))?;

        let view = self
            .form_view(UPDATE_PRODUCT, &ProductForm::from(&product), &FieldErrors::new())
            .await?;
        Ok(Page::Render(view))
    }

    #[instrument(skip(self, form, image))]
    pub async fn update_product(
        &self,
        id: i64,
        mut form: ProductForm,
        image: Option<UploadedImage>,
    ) -> PageResult {
        // The edit form posts back to /products/update/{id}.
        form.id = Some(id);

        let mut input = match form.validate_input() {
            Ok(input) => input,
            Err(errors) => return self.rerender(UPDATE_PRODUCT, &form, &errors).await,
        };

        match image.filter(|i| !i.is_empty()) {
            Some(image) => match self.store_image(&image).await {
                Ok(url) => input.image_url = Some(url),
                Err(errors) => return self.rerender(UPDATE_PRODUCT, &form, &errors).await,
            },
            None => {
                let existing = self
                    .products
                    .get_by_id(id)
                    .await?
                    .ok_or(PageError::ProductNotFound(id))?;
                input.image_url = existing.image_url;
            }
        }

        self.products
            .update(id, &input)
            .await?
            .ok_or(PageError::ProductNotFound(id))?;
        info!("Product updated");

        Ok(Page::Redirect(PRODUCT_LIST_PATH))
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> PageResult {
        self.products.delete_by_id(id).await?;
        Ok(Page::Redirect(PRODUCT_LIST_PATH))
    }

    async fn form_view(
        &self,
        name: &'static str,
        form: &ProductForm,
        errors: &FieldErrors,
    ) -> Result<View, PageError> {
        let categories = self.categories.get_all().await?;
        Ok(View::new(name)
            .with("product", form)
            .with("categories", &categories)
            .with("errors", errors))
    }

    async fn rerender(&self, name: &'static str, form: &ProductForm, errors: &FieldErrors) -> PageResult {
        Ok(Page::Render(self.form_view(name, form, errors).await?))
    }

    async fn store_image(&self, image: &UploadedImage) -> Result<String, FieldErrors> {
        self.images.save(image).await.map_err(|e| {
            error!(error = %e, file_name = %image.file_name, "Failed to save product image");
            let mut errors = FieldErrors::new();
            errors.reject("image", IMAGE_WRITE_ERROR);
            errors
        })
    }
}
