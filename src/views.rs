// src/views.rs
use std::path::Path;

use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Serialize;
use tera::{Context, Tera};
use tracing::debug;

use crate::error::AppError;

pub const PRODUCT_LIST: &str = "products/product-list.html";
pub const ADD_PRODUCT: &str = "products/add-product.html";
pub const UPDATE_PRODUCT: &str = "products/update-product.html";

pub const PRODUCT_LIST_PATH: &str = "/products";

/// A template name plus the data it renders with.
#[derive(Debug)]
pub struct View {
    pub name: &'static str,
    pub data: Context,
}

impl View {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            data: Context::new(),
        }
    }

    pub fn with<T: Serialize + ?Sized>(mut self, key: &str, value: &T) -> Self {
        self.data.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }
}

/// What a page operation asks the HTTP layer to do.
#[derive(Debug)]
pub enum Page {
    Render(View),
    Redirect(&'static str),
}

/// Tera-backed renderer for [`View`]s.
pub struct Views {
    tera: Tera,
}

impl Views {
    /// Templates compiled into the binary.
    pub fn bundled() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", include_str!("../templates/base.html")),
            ("products/form-fields.html", include_str!("../templates/products/form-fields.html")),
            (PRODUCT_LIST, include_str!("../templates/products/product-list.html")),
            (ADD_PRODUCT, include_str!("../templates/products/add-product.html")),
            (UPDATE_PRODUCT, include_str!("../templates/products/update-product.html")),
        ])?;
        Ok(Self { tera })
    }

    /// Loads every `*.html` below `dir`, so templates can be edited without a rebuild.
    pub fn from_dir(dir: &Path) -> Result<Self, tera::Error> {
        let pattern = format!("{}/**/*.html", dir.display());
        let tera = Tera::new(&pattern)?;
        debug!(template_dir = %dir.display(), "Templates loaded");
        Ok(Self { tera })
    }

    pub fn render(&self, view: &View) -> Result<String, tera::Error> {
        self.tera.render(view.name, &view.data)
    }

    pub fn respond(&self, page: Page) -> Result<Response, AppError> {
        match page {
            Page::Render(view) => Ok(Html(self.render(&view)?).into_response()),
            Page::Redirect(to) => Ok(Redirect::to(to).into_response()),
        }
    }
}
