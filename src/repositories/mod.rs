//! Persistence seams used by the product pages.

pub mod category;
pub mod product;
#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::dtos::product::ProductInput;
use crate::models::{category::Category, product::Product};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Product>, RepositoryError>;
    /// Case-insensitive substring match on the product name.
    async fn search_by_name(&self, name: &str) -> Result<Vec<Product>, RepositoryError>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Product>, RepositoryError>;
    async fn add(&self, product: &ProductInput) -> Result<Product, RepositoryError>;
    /// Replaces every column of row `id`; `None` when no such row exists.
    async fn update(&self, id: i64, product: &ProductInput) -> Result<Option<Product>, RepositoryError>;
    /// Deleting a missing id is not an error.
    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Category>, RepositoryError>;
}
