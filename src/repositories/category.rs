// src/repositories/category.rs
use async_trait::async_trait;
use sqlx::PgPool;

use super::{CategoryRepository, RepositoryError};
use crate::models::category::Category;

#[derive(Clone)]
pub struct PgCategoryRepository {
    db_pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn get_all(&self) -> Result<Vec<Category>, RepositoryError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name FROM categories ORDER BY name, id"
        )
        .fetch_all(&self.db_pool)
        .await?;

        Ok(categories)
    }
}
