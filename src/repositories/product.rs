// src/repositories/product.rs
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::{ProductRepository, RepositoryError};
use crate::dtos::product::ProductInput;
use crate::models::product::Product;

#[derive(Clone)]
pub struct PgProductRepository {
    db_pool: PgPool,
}

impl PgProductRepository {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }
}

/// Escapes LIKE wildcards so the search term is matched literally.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn get_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, description,
                    price::FLOAT8 AS price,
                    category_id, image_url, created_at
             FROM products ORDER BY name, id"
        )
        .fetch_all(&self.db_pool)
        .await?;

        Ok(products)
    }

    async fn search_by_name(&self, name: &str) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, description,
                    price::FLOAT8 AS price,
                    category_id, image_url, created_at
             FROM products WHERE name ILIKE $1 ESCAPE '\\' ORDER BY name, id"
        )
        .bind(like_pattern(name))
        .fetch_all(&self.db_pool)
        .await?;

        Ok(products)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, description,
                    price::FLOAT8 AS price,
                    category_id, image_url, created_at
             FROM products WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(product)
    }

    async fn add(&self, product: &ProductInput) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            "INSERT INTO products (name, description, price, category_id, image_url)
             VALUES ($1, $2, $3, $4, $5) RETURNING id, name, description,
                    price::FLOAT8 AS price,
                    category_id, image_url, created_at"
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.category_id)
        .bind(&product.image_url)
        .fetch_one(&self.db_pool)
        .await?;

        Ok(product)
    }

    async fn update(&self, id: i64, product: &ProductInput) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            "UPDATE products SET
             name = $1,
             description = $2,
             price = $3,
             category_id = $4,
             image_url = $5
             WHERE id = $6 RETURNING id, name, description,
                    price::FLOAT8 AS price,
                    category_id, image_url, created_at"
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.category_id)
        .bind(&product.image_url)
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(product)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.db_pool)
            .await?;

        if result.rows_affected() == 0 {
            debug!(id, "Delete matched no product");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn like_pattern_wraps_and_escapes() {
        assert_eq!(like_pattern("lamp"), "%lamp%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern(""), "%%");
    }

    // The tests below run the SQL against a real database: each gets a fresh
    // schema from ./migrations. Run with DATABASE_URL set and `--ignored`.
    mod postgres {
        use sqlx::PgPool;

        use super::super::PgProductRepository;
        use crate::dtos::product::ProductInput;
        use crate::repositories::ProductRepository;

        fn input(name: &str, price: f64) -> ProductInput {
            ProductInput {
                name: name.into(),
                description: None,
                price,
                category_id: None,
                image_url: None,
            }
        }

        fn names(products: &[crate::models::product::Product]) -> Vec<&str> {
            products.iter().map(|p| p.name.as_str()).collect()
        }

        #[sqlx::test(migrations = "./migrations")]
        #[ignore = "needs a Postgres DATABASE_URL"]
        async fn add_then_read_back(pool: PgPool) {
            let repo = PgProductRepository::new(pool);

            let added = repo
                .add(&ProductInput {
                    image_url: Some("/uploads/widget.jpg".into()),
                    ..input("Widget", 9.99)
                })
                .await
                .unwrap();
            let found = repo.get_by_id(added.id).await.unwrap().unwrap();

            assert_eq!(found.name, "Widget");
            assert_eq!(found.price, 9.99);
            assert_eq!(found.image_url.as_deref(), Some("/uploads/widget.jpg"));
            assert!(found.created_at.is_some());
            assert!(repo.get_by_id(added.id + 1).await.unwrap().is_none());
        }

        #[sqlx::test(migrations = "./migrations")]
        #[ignore = "needs a Postgres DATABASE_URL"]
        async fn search_is_case_insensitive_and_literal(pool: PgPool) {
            let repo = PgProductRepository::new(pool);
            for name in ["Desk Lamp", "lamp", "50% off", "500 off", "Chair"] {
                repo.add(&input(name, 1.0)).await.unwrap();
            }

            assert_eq!(names(&repo.search_by_name("LAMP").await.unwrap()), vec!["Desk Lamp", "lamp"]);
            assert_eq!(names(&repo.search_by_name("50%").await.unwrap()), vec!["50% off"]);
            assert!(repo.search_by_name("sofa").await.unwrap().is_empty());
            assert_eq!(repo.get_all().await.unwrap().len(), 5);
        }

        #[sqlx::test(migrations = "./migrations")]
        #[ignore = "needs a Postgres DATABASE_URL"]
        async fn update_replaces_row_or_reports_missing(pool: PgPool) {
            let repo = PgProductRepository::new(pool);
            let added = repo.add(&input("Lamp", 20.0)).await.unwrap();

            let updated = repo
                .update(added.id, &ProductInput {
                    description: Some("Brass".into()),
                    ..input("Floor lamp", 49.5)
                })
                .await
                .unwrap()
                .unwrap();
            assert_eq!(updated.id, added.id);
            assert_eq!(updated.name, "Floor lamp");
            assert_eq!(updated.price, 49.5);
            assert_eq!(updated.description.as_deref(), Some("Brass"));

            assert!(repo.update(added.id + 100, &input("Ghost", 1.0)).await.unwrap().is_none());
        }

        #[sqlx::test(migrations = "./migrations")]
        #[ignore = "needs a Postgres DATABASE_URL"]
        async fn delete_of_missing_id_is_ok(pool: PgPool) {
            let repo = PgProductRepository::new(pool);
            let added = repo.add(&input("Lamp", 1.0)).await.unwrap();

            repo.delete_by_id(added.id).await.unwrap();
            repo.delete_by_id(added.id).await.unwrap();

            assert!(repo.get_all().await.unwrap().is_empty());
        }
    }
}
