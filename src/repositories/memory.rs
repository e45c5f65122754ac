//! In-process fakes for page and router tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{CategoryRepository, ProductRepository, RepositoryError};
use crate::dtos::product::ProductInput;
use crate::models::{category::Category, product::Product};

#[derive(Default)]
struct Rows {
    products: BTreeMap<i64, Product>,
    next_id: i64,
}

#[derive(Default)]
pub struct InMemoryProductRepository {
    rows: Mutex<Rows>,
    add_calls: AtomicUsize,
    update_calls: AtomicUsize,
}

impl InMemoryProductRepository {
    pub fn with_products(products: Vec<Product>) -> Self {
        let next_id = products.iter().map(|p| p.id).max().unwrap_or(0);
        let products = products.into_iter().map(|p| (p.id, p)).collect();
        Self {
            rows: Mutex::new(Rows { products, next_id }),
            ..Self::default()
        }
    }

    pub fn snapshot(&self) -> Vec<Product> {
        self.rows.lock().unwrap().products.values().cloned().collect()
    }

    pub fn add_calls(&self) -> usize {
        self.add_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }
}

fn sorted(mut products: Vec<Product>) -> Vec<Product> {
    products.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    products
}

fn to_product(id: i64, input: &ProductInput) -> Product {
    Product {
        id,
        name: input.name.clone(),
        description: input.description.clone(),
        price: input.price,
        category_id: input.category_id,
        image_url: input.image_url.clone(),
        created_at: None,
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn get_all(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(sorted(self.snapshot()))
    }

    async fn search_by_name(&self, name: &str) -> Result<Vec<Product>, RepositoryError> {
        let needle = name.to_lowercase();
        Ok(sorted(
            self.snapshot()
                .into_iter()
                .filter(|p| p.name.to_lowercase().contains(&needle))
                .collect(),
        ))
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Product>, RepositoryError> {
        Ok(self.rows.lock().unwrap().products.get(&id).cloned())
    }

    async fn add(&self, product: &ProductInput) -> Result<Product, RepositoryError> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        rows.next_id += 1;
        let product = to_product(rows.next_id, product);
        rows.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update(&self, id: i64, product: &ProductInput) -> Result<Option<Product>, RepositoryError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.products.get_mut(&id).map(|row| {
            *row = to_product(id, product);
            row.clone()
        }))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError> {
        self.rows.lock().unwrap().products.remove(&id);
        Ok(())
    }
}

pub struct InMemoryCategoryRepository {
    categories: Vec<Category>,
}

impl InMemoryCategoryRepository {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn get_all(&self) -> Result<Vec<Category>, RepositoryError> {
        Ok(self.categories.clone())
    }
}
