//! Product storage seam
//!
//! The catalog never talks to a database directly; it hands finished
//! [`ProductFields`] to a [`ProductStore`].

use crate::error::StoreError;
use crate::model::{Product, ProductFields, ProductId};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

/// Persistence collaborator
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Insert a product and return its id
    async fn create(&self, fields: ProductFields) -> Result<ProductId, StoreError>;

    /// All products, newest first
    async fn find_all(&self) -> Result<Vec<Product>, StoreError>;

    /// One product by id
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// Case-insensitive substring search across text columns, newest first
    async fn search(&self, query: &str) -> Result<Vec<Product>, StoreError>;

    /// Overwrite a product's fields
    async fn update(&self, id: ProductId, fields: ProductFields) -> Result<(), StoreError>;
}

/// In-process store
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    rows: RwLock<Vec<Product>>,
}

impl InMemoryProductStore {
    /// Empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing rows (ids are kept as given)
    #[must_use]
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            rows: RwLock::new(products.into_iter().collect()),
        }
    }

    /// Number of stored products
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    /// Whether the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    fn newest_first<'a>(rows: impl Iterator<Item = &'a Product>) -> Vec<Product> {
        let mut out: Vec<Product> = rows.cloned().collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        out
    }
}

fn row_matches(product: &Product, needle: &str) -> bool {
    let contains = |field: &str| field.to_lowercase().contains(needle);
    contains(&product.name)
        || contains(&product.category)
        || product.brand.as_deref().is_some_and(contains)
        || product.description.as_deref().is_some_and(contains)
        || product.vehicle_application.as_deref().is_some_and(contains)
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn create(&self, fields: ProductFields) -> Result<ProductId, StoreError> {
        let mut rows = self.rows.write();
        let id = ProductId(rows.iter().map(|p| p.id.0).max().unwrap_or(0) + 1);
        let now = Utc::now();
        rows.push(Product {
            id,
            name: fields.name,
            category: fields.category,
            brand: fields.brand,
            vehicle_application: fields.vehicle_application,
            description: Some(fields.description),
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn find_all(&self) -> Result<Vec<Product>, StoreError> {
        Ok(Self::newest_first(self.rows.read().iter()))
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        Ok(self.rows.read().iter().find(|p| p.id == id).cloned())
    }

    async fn search(&self, query: &str) -> Result<Vec<Product>, StoreError> {
        let needle = query.to_lowercase();
        Ok(Self::newest_first(
            self.rows.read().iter().filter(|p| row_matches(p, &needle)),
        ))
    }

    async fn update(&self, id: ProductId, fields: ProductFields) -> Result<(), StoreError> {
        let mut rows = self.rows.write();
        let row = rows
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::Missing(id))?;
        row.name = fields.name;
        row.category = fields.category;
        row.brand = fields.brand;
        row.vehicle_application = fields.vehicle_application;
        row.description = Some(fields.description);
        row.updated_at = Utc::now();
        Ok(())
    }
}
