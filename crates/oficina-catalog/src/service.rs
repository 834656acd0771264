//! Catalog service
//!
//! Validation, description policy and persistence, in that order. Only
//! validation and storage can fail a mutation; generation never does.

use crate::error::CatalogError;
use crate::model::{NewProduct, Product, ProductId, ProductPatch};
use crate::policy::DescriptionPolicy;
use crate::store::ProductStore;
use crate::validation::{validate_new, validate_patch};
use oficina_genai::Generator;

/// Product operations backed by a store and a description generator
#[derive(Debug)]
pub struct CatalogService<S, G> {
    store: S,
    policy: DescriptionPolicy<G>,
}

impl<S: ProductStore, G: Generator> CatalogService<S, G> {
    /// Create service
    #[inline]
    #[must_use]
    pub fn new(store: S, generator: G) -> Self {
        Self {
            store,
            policy: DescriptionPolicy::new(generator),
        }
    }

    /// Underlying store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Description policy
    #[inline]
    #[must_use]
    pub fn policy(&self) -> &DescriptionPolicy<G> {
        &self.policy
    }

    /// Validate, describe and persist a new product
    ///
    /// # Errors
    /// - `CatalogError::Validation` for a rejected payload
    /// - `CatalogError::Storage` when the store fails
    pub async fn create(&self, input: NewProduct) -> Result<ProductId, CatalogError> {
        validate_new(&input)?;
        let fields = self.policy.on_create(input).await;
        let id = self.store.create(fields).await.map_err(|e| {
            tracing::error!(error = %e, "failed to persist new product");
            e
        })?;
        tracing::info!(%id, "product created");
        Ok(id)
    }

    /// Validate and apply a partial update
    ///
    /// # Errors
    /// - `CatalogError::Validation` for a rejected payload
    /// - `CatalogError::NotFound` when `id` does not exist
    /// - `CatalogError::Storage` when the store fails
    pub async fn update(&self, id: ProductId, patch: ProductPatch) -> Result<(), CatalogError> {
        validate_patch(&patch)?;
        let existing = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(id))?;
        let fields = self.policy.on_update(&existing, &patch).await;
        self.store.update(id, fields).await.map_err(|e| {
            tracing::error!(%id, error = %e, "failed to persist product update");
            e
        })?;
        tracing::info!(%id, "product updated");
        Ok(())
    }

    /// All products, newest first
    ///
    /// # Errors
    /// `CatalogError::Storage` when the store fails.
    pub async fn list(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.store.find_all().await?)
    }

    /// Free-text search
    ///
    /// # Errors
    /// - `CatalogError::MissingQuery` for a blank query
    /// - `CatalogError::Storage` when the store fails
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, CatalogError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CatalogError::MissingQuery);
        }
        Ok(self.store.search(query).await?)
    }

    /// One product by id
    ///
    /// # Errors
    /// - `CatalogError::NotFound` when `id` does not exist
    /// - `CatalogError::Storage` when the store fails
    pub async fn find(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(id))
    }
}
