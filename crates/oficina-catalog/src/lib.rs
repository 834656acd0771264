//! Oficina Catalog - automotive product catalog
//!
//! Product writes enriched with a generated technical description:
//! - Payload validation
//! - Description policy (generate on create, regenerate on name/category change)
//! - Storage seam with an in-memory implementation
//!
//! # Example
//!
//! ```rust,ignore
//! use oficina_catalog::{CatalogService, InMemoryProductStore, NewProduct};
//! use oficina_genai::{GenerationClient, GenerationConfig, RetryingGenerator};
//!
//! # async fn example() -> Result<(), oficina_catalog::CatalogError> {
//! let config = GenerationConfig::from_env();
//! let generator = RetryingGenerator::with_policy(GenerationClient::from_config(&config), config.retry);
//! let catalog = CatalogService::new(InMemoryProductStore::new(), generator);
//!
//! let id = catalog.create(NewProduct::new("Filtro de óleo", "Motor")).await?;
//! println!("{}", catalog.find(id).await?.description.unwrap_or_default());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod error;
pub mod model;
pub mod policy;
pub mod service;
pub mod store;
pub mod validation;

pub use error::{CatalogError, StoreError};
pub use model::{NewProduct, Product, ProductFields, ProductId, ProductPatch};
pub use policy::{needs_regeneration, DescriptionPolicy};
pub use service::CatalogService;
pub use store::{InMemoryProductStore, ProductStore};
pub use validation::{validate_new, validate_patch, ValidationError};
