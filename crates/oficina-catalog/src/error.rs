//! Error types for the catalog
//!
//! Description generation has no error type of its own: a failed generation
//! only changes which description gets written. Storage failures are the
//! only ones that abort a mutation.

use crate::model::ProductId;
use crate::validation::ValidationError;

/// Storage collaborator failure, propagated unchanged
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Backend unreachable or refused the operation
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Row targeted by an update does not exist
    #[error("product {0} not found in storage")]
    Missing(ProductId),
}

/// Catalog operation failure
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Payload rejected
    #[error("invalid payload: {0}")]
    Validation(#[from] ValidationError),

    /// Product does not exist
    #[error("product not found: {0}")]
    NotFound(ProductId),

    /// Search without a query
    #[error("search query \"q\" is required")]
    MissingQuery,

    /// Storage failed
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl CatalogError {
    /// Whether the caller sent a bad request (as opposed to a server-side failure)
    #[inline]
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::NotFound(_) | Self::MissingQuery
        )
    }
}
