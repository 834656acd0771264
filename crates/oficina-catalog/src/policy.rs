//! Description policy
//!
//! Decides when a product description is generated and how the result is
//! merged into the record:
//! - create: always generate; blank description when nothing comes back
//! - update: regenerate only when the name or category actually changes;
//!   otherwise, or when generation yields nothing, keep the stored description

use crate::model::{NewProduct, Product, ProductFields, ProductPatch};
use oficina_genai::{GenerationRequest, Generator};

/// Merges generated descriptions into product writes
#[derive(Debug, Clone)]
pub struct DescriptionPolicy<G> {
    generator: G,
}

impl<G: Generator> DescriptionPolicy<G> {
    /// Create policy backed by `generator` (normally a retrying generator)
    #[inline]
    #[must_use]
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Generator in use
    #[inline]
    #[must_use]
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Fields to persist for a new product
    pub async fn on_create(&self, input: NewProduct) -> ProductFields {
        let request = GenerationRequest::product(&input.name, &input.category);
        let description = self
            .generator
            .generate(&request)
            .await
            .into_text()
            .unwrap_or_default();
        if description.is_empty() {
            tracing::info!(name = %input.name, "creating product without generated description");
        }

        ProductFields {
            name: input.name,
            category: input.category,
            brand: input.brand,
            vehicle_application: input.vehicle_application,
            description,
        }
    }

    /// Fields to persist after applying `patch` to `existing`
    pub async fn on_update(&self, existing: &Product, patch: &ProductPatch) -> ProductFields {
        let name = patch.name.clone().unwrap_or_else(|| existing.name.clone());
        let category = patch
            .category
            .clone()
            .unwrap_or_else(|| existing.category.clone());
        let mut description = existing.description.clone().unwrap_or_default();

        if needs_regeneration(existing, patch) {
            let request = GenerationRequest::product(&name, &category);
            match self.generator.generate(&request).await.into_text() {
                Some(text) => description = text,
                None => tracing::info!(
                    id = %existing.id,
                    "regeneration produced no text; keeping previous description"
                ),
            }
        } else {
            tracing::debug!(id = %existing.id, "name and category unchanged; description kept");
        }

        ProductFields {
            name,
            category,
            brand: merge_present(&patch.brand, &existing.brand),
            vehicle_application: merge_present(
                &patch.vehicle_application,
                &existing.vehicle_application,
            ),
            description,
        }
    }
}

/// A non-empty name or category that differs from the stored one
#[must_use]
pub fn needs_regeneration(existing: &Product, patch: &ProductPatch) -> bool {
    let changed = |new: &Option<String>, old: &str| {
        new.as_deref().is_some_and(|new| !new.is_empty() && new != old)
    };
    changed(&patch.name, &existing.name) || changed(&patch.category, &existing.category)
}

/// A field present in the patch (even as null) overwrites; absent keeps
fn merge_present(patch: &Option<Option<String>>, existing: &Option<String>) -> Option<String> {
    match patch {
        Some(value) => value.clone(),
        None => existing.clone(),
    }
}
