//! Product records and mutation payloads
//!
//! Wire names follow the catalog's storage columns (`nome`, `categoria`,
//! `marca`, `aplicacao_veicular`, `descricao`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Product identifier assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stored product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Identifier
    pub id: ProductId,
    /// Name
    #[serde(rename = "nome")]
    pub name: String,
    /// Category
    #[serde(rename = "categoria")]
    pub category: String,
    /// Brand
    #[serde(rename = "marca", default)]
    pub brand: Option<String>,
    /// Vehicle application
    #[serde(rename = "aplicacao_veicular", default)]
    pub vehicle_application: Option<String>,
    /// Generated description; `None` for rows written before descriptions existed
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    /// Creation time
    #[serde(rename = "criado_em")]
    pub created_at: DateTime<Utc>,
    /// Last update time
    #[serde(rename = "atualizado_em")]
    pub updated_at: DateTime<Utc>,
}

/// Fields of a product as written to the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFields {
    /// Name
    #[serde(rename = "nome")]
    pub name: String,
    /// Category
    #[serde(rename = "categoria")]
    pub category: String,
    /// Brand
    #[serde(rename = "marca")]
    pub brand: Option<String>,
    /// Vehicle application
    #[serde(rename = "aplicacao_veicular")]
    pub vehicle_application: Option<String>,
    /// Description, blank when none could be generated
    #[serde(rename = "descricao")]
    pub description: String,
}

/// Create payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewProduct {
    /// Name
    #[serde(rename = "nome")]
    pub name: String,
    /// Category
    #[serde(rename = "categoria")]
    pub category: String,
    /// Brand
    #[serde(rename = "marca", default)]
    pub brand: Option<String>,
    /// Vehicle application
    #[serde(rename = "aplicacao_veicular", default)]
    pub vehicle_application: Option<String>,
}

impl NewProduct {
    /// Create payload with the required fields
    #[must_use]
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            brand: None,
            vehicle_application: None,
        }
    }

    /// With brand
    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// With vehicle application
    #[must_use]
    pub fn with_vehicle_application(mut self, application: impl Into<String>) -> Self {
        self.vehicle_application = Some(application.into());
        self
    }
}

/// Update payload
///
/// `brand` and `vehicle_application` keep three states: omitted (`None`),
/// explicitly null (`Some(None)`), or set (`Some(Some(_))`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductPatch {
    /// New name
    #[serde(rename = "nome", default)]
    pub name: Option<String>,
    /// New category
    #[serde(rename = "categoria", default)]
    pub category: Option<String>,
    /// New brand
    #[serde(rename = "marca", default, deserialize_with = "present")]
    pub brand: Option<Option<String>>,
    /// New vehicle application
    #[serde(rename = "aplicacao_veicular", default, deserialize_with = "present")]
    pub vehicle_application: Option<Option<String>>,
}

impl ProductPatch {
    /// Empty patch
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// With category
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// With brand (`None` clears it)
    #[must_use]
    pub fn with_brand(mut self, brand: Option<&str>) -> Self {
        self.brand = Some(brand.map(str::to_string));
        self
    }

    /// With vehicle application (`None` clears it)
    #[must_use]
    pub fn with_vehicle_application(mut self, application: Option<&str>) -> Self {
        self.vehicle_application = Some(application.map(str::to_string));
        self
    }

    /// Whether no field is present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.brand.is_none()
            && self.vehicle_application.is_none()
    }
}

/// Marks a field as present even when its value is null
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
