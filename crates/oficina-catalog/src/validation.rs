//! Payload validation
//!
//! Lengths are counted in characters, not bytes.

use crate::model::{NewProduct, ProductPatch};

const NAME_LEN: (usize, usize) = (2, 100);
const CATEGORY_LEN: (usize, usize) = (2, 100);
const BRAND_MAX: usize = 100;
const APPLICATION_MAX: usize = 200;

/// Rejected payload
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Required field missing or blank
    #[error("\"{field}\" is required")]
    Required {
        /// Wire name of the field
        field: &'static str,
    },

    /// Field shorter than allowed
    #[error("\"{field}\" length must be at least {min} characters long")]
    TooShort {
        /// Wire name of the field
        field: &'static str,
        /// Minimum length
        min: usize,
    },

    /// Field longer than allowed
    #[error("\"{field}\" length must be less than or equal to {max} characters long")]
    TooLong {
        /// Wire name of the field
        field: &'static str,
        /// Maximum length
        max: usize,
    },

    /// Update carried no fields
    #[error("update must contain at least 1 field")]
    EmptyPatch,
}

impl ValidationError {
    /// Wire name of the offending field, if any
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Required { field } | Self::TooShort { field, .. } | Self::TooLong { field, .. } => {
                Some(*field)
            }
            Self::EmptyPatch => None,
        }
    }
}

/// Validate a create payload
///
/// # Errors
/// Returns the first violated rule.
pub fn validate_new(input: &NewProduct) -> Result<(), ValidationError> {
    required(&input.name, "nome", NAME_LEN)?;
    required(&input.category, "categoria", CATEGORY_LEN)?;
    optional(input.brand.as_deref(), "marca", BRAND_MAX)?;
    optional(
        input.vehicle_application.as_deref(),
        "aplicacao_veicular",
        APPLICATION_MAX,
    )?;
    Ok(())
}

/// Validate an update payload
///
/// # Errors
/// Returns [`ValidationError::EmptyPatch`] for a patch with no fields, else
/// the first violated rule.
pub fn validate_patch(patch: &ProductPatch) -> Result<(), ValidationError> {
    if patch.is_empty() {
        return Err(ValidationError::EmptyPatch);
    }
    if let Some(name) = &patch.name {
        required(name, "nome", NAME_LEN)?;
    }
    if let Some(category) = &patch.category {
        required(category, "categoria", CATEGORY_LEN)?;
    }
    if let Some(brand) = &patch.brand {
        optional(brand.as_deref(), "marca", BRAND_MAX)?;
    }
    if let Some(application) = &patch.vehicle_application {
        optional(application.as_deref(), "aplicacao_veicular", APPLICATION_MAX)?;
    }
    Ok(())
}

fn required(value: &str, field: &'static str, (min, max): (usize, usize)) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }
    let len = value.chars().count();
    if len < min {
        return Err(ValidationError::TooShort { field, min });
    }
    if len > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

fn optional(value: Option<&str>, field: &'static str, max: usize) -> Result<(), ValidationError> {
    match value {
        Some(value) if value.chars().count() > max => Err(ValidationError::TooLong { field, max }),
        _ => Ok(()),
    }
}
