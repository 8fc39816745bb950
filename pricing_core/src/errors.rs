//! # Error Types
//!
//! Structured error types for pricing_core. The engine itself never fails
//! (degenerate selections price to zero), so these errors come from the
//! validation layer and from catalog/config loading. They carry enough
//! context for a form layer to point at the offending field.
//!
//! ## Example
//!
//! ```rust
//! use pricing_core::errors::{PricingError, PricingResult};
//!
//! fn validate_thickness(thickness_mm: f64) -> PricingResult<()> {
//!     if thickness_mm <= 0.0 {
//!         return Err(PricingError::InvalidInput {
//!             field: "thickness_mm".to_string(),
//!             value: thickness_mm.to_string(),
//!             reason: "Thickness must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for pricing_core operations
pub type PricingResult<T> = Result<T, PricingError>;

/// Structured error type for pricing operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum PricingError {
    /// An input value is invalid (out of range, not a stock size, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required input was left empty
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Product family not found in the catalog
    #[error("Product family not found: {family_id}")]
    FamilyNotFound { family_id: String },

    /// Material not found in the catalog
    #[error("Material not found: {material_id}")]
    MaterialNotFound { material_id: String },

    /// Additional option not found in the catalog
    #[error("Option not found: {option_id}")]
    OptionNotFound { option_id: String },

    /// Catalog or config data could not be parsed
    #[error("Catalog error: {reason}")]
    CatalogError { reason: String },

    /// Malformed JSON or TOML input
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Unexpected failure outside the pricing rules
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl PricingError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        PricingError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        PricingError::MissingField {
            field: field.into(),
        }
    }

    /// Create a FamilyNotFound error
    pub fn family_not_found(family_id: impl Into<String>) -> Self {
        PricingError::FamilyNotFound {
            family_id: family_id.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_id: impl Into<String>) -> Self {
        PricingError::MaterialNotFound {
            material_id: material_id.into(),
        }
    }

    /// Create an OptionNotFound error
    pub fn option_not_found(option_id: impl Into<String>) -> Self {
        PricingError::OptionNotFound {
            option_id: option_id.into(),
        }
    }

    /// Create a CatalogError
    pub fn catalog_error(reason: impl Into<String>) -> Self {
        PricingError::CatalogError {
            reason: reason.into(),
        }
    }

    /// Stable code for clients that branch on the error kind
    pub fn error_code(&self) -> &'static str {
        match self {
            PricingError::InvalidInput { .. } => "INVALID_INPUT",
            PricingError::MissingField { .. } => "MISSING_FIELD",
            PricingError::FamilyNotFound { .. } => "FAMILY_NOT_FOUND",
            PricingError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            PricingError::OptionNotFound { .. } => "OPTION_NOT_FOUND",
            PricingError::CatalogError { .. } => "CATALOG_ERROR",
            PricingError::SerializationError { .. } => "SERIALIZATION_ERROR",
            PricingError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for PricingError {
    fn from(err: serde_json::Error) -> Self {
        PricingError::SerializationError {
            reason: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for PricingError {
    fn from(err: toml::de::Error) -> Self {
        PricingError::CatalogError {
            reason: err.to_string(),
        }
    }
}
