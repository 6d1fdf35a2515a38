//! Error types for Drapery
//!
//! Pricing itself never fails: unknown ids and incomplete rows degrade to
//! zero contributions. Errors only come from building catalogs, loading
//! snapshots, and reading settings.

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type alias using DraperyError
pub type Result<T> = std::result::Result<T, DraperyError>;

/// Unified error type for Drapery operations
#[derive(Debug, Error)]
pub enum DraperyError {
    // Catalog errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    // Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Catalog validation errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Catalog entry has an empty id")]
    EmptyId,

    #[error("Product {id} has a negative price: {price}")]
    NegativePrice { id: String, price: Decimal },

    #[error("Product {id} has a negative discount price: {price}")]
    NegativeDiscountPrice { id: String, price: Decimal },

    #[error("Product {id} has a non-positive fabric width: {width}")]
    InvalidFabricWidth { id: String, width: Decimal },

    #[error("Template {id} has a negative {field}: {value}")]
    NegativeTemplateRate {
        id: String,
        field: &'static str,
        value: Decimal,
    },
}

impl From<serde_json::Error> for DraperyError {
    fn from(err: serde_json::Error) -> Self {
        DraperyError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for DraperyError {
    fn from(err: std::io::Error) -> Self {
        DraperyError::Storage(err.to_string())
    }
}

impl From<anyhow::Error> for DraperyError {
    fn from(err: anyhow::Error) -> Self {
        DraperyError::Internal(err.to_string())
    }
}
