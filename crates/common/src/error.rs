//! Validation errors for pricing requests

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors raised while validating a pricing request, before any
/// computation happens.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Contract type selector is not one of CALL, PUT, EXPIRYMISS, EXPIRYRANGE
    #[error("Unsupported contract type: {0}")]
    InvalidContractType(String),

    /// Pricing currency is not one of base, numeraire, quanto
    #[error("Unsupported pricing currency: {0}")]
    InvalidPricingCurrency(String),

    /// Strike count is not 1 or 2
    #[error("Must provide either 1 or 2 strike prices, got {0}")]
    InvalidStrikeCount(usize),

    /// Expiry is not strictly after start
    #[error("Expiry date {expiry} must be after start date {start}")]
    InvalidDateRange {
        start: DateTime<Utc>,
        expiry: DateTime<Utc>,
    },

    /// Spot and strikes must be finite and strictly positive
    #[error("{field} must be a positive finite number, got {value}")]
    NonPositiveInput { field: &'static str, value: f64 },
}

/// Result type alias for validation
pub type Result<T> = std::result::Result<T, ValidationError>;
