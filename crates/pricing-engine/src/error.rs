//! Pricing error types

use common::ValidationError;
use market_data::MarketDataError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    MarketData(#[from] MarketDataError),

    /// The slope finite difference needs a positive pip
    #[error("Pip size for {symbol} must be positive, got {pip_size}")]
    InvalidPipSize { symbol: String, pip_size: f64 },
}

impl PricingError {
    /// Short label used as the failure metric reason
    pub fn reason(&self) -> &'static str {
        match self {
            PricingError::Validation(_) => "validation",
            PricingError::MarketData(MarketDataError::UnsupportedContractType(_)) => {
                "unsupported_contract_type"
            }
            PricingError::MarketData(_) => "surface",
            PricingError::InvalidPipSize { .. } => "pip_size",
        }
    }
}
