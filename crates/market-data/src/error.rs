//! Market data error types

use common::ContractType;
use thiserror::Error;

/// Errors raised by the pricing primitives and surface queries
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Binary pricing only knows single-barrier selectors
    #[error("Unsupported contract type: {0}")]
    UnsupportedContractType(ContractType),

    #[error("Volatility surface has no tenors")]
    EmptySurface,

    #[error("Smile for tenor {tenor_days}d has no points")]
    EmptySmile { tenor_days: u32 },

    /// Interpolation found no bracket and the smile has no 50 point
    #[error("Smile for tenor {tenor_days}d has no ATM (50) point")]
    MissingAtmPoint { tenor_days: u32 },

    #[error("Invalid volatility surface: {0}")]
    InvalidSurface(String),
}
