//! Common types used across Digital Slope
//!
//! This module provides the contract vocabulary used throughout the
//! pricing crates.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// Digital contract type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContractType {
    /// Pays if spot finishes above the strike
    Call,
    /// Pays if spot finishes below the strike
    Put,
    /// Pays if spot finishes outside the two barriers
    ExpiryMiss,
    /// Pays if spot finishes between the two barriers
    ExpiryRange,
}

impl ContractType {
    /// Canonical selector string
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::Call => "CALL",
            ContractType::Put => "PUT",
            ContractType::ExpiryMiss => "EXPIRYMISS",
            ContractType::ExpiryRange => "EXPIRYRANGE",
        }
    }

    /// Returns true for the single-strike call/put contracts
    pub fn is_single_barrier(&self) -> bool {
        matches!(self, ContractType::Call | ContractType::Put)
    }

    /// +1 for calls, -1 for everything else
    pub fn call_sign(&self) -> f64 {
        match self {
            ContractType::Call => 1.0,
            _ => -1.0,
        }
    }
}

impl std::fmt::Display for ContractType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CALL" => Ok(ContractType::Call),
            "PUT" => Ok(ContractType::Put),
            "EXPIRYMISS" => Ok(ContractType::ExpiryMiss),
            "EXPIRYRANGE" => Ok(ContractType::ExpiryRange),
            _ => Err(ValidationError::InvalidContractType(s.to_string())),
        }
    }
}

/// Accepts any casing, like `FromStr`
impl<'de> Deserialize<'de> for ContractType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Currency convention the probability is expressed and discounted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PricingCurrency {
    /// Payoff in the base (foreign) currency
    Base,
    /// Payoff in the numeraire (domestic) currency
    #[default]
    Numeraire,
    /// Payoff in a third currency at a fixed conversion
    Quanto,
}

impl PricingCurrency {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingCurrency::Base => "base",
            PricingCurrency::Numeraire => "numeraire",
            PricingCurrency::Quanto => "quanto",
        }
    }
}

impl std::fmt::Display for PricingCurrency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PricingCurrency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "base" => Ok(PricingCurrency::Base),
            "numeraire" => Ok(PricingCurrency::Numeraire),
            "quanto" => Ok(PricingCurrency::Quanto),
            _ => Err(ValidationError::InvalidPricingCurrency(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for PricingCurrency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Market classes that carry the traded-market markup stack
pub const TRADED_MARKETS: &[&str] = &["forex", "commodities", "indices"];

/// Market class that attracts the smile uncertainty markup
pub const INDICES_MARKET: &str = "indices";

/// Returns true if the market class is a traded market (case-insensitive).
///
/// Any class ending in `_basket` counts as traded.
pub fn is_traded_market(market: &str) -> bool {
    let market = market.to_lowercase();
    TRADED_MARKETS.contains(&market.as_str()) || market.ends_with("_basket")
}

/// One day on the 365-day year count
pub const ONE_DAY: f64 = 1.0 / 365.0;

/// A contract of at most one day (in years) is intraday
pub fn is_intraday(time_to_expiry: f64) -> bool {
    time_to_expiry <= ONE_DAY
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_contract_type_parse() {
        assert_eq!("CALL".parse::<ContractType>(), Ok(ContractType::Call));
        assert_eq!("put".parse::<ContractType>(), Ok(ContractType::Put));
        assert_eq!("ExpiryMiss".parse::<ContractType>(), Ok(ContractType::ExpiryMiss));
        assert_eq!("EXPIRYRANGE".parse::<ContractType>(), Ok(ContractType::ExpiryRange));

        assert_matches!(
            "ONETOUCH".parse::<ContractType>(),
            Err(ValidationError::InvalidContractType(s)) if s == "ONETOUCH"
        );
    }

    #[test]
    fn test_pricing_currency_parse() {
        assert_eq!("NUMERAIRE".parse::<PricingCurrency>(), Ok(PricingCurrency::Numeraire));
        assert_eq!("base".parse::<PricingCurrency>(), Ok(PricingCurrency::Base));
        assert_eq!("Quanto".parse::<PricingCurrency>(), Ok(PricingCurrency::Quanto));

        assert_matches!(
            "domestic".parse::<PricingCurrency>(),
            Err(ValidationError::InvalidPricingCurrency(_))
        );
    }

    #[test]
    fn test_contract_type_serde() {
        let json = serde_json::to_string(&ContractType::ExpiryRange).unwrap();
        assert_eq!(json, "\"EXPIRYRANGE\"");

        let parsed: ContractType = serde_json::from_str("\"EXPIRYMISS\"").unwrap();
        assert_eq!(parsed, ContractType::ExpiryMiss);

        let currency: PricingCurrency = serde_json::from_str("\"quanto\"").unwrap();
        assert_eq!(currency, PricingCurrency::Quanto);
        assert_eq!(serde_json::to_string(&currency).unwrap(), "\"quanto\"");
    }

    #[test]
    fn test_serde_accepts_any_case() {
        let currency: PricingCurrency = serde_json::from_str("\"NUMERAIRE\"").unwrap();
        assert_eq!(currency, PricingCurrency::Numeraire);

        let contract_type: ContractType = serde_json::from_str("\"call\"").unwrap();
        assert_eq!(contract_type, ContractType::Call);

        let err = serde_json::from_str::<PricingCurrency>("\"DOMESTIC\"").unwrap_err();
        assert!(err.to_string().contains("Unsupported pricing currency: DOMESTIC"));

        let err = serde_json::from_str::<ContractType>("\"ONETOUCH\"").unwrap_err();
        assert!(err.to_string().contains("Unsupported contract type: ONETOUCH"));
    }

    #[test]
    fn test_single_barrier() {
        assert!(ContractType::Call.is_single_barrier());
        assert!(ContractType::Put.is_single_barrier());
        assert!(!ContractType::ExpiryMiss.is_single_barrier());
        assert!(!ContractType::ExpiryRange.is_single_barrier());
    }

    #[test]
    fn test_call_sign() {
        assert_eq!(ContractType::Call.call_sign(), 1.0);
        assert_eq!(ContractType::Put.call_sign(), -1.0);
        assert_eq!(ContractType::ExpiryMiss.call_sign(), -1.0);
    }

    #[test]
    fn test_traded_markets() {
        assert!(is_traded_market("forex"));
        assert!(is_traded_market("Commodities"));
        assert!(is_traded_market("INDICES"));
        assert!(is_traded_market("forex_basket"));
        assert!(is_traded_market("commodity_basket"));

        assert!(!is_traded_market("crypto"));
        assert!(!is_traded_market("synthetic_index"));
    }

    #[test]
    fn test_is_intraday() {
        assert!(is_intraday(ONE_DAY));
        assert!(is_intraday(0.5 / 365.0));
        assert!(!is_intraday(2.0 / 365.0));
    }
}
