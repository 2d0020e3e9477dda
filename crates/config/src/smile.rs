//! Market parameters for the parametric volatility surface builder

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::defaults::*;

/// Smile shape and term-structure parameters of one market
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
pub struct SmileParameters {
    /// 10/90-delta wing multiplier on the ATM vol
    #[serde(default = "default_smile_wings")]
    pub smile_wings: f64,
    /// 25/75-delta body multiplier on the ATM vol
    #[serde(default = "default_smile_body")]
    pub smile_body: f64,
    #[serde(default = "default_rr_25")]
    pub rr_25: f64,
    #[serde(default = "default_rr_10")]
    pub rr_10: f64,
    #[serde(default = "default_bf_25")]
    pub bf_25: f64,
    #[serde(default = "default_bf_10")]
    pub bf_10: f64,
    #[serde(default = "default_term_slope")]
    pub term_slope: f64,
    #[serde(default = "default_rr_term")]
    pub rr_term: f64,
    #[serde(default = "default_bf_term")]
    pub bf_term: f64,
}

impl Default for SmileParameters {
    fn default() -> Self {
        Self {
            smile_wings: default_smile_wings(),
            smile_body: default_smile_body(),
            rr_25: default_rr_25(),
            rr_10: default_rr_10(),
            bf_25: default_bf_25(),
            bf_10: default_bf_10(),
            term_slope: default_term_slope(),
            rr_term: default_rr_term(),
            bf_term: default_bf_term(),
        }
    }
}

impl SmileParameters {
    /// Built-in parameters for a market class and symbol.
    ///
    /// Symbols may carry the `frx` prefix. Unknown symbols get the
    /// EURUSD-like defaults.
    pub fn for_market(market: &str, symbol: &str) -> Self {
        let defaults = Self::default();
        let symbol = symbol.strip_prefix("frx").unwrap_or(symbol).to_uppercase();

        match (market.to_lowercase().as_str(), symbol.as_str()) {
            ("forex", "GBPUSD") => Self {
                smile_wings: 1.08,
                rr_25: -0.003,
                rr_10: -0.006,
                ..defaults
            },
            ("forex", "JPYUSD") | ("forex", "USDJPY") => Self {
                smile_wings: 1.04,
                smile_body: 1.01,
                rr_25: -0.001,
                rr_10: -0.002,
                ..defaults
            },
            ("commodities", "XAUUSD") => Self {
                smile_wings: 1.10,
                smile_body: 1.03,
                bf_25: 0.002,
                bf_10: 0.003,
                term_slope: 0.15,
                ..defaults
            },
            _ => defaults,
        }
    }
}

/// Configured smile parameters keyed by symbol, falling back to
/// [`SmileParameters::for_market`]
#[derive(Debug, Clone, Default)]
pub struct SmileParameterTable {
    entries: BTreeMap<String, SmileParameters>,
}

impl SmileParameterTable {
    pub fn from_entries(entries: BTreeMap<String, SmileParameters>) -> Self {
        Self { entries }
    }

    pub fn lookup(&self, market: &str, symbol: &str) -> SmileParameters {
        self.entries
            .get(symbol)
            .copied()
            .unwrap_or_else(|| SmileParameters::for_market(market, symbol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_unknown_symbol() {
        assert_eq!(SmileParameters::for_market("forex", "EURUSD"), SmileParameters::default());
        assert_eq!(SmileParameters::for_market("indices", "OTC_SPC"), SmileParameters::default());
    }

    #[test]
    fn test_market_overrides() {
        let gbp = SmileParameters::for_market("forex", "frxGBPUSD");
        assert_eq!(gbp.smile_wings, 1.08);
        assert_eq!(gbp.rr_10, -0.006);
        assert_eq!(gbp.smile_body, 1.02);

        let jpy = SmileParameters::for_market("forex", "frxUSDJPY");
        assert_eq!(jpy.smile_body, 1.01);

        let gold = SmileParameters::for_market("commodities", "XAUUSD");
        assert_eq!(gold.term_slope, 0.15);
        assert_eq!(gold.bf_10, 0.003);

        // Gold parameters only apply to the commodities market
        assert_eq!(SmileParameters::for_market("forex", "XAUUSD"), SmileParameters::default());
    }

    #[test]
    fn test_table_overrides_builtin() {
        let mut entries = BTreeMap::new();
        entries.insert(
            "frxEURUSD".to_string(),
            SmileParameters {
                smile_wings: 1.2,
                ..SmileParameters::default()
            },
        );
        let table = SmileParameterTable::from_entries(entries);

        assert_eq!(table.lookup("forex", "frxEURUSD").smile_wings, 1.2);
        assert_eq!(table.lookup("forex", "frxGBPUSD").smile_wings, 1.08);
    }
}
