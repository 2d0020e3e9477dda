//! Underlying configuration lookup
//!
//! Maps an underlying symbol to its market class and quoting sizes. The
//! pricing engine only sees the [`UnderlyingLookup`] trait so tables can be
//! swapped in tests or loaded from configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::defaults::*;

/// Market and quoting sizes of one underlying
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct UnderlyingConfig {
    pub market: String,
    #[serde(default)]
    pub submarket: String,
    pub pip_size: f64,
    #[serde(default = "default_spot_spread_size")]
    pub spot_spread_size: f64,
}

impl UnderlyingConfig {
    /// Default forex underlying
    pub fn forex() -> Self {
        Self {
            market: default_forex_market(),
            submarket: String::new(),
            pip_size: default_forex_pip_size(),
            spot_spread_size: default_spot_spread_size(),
        }
    }

    /// Default indices underlying
    pub fn indices() -> Self {
        Self {
            market: default_indices_market(),
            submarket: String::new(),
            pip_size: default_indices_pip_size(),
            spot_spread_size: default_spot_spread_size(),
        }
    }

    /// Prefix rule used for symbols with no explicit entry: "frx" symbols
    /// are forex, everything else is treated as indices.
    pub fn by_prefix(symbol: &str) -> Self {
        if symbol.starts_with(&default_forex_prefix()) {
            Self::forex()
        } else {
            Self::indices()
        }
    }
}

/// Lookup collaborator resolving a symbol to its configuration
pub trait UnderlyingLookup: Send + Sync {
    fn by_symbol(&self, symbol: &str) -> UnderlyingConfig;
}

/// Lookup that applies only the prefix rule
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefixUnderlyingLookup;

impl UnderlyingLookup for PrefixUnderlyingLookup {
    fn by_symbol(&self, symbol: &str) -> UnderlyingConfig {
        UnderlyingConfig::by_prefix(symbol)
    }
}

/// Explicit symbol table with prefix-rule fallback
#[derive(Debug, Clone, Default)]
pub struct UnderlyingTable {
    entries: BTreeMap<String, UnderlyingConfig>,
}

impl UnderlyingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: BTreeMap<String, UnderlyingConfig>) -> Self {
        Self { entries }
    }

    pub fn insert(&mut self, symbol: impl Into<String>, config: UnderlyingConfig) {
        self.entries.insert(symbol.into(), config);
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.entries.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl UnderlyingLookup for UnderlyingTable {
    fn by_symbol(&self, symbol: &str) -> UnderlyingConfig {
        match self.entries.get(symbol) {
            Some(config) => config.clone(),
            None => {
                tracing::debug!(symbol, "No underlying entry, applying prefix rule");
                UnderlyingConfig::by_prefix(symbol)
            }
        }
    }
}
