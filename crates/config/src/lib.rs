use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod defaults;
pub mod parser;
pub mod smile;
pub mod substitution;
pub mod underlying;
pub mod validator;

pub use defaults::*;
pub use parser::*;
pub use smile::*;
pub use substitution::*;
pub use underlying::*;
pub use validator::*;

/// Master configuration document for the pricing workspace
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PricingConfig {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub markup: MarkupConfig,
    /// Explicit per-symbol underlying entries; symbols not listed fall back
    /// to the prefix rule in [`UnderlyingTable`]
    #[serde(default)]
    pub underlyings: BTreeMap<String, UnderlyingConfig>,
    /// Per-symbol market parameters for the parametric surface builder
    #[serde(default)]
    pub smile_parameters: BTreeMap<String, SmileParameters>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PricingConfig {
    /// Build the underlying lookup table described by this document
    pub fn underlying_table(&self) -> UnderlyingTable {
        UnderlyingTable::from_entries(self.underlyings.clone())
    }

    /// Build the smile parameter lookup described by this document
    pub fn smile_table(&self) -> SmileParameterTable {
        SmileParameterTable::from_entries(self.smile_parameters.clone())
    }
}

// ==================================================================================
// MARKUP CONFIG
// ==================================================================================

/// Numeric knobs of the risk markup rule stack
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct MarkupConfig {
    #[serde(default = "default_spot_spread_size")]
    pub spot_spread_size: f64,
    #[serde(default = "default_pip_size")]
    pub pip_size: f64,
    /// Vol-spread coefficient applied to |vega|
    #[serde(default = "default_vol_spread")]
    pub vol_spread: f64,
    #[serde(default = "default_equal_tie_amount")]
    pub equal_tie_amount: f64,
    #[serde(default = "default_model_arbitrage_amount")]
    pub model_arbitrage_amount: f64,
    #[serde(default = "default_smile_uncertainty_amount")]
    pub smile_uncertainty_amount: f64,
    #[serde(default)]
    pub hour_end: Option<HourEndConfig>,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            spot_spread_size: default_spot_spread_size(),
            pip_size: default_pip_size(),
            vol_spread: default_vol_spread(),
            equal_tie_amount: default_equal_tie_amount(),
            model_arbitrage_amount: default_model_arbitrage_amount(),
            smile_uncertainty_amount: default_smile_uncertainty_amount(),
            hour_end: None,
        }
    }
}

/// Inputs for the hour-end markup rule
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct HourEndConfig {
    #[serde(default)]
    pub current_spot: f64,
    #[serde(default)]
    pub high_low: HighLow,
    /// Additional knobs consumed by custom hour-end rules
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl HourEndConfig {
    /// Lowest of the current spot and the session low
    pub fn spot_min(&self) -> f64 {
        self.current_spot.min(self.high_low.low)
    }

    /// Highest of the current spot and the session high
    pub fn spot_max(&self) -> f64 {
        self.current_spot.max(self.high_low.high)
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq)]
pub struct HighLow {
    #[serde(default)]
    pub high: f64,
    #[serde(default)]
    pub low: f64,
}

// ==================================================================================
// LOGGING CONFIG
// ==================================================================================

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LoggingConfig {
    /// One of pretty, json, compact
    #[serde(default = "default_log_format")]
    pub format: String,
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
            filter: default_log_filter(),
        }
    }
}
