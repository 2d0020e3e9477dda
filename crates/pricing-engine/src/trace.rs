//! Diagnostic trace of a numeraire quote
//!
//! Serializes as
//! `{bs_probability: {amount, parameters}, slope_adjustment: {amount,
//! parameters: {vanilla_vega: {amount, parameters}, slope}}}` where
//! `parameters` is `{spot, strike, time, rate, div, vol}`.

use market_data::BSInputs;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceAmount {
    pub amount: f64,
    pub parameters: BSInputs,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlopeParameters {
    pub vanilla_vega: TraceAmount,
    pub slope: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlopeTrace {
    pub amount: f64,
    pub parameters: SlopeParameters,
}

/// Trace of one contract type; forward-starting quotes carry no slope entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContractTrace {
    pub bs_probability: TraceAmount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slope_adjustment: Option<SlopeTrace>,
}
