//! Shared types for the pricing primitives

use serde::{Deserialize, Serialize};

/// Inputs of one closed-form evaluation
///
/// Serializes with the field names used by the diagnostic trace
/// (`spot, strike, time, rate, div, vol`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BSInputs {
    pub spot: f64,
    pub strike: f64,
    /// Time to expiry in years
    pub time: f64,
    /// Discount rate
    pub rate: f64,
    /// Carry (dividend / foreign rate) subtracted from the drift
    #[serde(rename = "div")]
    pub carry: f64,
    /// Annualized volatility as a decimal (0.08 = 8%)
    pub vol: f64,
}

impl BSInputs {
    pub fn new(spot: f64, strike: f64, time: f64, rate: f64, carry: f64, vol: f64) -> Self {
        Self {
            spot,
            strike,
            time,
            rate,
            carry,
            vol,
        }
    }

    /// Same inputs at another strike and vol
    pub fn with_strike(self, strike: f64, vol: f64) -> Self {
        Self { strike, vol, ..self }
    }

    pub fn with_vol(self, vol: f64) -> Self {
        Self { vol, ..self }
    }

    /// Zero vol or zero time collapses the lognormal to its payoff
    pub fn is_degenerate(&self) -> bool {
        self.vol <= 0.0 || self.time <= 0.0
    }
}

/// Binary option sensitivities consumed by the markup rules
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// ∂V/∂S
    pub delta: f64,
    /// ∂V/∂σ
    pub vega: f64,
}
