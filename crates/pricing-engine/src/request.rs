use chrono::{DateTime, Duration, Utc};
use common::{ContractType, PricingCurrency, ValidationError};
use config::MarkupConfig;
use serde::{Deserialize, Serialize};

/// Cap on time to expiry, in days
pub const MAX_EXPIRY_DAYS: f64 = 730.0;
/// A start more than this many seconds after pricing is forward-starting
pub const FORWARD_START_THRESHOLD_SECS: f64 = 5.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Everything needed to price one contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRequest {
    pub contract_type: ContractType,
    pub spot: f64,
    /// One strike for CALL/PUT, two barriers for EXPIRYMISS/EXPIRYRANGE
    pub strikes: Vec<f64>,
    pub date_pricing: DateTime<Utc>,
    pub date_start: DateTime<Utc>,
    pub date_expiry: DateTime<Utc>,
    pub discount_rate: f64,
    /// Drift, passed as carry to the closed forms
    pub mu: f64,
    /// Foreign rate
    pub q_rate: f64,
    /// Domestic rate
    pub r_rate: f64,
    #[serde(default)]
    pub priced_with: PricingCurrency,
    pub underlying_symbol: String,
    pub market: String,
    #[serde(default)]
    pub is_atm: bool,
    #[serde(default = "default_for_sale")]
    pub for_sale: bool,
    #[serde(default)]
    pub markup: MarkupConfig,
}

fn default_for_sale() -> bool {
    true
}

fn seconds(duration: Duration) -> f64 {
    duration
        .num_microseconds()
        .map(|us| us as f64 / 1_000_000.0)
        .unwrap_or_else(|| duration.num_seconds() as f64)
}

impl PricingRequest {
    pub fn validate(&self) -> common::Result<()> {
        if !matches!(self.strikes.len(), 1 | 2) {
            return Err(ValidationError::InvalidStrikeCount(self.strikes.len()));
        }

        if self.date_expiry <= self.date_start {
            return Err(ValidationError::InvalidDateRange {
                start: self.date_start,
                expiry: self.date_expiry,
            });
        }

        if !(self.spot.is_finite() && self.spot > 0.0) {
            return Err(ValidationError::NonPositiveInput {
                field: "spot",
                value: self.spot,
            });
        }

        if let Some(&strike) = self.strikes.iter().find(|k| !(k.is_finite() && **k > 0.0)) {
            return Err(ValidationError::NonPositiveInput {
                field: "strike",
                value: strike,
            });
        }

        Ok(())
    }

    /// Years from start to expiry, clamped to `(ε, 2y]`
    pub fn time_to_expiry(&self) -> f64 {
        let days = seconds(self.date_expiry - self.date_start) / SECONDS_PER_DAY;
        days.max(f64::EPSILON).min(MAX_EXPIRY_DAYS) / 365.0
    }

    pub fn is_forward_starting(&self) -> bool {
        seconds(self.date_start - self.date_pricing) > FORWARD_START_THRESHOLD_SECS
    }

    /// The strikes as `(low, high)` when two are given
    pub fn barriers(&self) -> Option<(f64, f64)> {
        match self.strikes.as_slice() {
            [a, b] if a <= b => Some((*a, *b)),
            [a, b] => Some((*b, *a)),
            _ => None,
        }
    }
}
