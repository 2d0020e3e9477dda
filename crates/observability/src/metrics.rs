//! Pricing metrics
//!
//! Recorded through the `metrics` facade:
//!
//! * `digital_slope_requests_total{underlying, contract_type}`
//! * `digital_slope_failures_total{underlying, reason}`
//! * `digital_slope_markup{underlying}` - total markup per quote
//! * `digital_slope_probability{underlying}` - final probability per quote
//! * `digital_slope_rule_fired_total{underlying, rule}`
//! * `digital_slope_pricing_duration_seconds{underlying}`

use metrics::{counter, histogram, Histogram};
use std::time::{Duration, Instant};

#[derive(Clone)]
pub struct PricingMetrics {
    underlying: String,
    markup: Histogram,
    probability: Histogram,
    duration: Histogram,
}

impl PricingMetrics {
    pub fn new(underlying: &str) -> Self {
        let name = underlying.to_string();

        Self {
            markup: histogram!("digital_slope_markup", "underlying" => name.clone()),
            probability: histogram!("digital_slope_probability", "underlying" => name.clone()),
            duration: histogram!(
                "digital_slope_pricing_duration_seconds",
                "underlying" => name.clone()
            ),
            underlying: name,
        }
    }

    pub fn record_request(&self, contract_type: &str) {
        counter!(
            "digital_slope_requests_total",
            "underlying" => self.underlying.clone(),
            "contract_type" => contract_type.to_string()
        )
        .increment(1);
    }

    pub fn record_failure(&self, reason: &str) {
        counter!(
            "digital_slope_failures_total",
            "underlying" => self.underlying.clone(),
            "reason" => reason.to_string()
        )
        .increment(1);
    }

    pub fn record_rule_fired(&self, rule: &str) {
        counter!(
            "digital_slope_rule_fired_total",
            "underlying" => self.underlying.clone(),
            "rule" => rule.to_string()
        )
        .increment(1);
    }

    /// Record the outcome of a completed quote
    pub fn record_quote(&self, markup: f64, probability: f64) {
        self.markup.record(markup);
        self.probability.record(probability);
    }

    pub fn record_duration(&self, duration: Duration) {
        self.duration.record(duration.as_secs_f64());
    }

    pub fn underlying(&self) -> &str {
        &self.underlying
    }
}

/// Records the pricing duration when dropped
pub struct PricingTimer<'a> {
    metrics: &'a PricingMetrics,
    start: Instant,
}

impl<'a> PricingTimer<'a> {
    pub fn new(metrics: &'a PricingMetrics) -> Self {
        Self {
            metrics,
            start: Instant::now(),
        }
    }
}

impl Drop for PricingTimer<'_> {
    fn drop(&mut self) {
        self.metrics.record_duration(self.start.elapsed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_recorder_is_noop() {
        let metrics = PricingMetrics::new("frxEURUSD");
        assert_eq!(metrics.underlying(), "frxEURUSD");

        metrics.record_request("CALL");
        metrics.record_failure("invalid_request");
        metrics.record_rule_fired("vol_spread");
        metrics.record_quote(0.035, 0.52);
        {
            let _timer = PricingTimer::new(&metrics);
        }
    }
}
