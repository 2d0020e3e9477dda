use common::{is_intraday, is_traded_market, INDICES_MARKET};
use config::MarkupConfig;
use serde::{Deserialize, Serialize};

/// Contracts expiring within 5h01m may be model-arbitraged
pub const POTENTIAL_ARBITRAGE_DURATION_SECS: f64 = 18060.0;
/// Smile uncertainty applies below one week
pub const SMILE_UNCERTAINTY_MAX_TIME: f64 = 7.0 / 365.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkupKind {
    HourEnd,
    VolSpread,
    SpotSpread,
    SmileUncertainty,
    EqualTie,
    ModelArbitrage,
}

impl MarkupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkupKind::HourEnd => "hour_end",
            MarkupKind::VolSpread => "vol_spread",
            MarkupKind::SpotSpread => "spot_spread",
            MarkupKind::SmileUncertainty => "smile_uncertainty",
            MarkupKind::EqualTie => "equal_tie",
            MarkupKind::ModelArbitrage => "model_arbitrage",
        }
    }
}

impl std::fmt::Display for MarkupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the rule stack needs to know about a contract
#[derive(Debug, Clone, PartialEq)]
pub struct MarkupContext {
    pub is_atm: bool,
    pub is_forward_starting: bool,
    /// Years
    pub time_to_expiry: f64,
    /// Lowercased market class
    pub market: String,
    pub underlying_symbol: String,
    pub for_sale: bool,
    pub config: MarkupConfig,
}

impl MarkupContext {
    /// Spot-starting, non-ATM, for-sale context
    pub fn new(time_to_expiry: f64, market: &str, config: MarkupConfig) -> Self {
        Self {
            is_atm: false,
            is_forward_starting: false,
            time_to_expiry,
            market: market.to_lowercase(),
            underlying_symbol: String::new(),
            for_sale: true,
            config,
        }
    }

    pub fn with_atm(mut self, is_atm: bool) -> Self {
        self.is_atm = is_atm;
        self
    }

    pub fn with_forward_starting(mut self, is_forward_starting: bool) -> Self {
        self.is_forward_starting = is_forward_starting;
        self
    }

    pub fn with_for_sale(mut self, for_sale: bool) -> Self {
        self.for_sale = for_sale;
        self
    }

    pub fn with_underlying(mut self, symbol: &str) -> Self {
        self.underlying_symbol = symbol.to_string();
        self
    }

    pub fn is_traded_market(&self) -> bool {
        is_traded_market(&self.market)
    }

    pub fn is_intraday(&self) -> bool {
        is_intraday(self.time_to_expiry)
    }

    pub fn applies_smile_uncertainty(&self) -> bool {
        self.market == INDICES_MARKET
            && self.time_to_expiry < SMILE_UNCERTAINTY_MAX_TIME
            && !self.is_atm
    }

    pub fn within_arbitrage_window(&self) -> bool {
        self.time_to_expiry * 365.0 * 24.0 * 3600.0 <= POTENTIAL_ARBITRAGE_DURATION_SECS
    }

    /// `(spot_min, spot_max)` of the hour-end section, if configured
    pub fn hour_end_window(&self) -> Option<(f64, f64)> {
        self.config
            .hour_end
            .as_ref()
            .map(|hour_end| (hour_end.spot_min(), hour_end.spot_max()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkupContribution {
    pub kind: MarkupKind,
    pub amount: f64,
}

/// Rules that fired, in stack order, and the halved total
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkupBreakdown {
    pub contributions: Vec<MarkupContribution>,
    pub total: f64,
}

impl MarkupBreakdown {
    pub(crate) fn record(&mut self, kind: MarkupKind, amount: f64) {
        self.contributions.push(MarkupContribution { kind, amount });
    }

    /// Sum of the contributions before halving
    pub fn gross(&self) -> f64 {
        self.contributions.iter().map(|c| c.amount).sum()
    }

    pub fn amount(&self, kind: MarkupKind) -> Option<f64> {
        self.contributions
            .iter()
            .find(|c| c.kind == kind)
            .map(|c| c.amount)
    }

    pub fn fired(&self) -> impl Iterator<Item = MarkupKind> + '_ {
        self.contributions.iter().map(|c| c.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_lowercases_market() {
        let ctx = MarkupContext::new(0.1, "ForEx", MarkupConfig::default());
        assert_eq!(ctx.market, "forex");
        assert!(ctx.is_traded_market());

        let crypto = MarkupContext::new(0.1, "crypto", MarkupConfig::default());
        assert!(!crypto.is_traded_market());
    }

    #[test]
    fn test_arbitrage_window_boundary() {
        let inside = MarkupContext::new(18000.0 / (365.0 * 86400.0), "forex", MarkupConfig::default());
        let outside = MarkupContext::new(18100.0 / (365.0 * 86400.0), "forex", MarkupConfig::default());

        assert!(inside.within_arbitrage_window());
        assert!(!outside.within_arbitrage_window());
    }

    #[test]
    fn test_smile_uncertainty_gate() {
        let config = MarkupConfig::default();

        assert!(MarkupContext::new(3.0 / 365.0, "Indices", config.clone()).applies_smile_uncertainty());
        assert!(!MarkupContext::new(3.0 / 365.0, "indices", config.clone())
            .with_atm(true)
            .applies_smile_uncertainty());
        assert!(!MarkupContext::new(7.0 / 365.0, "indices", config.clone()).applies_smile_uncertainty());
        assert!(!MarkupContext::new(3.0 / 365.0, "forex", config).applies_smile_uncertainty());
    }

    #[test]
    fn test_breakdown_accessors() {
        let mut breakdown = MarkupBreakdown::default();
        breakdown.record(MarkupKind::VolSpread, 0.02);
        breakdown.record(MarkupKind::EqualTie, 0.01);

        assert_eq!(breakdown.amount(MarkupKind::VolSpread), Some(0.02));
        assert_eq!(breakdown.amount(MarkupKind::SpotSpread), None);
        assert_eq!(
            breakdown.fired().collect::<Vec<_>>(),
            vec![MarkupKind::VolSpread, MarkupKind::EqualTie]
        );
        assert!((breakdown.gross() - 0.03).abs() < 1e-15);
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&MarkupKind::SmileUncertainty).unwrap();
        assert_eq!(json, "\"smile_uncertainty\"");
        assert_eq!(MarkupKind::ModelArbitrage.to_string(), "model_arbitrage");
    }
}
