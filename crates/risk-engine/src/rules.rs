//! Markup rule strategies
//!
//! The engine owns the gating (market class, ATM, intraday, forward start);
//! a rule only says how much it contributes once it is reached. The
//! defaults below are installed by [`crate::MarkupEngine::new`].

use market_data::Greeks;

use crate::types::MarkupContext;

/// Largest vol-spread contribution
pub const VOL_SPREAD_CAP: f64 = 0.7;
/// Largest spot-spread contribution
pub const SPOT_SPREAD_CAP: f64 = 0.01;
pub const DEFAULT_EQUAL_TIE_MARKUP: f64 = 0.01;
pub const DEFAULT_MODEL_ARBITRAGE_MARKUP: f64 = 0.05;

pub trait MarkupRule: Send + Sync {
    /// Whether the rule participates at all. Only consulted for the
    /// equal-tie slot, whose state also decides if forward-starting
    /// contracts skip the spread rules.
    fn is_active(&self, _context: &MarkupContext) -> bool {
        true
    }

    fn compute(&self, context: &MarkupContext, greeks: Greeks) -> f64;
}

/// Hour-end rule; the default contributes nothing.
///
/// Custom rules read `context.hour_end_window()` and the raw section in
/// `context.config.hour_end`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HourEndRule;

impl MarkupRule for HourEndRule {
    fn compute(&self, _context: &MarkupContext, _greeks: Greeks) -> f64 {
        0.0
    }
}

/// `min(vol_spread * |vega|, 0.7)`
#[derive(Debug, Clone, Copy, Default)]
pub struct VolSpreadRule;

impl MarkupRule for VolSpreadRule {
    fn compute(&self, context: &MarkupContext, greeks: Greeks) -> f64 {
        (context.config.vol_spread * greeks.vega.abs()).min(VOL_SPREAD_CAP)
    }
}

/// `clamp(spot_spread_size * pip_size * |delta|, 0, 0.01)`
#[derive(Debug, Clone, Copy, Default)]
pub struct SpotSpreadRule;

impl MarkupRule for SpotSpreadRule {
    fn compute(&self, context: &MarkupContext, greeks: Greeks) -> f64 {
        let base = context.config.spot_spread_size * context.config.pip_size;
        (base * greeks.delta.abs()).min(SPOT_SPREAD_CAP).max(0.0)
    }
}

/// The configured smile-uncertainty amount
#[derive(Debug, Clone, Copy, Default)]
pub struct SmileUncertaintyRule;

impl MarkupRule for SmileUncertaintyRule {
    fn compute(&self, context: &MarkupContext, _greeks: Greeks) -> f64 {
        context.config.smile_uncertainty_amount
    }
}

/// Always active; contributes a flat 0.01
#[derive(Debug, Clone, Copy, Default)]
pub struct EqualTieRule;

impl MarkupRule for EqualTieRule {
    fn compute(&self, _context: &MarkupContext, _greeks: Greeks) -> f64 {
        DEFAULT_EQUAL_TIE_MARKUP
    }
}

/// Contributes a flat 0.05
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelArbitrageRule;

impl MarkupRule for ModelArbitrageRule {
    fn compute(&self, _context: &MarkupContext, _greeks: Greeks) -> f64 {
        DEFAULT_MODEL_ARBITRAGE_MARKUP
    }
}

/// Rule that contributes the configured amount of its slot
///
/// `ConfiguredAmount::EqualTie` reads `config.equal_tie_amount` and
/// `ConfiguredAmount::ModelArbitrage` reads `config.model_arbitrage_amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfiguredAmount {
    EqualTie,
    ModelArbitrage,
}

impl MarkupRule for ConfiguredAmount {
    fn compute(&self, context: &MarkupContext, _greeks: Greeks) -> f64 {
        match self {
            ConfiguredAmount::EqualTie => context.config.equal_tie_amount,
            ConfiguredAmount::ModelArbitrage => context.config.model_arbitrage_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use config::MarkupConfig;

    fn context() -> MarkupContext {
        MarkupContext::new(0.1, "forex", MarkupConfig::default())
    }

    #[test]
    fn test_vol_spread_rule_caps() {
        let ctx = context();

        let small = VolSpreadRule.compute(&ctx, Greeks { delta: 0.0, vega: -2.0 });
        assert_relative_eq!(small, 0.02, epsilon = 1e-15);

        let capped = VolSpreadRule.compute(&ctx, Greeks { delta: 0.0, vega: 500.0 });
        assert_eq!(capped, VOL_SPREAD_CAP);
    }

    #[test]
    fn test_spot_spread_rule_caps() {
        let ctx = context();

        // 50 * 0.0001 * 1.0 = 0.005
        let small = SpotSpreadRule.compute(&ctx, Greeks { delta: -1.0, vega: 0.0 });
        assert_relative_eq!(small, 0.005, epsilon = 1e-15);

        let capped = SpotSpreadRule.compute(&ctx, Greeks { delta: 84.0, vega: 0.0 });
        assert_eq!(capped, SPOT_SPREAD_CAP);

        let mut negative = context();
        negative.config.spot_spread_size = -50.0;
        let floored = SpotSpreadRule.compute(&negative, Greeks { delta: 1.0, vega: 0.0 });
        assert_eq!(floored, 0.0);
    }

    #[test]
    fn test_constant_defaults() {
        let ctx = context();
        let greeks = Greeks::default();

        assert_eq!(HourEndRule.compute(&ctx, greeks), 0.0);
        assert_eq!(EqualTieRule.compute(&ctx, greeks), 0.01);
        assert!(EqualTieRule.is_active(&ctx));
        assert_eq!(ModelArbitrageRule.compute(&ctx, greeks), 0.05);
        assert_eq!(SmileUncertaintyRule.compute(&ctx, greeks), 0.05);
    }

    #[test]
    fn test_configured_amounts() {
        let mut ctx = context();
        ctx.config.equal_tie_amount = 0.02;
        ctx.config.model_arbitrage_amount = 0.07;

        assert_eq!(ConfiguredAmount::EqualTie.compute(&ctx, Greeks::default()), 0.02);
        assert_eq!(ConfiguredAmount::ModelArbitrage.compute(&ctx, Greeks::default()), 0.07);
    }
}
