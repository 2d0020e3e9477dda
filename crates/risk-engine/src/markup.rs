use market_data::Greeks;
use tracing::debug;

use crate::rules::*;
use crate::types::{MarkupBreakdown, MarkupContext, MarkupKind};

/// Ordered markup rule stack
///
/// Every slot holds a swappable [`MarkupRule`]; the gating of each slot is
/// fixed here.
pub struct MarkupEngine {
    hour_end: Box<dyn MarkupRule>,
    vol_spread: Box<dyn MarkupRule>,
    spot_spread: Box<dyn MarkupRule>,
    smile_uncertainty: Box<dyn MarkupRule>,
    equal_tie: Box<dyn MarkupRule>,
    model_arbitrage: Box<dyn MarkupRule>,
}

impl Default for MarkupEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MarkupEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkupEngine").finish_non_exhaustive()
    }
}

impl MarkupEngine {
    pub fn new() -> Self {
        Self {
            hour_end: Box::new(HourEndRule),
            vol_spread: Box::new(VolSpreadRule),
            spot_spread: Box::new(SpotSpreadRule),
            smile_uncertainty: Box::new(SmileUncertaintyRule),
            equal_tie: Box::new(EqualTieRule),
            model_arbitrage: Box::new(ModelArbitrageRule),
        }
    }

    pub fn with_hour_end_rule(mut self, rule: impl MarkupRule + 'static) -> Self {
        self.hour_end = Box::new(rule);
        self
    }

    pub fn with_vol_spread_rule(mut self, rule: impl MarkupRule + 'static) -> Self {
        self.vol_spread = Box::new(rule);
        self
    }

    pub fn with_spot_spread_rule(mut self, rule: impl MarkupRule + 'static) -> Self {
        self.spot_spread = Box::new(rule);
        self
    }

    pub fn with_smile_uncertainty_rule(mut self, rule: impl MarkupRule + 'static) -> Self {
        self.smile_uncertainty = Box::new(rule);
        self
    }

    pub fn with_equal_tie_rule(mut self, rule: impl MarkupRule + 'static) -> Self {
        self.equal_tie = Box::new(rule);
        self
    }

    pub fn with_model_arbitrage_rule(mut self, rule: impl MarkupRule + 'static) -> Self {
        self.model_arbitrage = Box::new(rule);
        self
    }

    /// Run the stack and return every contribution plus the halved total
    pub fn calculate(&self, context: &MarkupContext, greeks: Greeks) -> MarkupBreakdown {
        let mut breakdown = MarkupBreakdown::default();

        if context.is_traded_market() {
            if context.hour_end_window().is_some() {
                breakdown.record(MarkupKind::HourEnd, self.hour_end.compute(context, greeks));
            }

            let equal_tie_active = self.equal_tie.is_active(context);

            if !(context.is_forward_starting && !equal_tie_active) {
                if !context.is_atm {
                    breakdown.record(MarkupKind::VolSpread, self.vol_spread.compute(context, greeks));
                }

                if !context.is_intraday() {
                    breakdown.record(MarkupKind::SpotSpread, self.spot_spread.compute(context, greeks));
                }

                if context.applies_smile_uncertainty() {
                    breakdown.record(
                        MarkupKind::SmileUncertainty,
                        self.smile_uncertainty.compute(context, greeks),
                    );
                }
            }

            if equal_tie_active {
                breakdown.record(MarkupKind::EqualTie, self.equal_tie.compute(context, greeks));
            }
        }

        if !context.for_sale && context.within_arbitrage_window() {
            breakdown.record(
                MarkupKind::ModelArbitrage,
                self.model_arbitrage.compute(context, greeks),
            );
        }

        breakdown.total = breakdown.gross() / 2.0;

        debug!(
            market = %context.market,
            rules = ?breakdown.fired().collect::<Vec<_>>(),
            total = breakdown.total,
            "Markup calculated"
        );

        breakdown
    }

    /// Halved total only
    pub fn total_markup(&self, context: &MarkupContext, greeks: Greeks) -> f64 {
        self.calculate(context, greeks).total
    }
}
