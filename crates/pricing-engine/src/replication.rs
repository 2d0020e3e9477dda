//! Smile diagnostics beside the slope method
//!
//! A digital call is the limit of a tight call spread. Pricing the spread
//! one pip wide off the surface gives an independent estimate of the
//! smile-adjusted probability that can be compared with the slope method.
//!
//! The higher-order terms extend the first-order slope correction with the
//! vanna, vomma and skew-convexity terms of the Taylor expansion in strike.
//! They are reported only and never enter the quoted probability.

use common::{is_intraday, ContractType};
use market_data::black_scholes::d1_d2;
use market_data::{vanilla_call, vega_vanilla, BSInputs, MarketDataError};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::{EuropeanDigitalSlope, SLOPE_ADJUSTMENT_CAP};
use crate::Result;

/// Taylor terms of the smile correction, signed for the contract side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HigherOrderAdjustment {
    /// `-vega * skew`, the term the slope adjustment already applies
    pub first_order: f64,
    /// Vanna term `-vanna * skew`
    pub second_order: f64,
    /// Vomma term `-vomma * skew² / 2`
    pub third_order: f64,
    /// `-vega * skew'`
    pub convexity: f64,
    /// Sum of the second-order, third-order and convexity terms, capped at
    /// ±0.03 for intraday contracts
    pub total: f64,
}

impl EuropeanDigitalSlope {
    /// `[C(K) - C(K + pip)] / pip`, undiscounted at the domestic rate
    ///
    /// Each vanilla leg is priced at its own surface vol, so the estimate
    /// carries the smile slope without a separate adjustment term.
    pub fn butterfly_probability(&self) -> Result<f64> {
        let request = self.request();
        let strike = self.first_strike();
        let pip_size = self.pip_size()?;

        let near = self.inputs(strike, self.vol_at(strike)?);
        let far_strike = strike + pip_size;
        let far = self.inputs(far_strike, self.vol_at(far_strike)?);

        let spread = (vanilla_call(&near) - vanilla_call(&far)) / pip_size;
        let probability = spread / (-request.r_rate * self.time_to_expiry()).exp();

        debug!(strike, pip_size, probability, "Butterfly probability");
        Ok(probability)
    }

    /// Vanna, vomma and skew-convexity corrections for a CALL or PUT
    ///
    /// Uses the same three surface points as the slope adjustment. The
    /// Greeks' d1/d2 are taken on the domestic rate with no carry.
    pub fn higher_order_adjustment(&self) -> Result<HigherOrderAdjustment> {
        let request = self.request();
        let contract_type = request.contract_type;
        if !contract_type.is_single_barrier() {
            return Err(MarketDataError::UnsupportedContractType(contract_type).into());
        }

        let strike = self.first_strike();
        let time = self.time_to_expiry();
        let pip_size = self.pip_size()?;

        let vol = self.vol_at(strike)?;
        let vol_up = self.vol_at(strike + pip_size)?;
        let vol_down = self.vol_at(strike - pip_size)?;

        let vega = vega_vanilla(&self.inputs(strike, vol));
        let skew = (vol_up - vol_down) / (2.0 * pip_size);
        let slope_up = (vol_up - vol) / pip_size;
        let slope_down = (vol - vol_down) / pip_size;
        let skew_prime = (slope_up - slope_down) / pip_size;

        let (d1, d2) = d1_d2(&BSInputs::new(request.spot, strike, time, request.r_rate, 0.0, vol));
        let vanna = -d2 / (strike * vol * time.sqrt()) * vega;
        let vomma = vega * d1 * d2 / vol;

        let sign = if contract_type == ContractType::Call { 1.0 } else { -1.0 };
        let first_order = -vega * skew * sign;
        let second_order = -vanna * skew * sign;
        let third_order = -0.5 * vomma * skew * skew * sign;
        let convexity = -vega * skew_prime * sign;

        let mut total = second_order + third_order + convexity;
        if is_intraday(time) {
            total = total.clamp(-SLOPE_ADJUSTMENT_CAP, SLOPE_ADJUSTMENT_CAP);
        }

        debug!(vanna, vomma, skew, skew_prime, total, "Higher-order adjustment");

        Ok(HigherOrderAdjustment {
            first_order,
            second_order,
            third_order,
            convexity,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;
    use chrono::{Duration, TimeZone, Utc};
    use common::PricingCurrency;
    use config::MarkupConfig;
    use market_data::{binary_call, TenorSlice, VolSurface};
    use statrs::distribution::{ContinuousCDF, Normal};
    use std::collections::BTreeMap;

    use crate::request::PricingRequest;
    use crate::PricingError;

    fn request(contract_type: ContractType, days: i64) -> PricingRequest {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        PricingRequest {
            contract_type,
            spot: 1.10,
            strikes: vec![1.1011],
            date_pricing: start,
            date_start: start,
            date_expiry: start + Duration::days(days),
            discount_rate: 0.02,
            mu: 0.03,
            q_rate: 0.03,
            r_rate: 0.02,
            priced_with: PricingCurrency::Numeraire,
            underlying_symbol: "frxEURUSD".to_string(),
            market: "forex".to_string(),
            is_atm: false,
            for_sale: true,
            markup: MarkupConfig::default(),
        }
    }

    fn steep_smile_surface() -> VolSurface {
        let smile = BTreeMap::from([(10, 0.1), (25, 0.1), (50, 0.1), (75, 5.0), (90, 5.0)]);
        VolSurface::new(BTreeMap::from([(1, TenorSlice::from_smile(smile))])).unwrap()
    }

    #[test]
    fn test_flat_surface_matches_undiscounted_binary() {
        let surface = VolSurface::flat(0.08, &[1, 7, 30]).unwrap();
        let engine = EuropeanDigitalSlope::new(request(ContractType::Call, 7), surface).unwrap();

        let butterfly = engine.butterfly_probability().unwrap();

        let t = 7.0 / 365.0;
        let inputs = BSInputs::new(1.10, 1.1011, t, 0.02, 0.03, 0.08);
        let (_, d2) = d1_d2(&inputs);
        let normal = Normal::new(0.0, 1.0).unwrap();
        assert_relative_eq!(butterfly, normal.cdf(d2), epsilon = 2e-3);
        assert_relative_eq!(
            butterfly * (-0.02 * t).exp(),
            binary_call(&inputs),
            epsilon = 2e-3
        );
    }

    #[test]
    fn test_higher_order_first_term_matches_slope_adjustment() {
        let engine =
            EuropeanDigitalSlope::new(request(ContractType::Call, 1), steep_smile_surface()).unwrap();

        let adjustment = engine.higher_order_adjustment().unwrap();
        let (_, trace) = engine.base_probability().unwrap();

        let slope = trace[&ContractType::Call].slope_adjustment.unwrap();
        assert_relative_eq!(adjustment.first_order, slope.amount, max_relative = 1e-12);
        assert_relative_eq!(adjustment.second_order, -1.9088664808718785, max_relative = 1e-6);
    }

    #[test]
    fn test_higher_order_intraday_cap() {
        let call =
            EuropeanDigitalSlope::new(request(ContractType::Call, 1), steep_smile_surface()).unwrap();
        let put =
            EuropeanDigitalSlope::new(request(ContractType::Put, 1), steep_smile_surface()).unwrap();

        let call_adjustment = call.higher_order_adjustment().unwrap();
        let put_adjustment = put.higher_order_adjustment().unwrap();

        // Uncapped sum is about -1.88
        assert_eq!(call_adjustment.total, -SLOPE_ADJUSTMENT_CAP);
        assert_eq!(put_adjustment.total, SLOPE_ADJUSTMENT_CAP);
    }

    #[test]
    fn test_higher_order_put_flips_sign() {
        let call =
            EuropeanDigitalSlope::new(request(ContractType::Call, 7), steep_smile_surface()).unwrap();
        let put =
            EuropeanDigitalSlope::new(request(ContractType::Put, 7), steep_smile_surface()).unwrap();

        let call_adjustment = call.higher_order_adjustment().unwrap();
        let put_adjustment = put.higher_order_adjustment().unwrap();

        assert_relative_eq!(call_adjustment.total, -0.39151105874064984, max_relative = 1e-6);
        assert_eq!(put_adjustment.total, -call_adjustment.total);
        assert_eq!(put_adjustment.second_order, -call_adjustment.second_order);
        assert_eq!(put_adjustment.third_order, -call_adjustment.third_order);
        assert_eq!(put_adjustment.convexity, -call_adjustment.convexity);
    }

    #[test]
    fn test_higher_order_vanishes_on_flat_surface() {
        let surface = VolSurface::flat(0.08, &[1, 7]).unwrap();
        let engine = EuropeanDigitalSlope::new(request(ContractType::Call, 7), surface).unwrap();

        let adjustment = engine.higher_order_adjustment().unwrap();

        assert_eq!(adjustment.total, 0.0);
        assert_eq!(adjustment.first_order, 0.0);
    }

    #[test]
    fn test_higher_order_needs_single_strike_contract() {
        let mut req = request(ContractType::ExpiryRange, 7);
        req.strikes = vec![1.09, 1.11];
        let engine = EuropeanDigitalSlope::new(req, steep_smile_surface()).unwrap();

        assert_matches!(
            engine.higher_order_adjustment(),
            Err(PricingError::MarketData(MarketDataError::UnsupportedContractType(
                ContractType::ExpiryRange
            )))
        );
    }
}
