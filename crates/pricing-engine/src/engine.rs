use std::collections::BTreeMap;
use std::sync::Arc;

use common::{is_intraday, ContractType, PricingCurrency};
use config::{PrefixUnderlyingLookup, UnderlyingLookup};
use market_data::black_scholes::{binary_call, binary_put};
use market_data::{binary_greeks, price_binary_option, vega_vanilla, BSInputs, Greeks, VolSurface};
use observability::{PricingMetrics, PricingTimer};
use risk_engine::{MarkupBreakdown, MarkupContext, MarkupEngine};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::request::PricingRequest;
use crate::trace::{ContractTrace, SlopeParameters, SlopeTrace, TraceAmount};
use crate::vanilla::{VanillaComponent, ZeroVanillaComponent};
use crate::{PricingError, Result};

/// Largest slope adjustment on intraday contracts priced off a surface
/// whose shortest tenor is longer than a week
pub const SLOPE_ADJUSTMENT_CAP: f64 = 0.03;
/// Shortest-tenor threshold (days) for the intraday slope cap
pub const SLOPE_CAP_MIN_TENOR_DAYS: u32 = 7;

/// Result of one quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingOutcome {
    /// Final probability in `[0, 1]`
    pub probability: f64,
    /// Model probability before markup
    pub base_probability: f64,
    /// Binary Greeks fed to the markup rules
    pub greeks: Greeks,
    pub markup: MarkupBreakdown,
    /// Populated by numeraire quotes
    pub trace: BTreeMap<ContractType, ContractTrace>,
}

/// European digital pricer with smile slope correction
///
/// Built once per request; every method is a pure function of the request,
/// the surface and the injected collaborators.
pub struct EuropeanDigitalSlope {
    request: PricingRequest,
    surface: VolSurface,
    time_to_expiry: f64,
    forward_starting: bool,
    underlyings: Arc<dyn UnderlyingLookup>,
    markup_engine: MarkupEngine,
    vanilla_component: Box<dyn VanillaComponent>,
    metrics: PricingMetrics,
}

impl std::fmt::Debug for EuropeanDigitalSlope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EuropeanDigitalSlope")
            .field("request", &self.request)
            .field("time_to_expiry", &self.time_to_expiry)
            .field("forward_starting", &self.forward_starting)
            .finish_non_exhaustive()
    }
}

impl EuropeanDigitalSlope {
    /// Validate the request and surface and derive the time values
    pub fn new(request: PricingRequest, surface: VolSurface) -> Result<Self> {
        let metrics = PricingMetrics::new(&request.underlying_symbol);

        if let Err(e) = request.validate() {
            metrics.record_failure("validation");
            return Err(e.into());
        }
        if let Err(e) = surface.validate() {
            metrics.record_failure("surface");
            return Err(e.into());
        }

        let time_to_expiry = request.time_to_expiry();
        let forward_starting = request.is_forward_starting();

        debug!(
            underlying = %request.underlying_symbol,
            contract_type = %request.contract_type,
            priced_with = %request.priced_with,
            time_to_expiry,
            forward_starting,
            "Pricing engine created"
        );

        Ok(Self {
            request,
            surface,
            time_to_expiry,
            forward_starting,
            underlyings: Arc::new(PrefixUnderlyingLookup),
            markup_engine: MarkupEngine::new(),
            vanilla_component: Box::new(ZeroVanillaComponent),
            metrics,
        })
    }

    pub fn with_underlyings(mut self, underlyings: Arc<dyn UnderlyingLookup>) -> Self {
        self.underlyings = underlyings;
        self
    }

    pub fn with_markup_engine(mut self, markup_engine: MarkupEngine) -> Self {
        self.markup_engine = markup_engine;
        self
    }

    pub fn with_vanilla_component(mut self, component: impl VanillaComponent + 'static) -> Self {
        self.vanilla_component = Box::new(component);
        self
    }

    pub fn request(&self) -> &PricingRequest {
        &self.request
    }

    pub fn surface(&self) -> &VolSurface {
        &self.surface
    }

    /// Years, clamped to `(ε, 2y]`
    pub fn time_to_expiry(&self) -> f64 {
        self.time_to_expiry
    }

    pub fn is_forward_starting(&self) -> bool {
        self.forward_starting
    }

    /// Final probability: `clamp(base + markup, 0, 1)`
    pub fn calculate_probability(&self) -> Result<f64> {
        self.price().map(|outcome| outcome.probability)
    }

    /// Price the contract and keep every intermediate
    pub fn price(&self) -> Result<PricingOutcome> {
        let _timer = PricingTimer::new(&self.metrics);
        self.metrics.record_request(self.request.contract_type.as_str());

        let outcome = self.price_inner();
        match &outcome {
            Ok(outcome) => {
                for kind in outcome.markup.fired() {
                    self.metrics.record_rule_fired(kind.as_str());
                }
                self.metrics.record_quote(outcome.markup.total, outcome.probability);
            }
            Err(e) => {
                warn!(underlying = %self.request.underlying_symbol, error = %e, "Pricing failed");
                self.metrics.record_failure(e.reason());
            }
        }
        outcome
    }

    fn price_inner(&self) -> Result<PricingOutcome> {
        let (base_probability, trace) = self.base_probability()?;
        let greeks = self.greeks()?;
        let markup = self.markup_engine.calculate(&self.markup_context(), greeks);

        let probability = (base_probability + markup.total).clamp(0.0, 1.0);

        debug!(
            base_probability,
            markup = markup.total,
            probability,
            "Probability calculated"
        );

        Ok(PricingOutcome {
            probability,
            base_probability,
            greeks,
            markup,
            trace,
        })
    }

    /// Model probability before markup, with the numeraire trace
    pub fn base_probability(&self) -> Result<(f64, BTreeMap<ContractType, ContractTrace>)> {
        let mut trace = BTreeMap::new();

        let probability = if let Some((low, high)) = self.request.barriers() {
            self.two_barrier_probability(low, high)?
        } else {
            match self.request.priced_with {
                PricingCurrency::Numeraire => {
                    let (probability, contract_trace) = self.numeraire_probability()?;
                    trace.insert(self.request.contract_type, contract_trace);
                    probability
                }
                PricingCurrency::Quanto => self.quanto_probability()?,
                PricingCurrency::Base => self.base_currency_probability()?,
            }
        };

        debug!(probability, "Base probability");
        Ok((probability, trace))
    }

    /// Binary delta and vega at the first strike: call sensitivities for
    /// CALL, put sensitivities otherwise
    pub fn greeks(&self) -> Result<Greeks> {
        let strike = self.first_strike();
        let vol = self.vol_at(strike)?;
        Ok(binary_greeks(self.request.contract_type, &self.inputs(strike, vol)))
    }

    pub fn markup_context(&self) -> MarkupContext {
        MarkupContext::new(self.time_to_expiry, &self.request.market, self.request.markup.clone())
            .with_atm(self.request.is_atm)
            .with_forward_starting(self.forward_starting)
            .with_for_sale(self.request.for_sale)
            .with_underlying(&self.request.underlying_symbol)
    }

    pub(crate) fn first_strike(&self) -> f64 {
        self.request.strikes.first().copied().unwrap_or(self.request.spot)
    }

    pub(crate) fn vol_at(&self, strike: f64) -> Result<f64> {
        Ok(self.surface.vol(
            self.request.spot,
            strike,
            self.time_to_expiry,
            self.request.r_rate,
            self.request.q_rate,
        )?)
    }

    /// Inputs at the request's discount rate and drift
    pub(crate) fn inputs(&self, strike: f64, vol: f64) -> BSInputs {
        BSInputs::new(
            self.request.spot,
            strike,
            self.time_to_expiry,
            self.request.discount_rate,
            self.request.mu,
            vol,
        )
    }

    /// Pip size of the underlying, required to be positive
    pub(crate) fn pip_size(&self) -> Result<f64> {
        let symbol = &self.request.underlying_symbol;
        let pip_size = self.underlyings.by_symbol(symbol).pip_size;
        if !(pip_size.is_finite() && pip_size > 0.0) {
            return Err(PricingError::InvalidPipSize {
                symbol: symbol.clone(),
                pip_size,
            });
        }
        Ok(pip_size)
    }

    fn expiry_miss_probability(&self, low: f64, high: f64) -> Result<f64> {
        let below = binary_put(&self.inputs(low, self.vol_at(low)?));
        let above = binary_call(&self.inputs(high, self.vol_at(high)?));
        Ok(below + above)
    }

    /// EXPIRYMISS pays outside the barriers; every other selector with two
    /// strikes is priced as the discounted complement (EXPIRYRANGE).
    fn two_barrier_probability(&self, low: f64, high: f64) -> Result<f64> {
        let miss = self.expiry_miss_probability(low, high)?;

        match self.request.contract_type {
            ContractType::ExpiryMiss => Ok(miss),
            _ => {
                let discount = (-self.request.discount_rate * self.time_to_expiry).exp();
                Ok(discount * (1.0 - miss))
            }
        }
    }

    fn numeraire_probability(&self) -> Result<(f64, ContractTrace)> {
        let contract_type = self.request.contract_type;
        let strike = self.first_strike();
        let vol = self.vol_at(strike)?;
        let inputs = self.inputs(strike, vol);
        let bs_probability = price_binary_option(contract_type, &inputs)?;

        let mut trace = ContractTrace {
            bs_probability: TraceAmount {
                amount: bs_probability,
                parameters: inputs,
            },
            slope_adjustment: None,
        };

        if self.forward_starting {
            return Ok((bs_probability, trace));
        }

        let slope = self.slope_adjustment(contract_type, strike)?;
        trace.slope_adjustment = Some(slope);

        Ok((bs_probability + slope.amount, trace))
    }

    fn slope_adjustment(&self, contract_type: ContractType, strike: f64) -> Result<SlopeTrace> {
        // Vol at the contract strike stands in for the ATM vol
        let atm_vol = self.vol_at(strike)?;
        let vega_inputs = self.inputs(strike, atm_vol);
        let vanilla_vega = vega_vanilla(&vega_inputs);

        let pip_size = self.pip_size()?;
        let vol_down = self.vol_at(strike - pip_size)?;
        let vol_up = self.vol_at(strike + pip_size)?;
        let slope = (vol_up - vol_down) / (2.0 * pip_size);

        let sign = -contract_type.call_sign();
        let mut amount = sign * vanilla_vega * slope;

        let long_dated_surface = self
            .surface
            .min_tenor()
            .is_some_and(|tenor| tenor > SLOPE_CAP_MIN_TENOR_DAYS);
        if is_intraday(self.time_to_expiry) && long_dated_surface {
            amount = amount.clamp(-SLOPE_ADJUSTMENT_CAP, SLOPE_ADJUSTMENT_CAP);
        }

        debug!(vanilla_vega, slope, amount, "Slope adjustment");

        Ok(SlopeTrace {
            amount,
            parameters: SlopeParameters {
                vanilla_vega: TraceAmount {
                    amount: vanilla_vega,
                    parameters: vega_inputs,
                },
                slope,
            },
        })
    }

    /// Binary priced with carry `r_rate - q_rate`, no slope adjustment
    fn quanto_probability(&self) -> Result<f64> {
        let strike = self.first_strike();
        let vol = self.vol_at(strike)?;
        let inputs = BSInputs {
            carry: self.request.r_rate - self.request.q_rate,
            ..self.inputs(strike, vol)
        };
        Ok(price_binary_option(self.request.contract_type, &inputs)?)
    }

    /// `(numeraire_price * K ± vanilla_component) / S`
    fn base_currency_probability(&self) -> Result<f64> {
        let strike = self.first_strike();
        let vol = self.vol_at(strike)?;
        let inputs = BSInputs {
            rate: self.request.r_rate,
            carry: self.request.r_rate - self.request.q_rate,
            ..self.inputs(strike, vol)
        };
        let numeraire_probability = price_binary_option(self.request.contract_type, &inputs)?;

        let vanilla = self
            .vanilla_component
            .compute(&self.request, self.time_to_expiry, vol);
        let sign = self.request.contract_type.call_sign();

        Ok((numeraire_probability * strike + sign * vanilla) / self.request.spot)
    }
}
