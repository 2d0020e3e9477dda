use std::f64::consts::{PI, SQRT_2};

use common::ContractType;
use statrs::function::erf::erfc;

use crate::types::{BSInputs, Greeks};
use crate::{MarketDataError, Result};

pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Standard normal CDF through the complementary error function, accurate
/// in both tails.
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

pub fn d1_d2(input: &BSInputs) -> (f64, f64) {
    let sqrt_t = input.time.sqrt();
    let vol_sqrt_t = input.vol * sqrt_t;

    let d1 = ((input.spot / input.strike).ln()
        + (input.rate - input.carry + 0.5 * input.vol * input.vol) * input.time)
        / vol_sqrt_t;
    let d2 = d1 - vol_sqrt_t;

    (d1, d2)
}

fn discount(input: &BSInputs) -> f64 {
    (-input.rate * input.time).exp()
}

pub fn binary_call(input: &BSInputs) -> f64 {
    if input.is_degenerate() {
        return if input.spot > input.strike { 1.0 } else { 0.0 };
    }

    let (_, d2) = d1_d2(input);
    discount(input) * norm_cdf(d2)
}

pub fn binary_put(input: &BSInputs) -> f64 {
    if input.is_degenerate() {
        return if input.spot < input.strike { 1.0 } else { 0.0 };
    }

    let (_, d2) = d1_d2(input);
    discount(input) * norm_cdf(-d2)
}

pub fn vanilla_call(input: &BSInputs) -> f64 {
    if input.is_degenerate() {
        return intrinsic_value(input.spot, input.strike, ContractType::Call);
    }

    let (d1, d2) = d1_d2(input);
    input.spot * (-input.carry * input.time).exp() * norm_cdf(d1)
        - input.strike * discount(input) * norm_cdf(d2)
}

pub fn vanilla_put(input: &BSInputs) -> f64 {
    if input.is_degenerate() {
        return intrinsic_value(input.spot, input.strike, ContractType::Put);
    }

    let (d1, d2) = d1_d2(input);
    input.strike * discount(input) * norm_cdf(-d2)
        - input.spot * (-input.carry * input.time).exp() * norm_cdf(-d1)
}

/// Payoff of a vanilla at expiry; anything but `Call` is treated as a put
pub fn intrinsic_value(spot: f64, strike: f64, contract_type: ContractType) -> f64 {
    match contract_type {
        ContractType::Call => (spot - strike).max(0.0),
        _ => (strike - spot).max(0.0),
    }
}

pub fn delta_binary_call(input: &BSInputs) -> f64 {
    if input.is_degenerate() {
        return 0.0;
    }

    let (_, d2) = d1_d2(input);
    discount(input) * norm_pdf(d2) / (input.spot * input.vol * input.time.sqrt())
}

pub fn delta_binary_put(input: &BSInputs) -> f64 {
    -delta_binary_call(input)
}

pub fn vega_binary_call(input: &BSInputs) -> f64 {
    if input.is_degenerate() {
        return 0.0;
    }

    let (_, d2) = d1_d2(input);
    -discount(input) * norm_pdf(d2) * d2 / input.vol
}

pub fn vega_binary_put(input: &BSInputs) -> f64 {
    -vega_binary_call(input)
}

/// Vanilla vega, identical for calls and puts
pub fn vega_vanilla(input: &BSInputs) -> f64 {
    if input.is_degenerate() {
        return 0.0;
    }

    let (d1, _) = d1_d2(input);
    input.spot * (-input.carry * input.time).exp() * input.time.sqrt() * norm_pdf(d1)
}

/// Binary delta and vega: call sensitivities for `Call`, put sensitivities
/// for every other selector.
pub fn binary_greeks(contract_type: ContractType, input: &BSInputs) -> Greeks {
    match contract_type {
        ContractType::Call => Greeks {
            delta: delta_binary_call(input),
            vega: vega_binary_call(input),
        },
        _ => Greeks {
            delta: delta_binary_put(input),
            vega: vega_binary_put(input),
        },
    }
}

/// Price a single-barrier binary by its selector
pub fn price_binary_option(contract_type: ContractType, input: &BSInputs) -> Result<f64> {
    match contract_type {
        ContractType::Call => Ok(binary_call(input)),
        ContractType::Put => Ok(binary_put(input)),
        other => Err(MarketDataError::UnsupportedContractType(other)),
    }
}
