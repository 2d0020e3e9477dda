//! Vanilla component of base-currency pricing
//!
//! A base-currency digital is `(numeraire_price * K ± vanilla) / S`. The
//! vanilla term is a strategy so it can be filled in without touching the
//! engine.

use crate::request::PricingRequest;

pub trait VanillaComponent: Send + Sync {
    /// `vol` is the surface vol at the contract strike
    fn compute(&self, request: &PricingRequest, time_to_expiry: f64, vol: f64) -> f64;
}

/// Default component: contributes nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroVanillaComponent;

impl VanillaComponent for ZeroVanillaComponent {
    fn compute(&self, _request: &PricingRequest, _time_to_expiry: f64, _vol: f64) -> f64 {
        0.0
    }
}

impl<F> VanillaComponent for F
where
    F: Fn(&PricingRequest, f64, f64) -> f64 + Send + Sync,
{
    fn compute(&self, request: &PricingRequest, time_to_expiry: f64, vol: f64) -> f64 {
        self(request, time_to_expiry, vol)
    }
}
