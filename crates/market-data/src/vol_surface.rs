use std::collections::BTreeMap;
use std::f64::consts::PI;

use config::SmileParameters;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{MarketDataError, Result};

/// Smile coordinates produced by the parametric builder
pub const SMILE_POINTS: [u32; 5] = [10, 25, 50, 75, 90];
/// Tenors (days) produced by the parametric builder
pub const BUILDER_TENORS: [u32; 6] = [1, 7, 30, 90, 180, 365];
/// ATM coordinate, the fallback when interpolation finds no bracket
pub const ATM_POINT: u32 = 50;
pub const DEFAULT_VOL_SPREAD: f64 = 0.01;

/// One tenor of the surface
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TenorSlice {
    /// Delta coordinate -> annualized vol
    pub smile: BTreeMap<u32, f64>,
    #[serde(default)]
    pub rr: BTreeMap<u32, f64>,
    #[serde(default)]
    pub bf: BTreeMap<u32, f64>,
    #[serde(default)]
    pub vol_spread: BTreeMap<u32, f64>,
}

impl TenorSlice {
    pub fn from_smile(smile: BTreeMap<u32, f64>) -> Self {
        Self {
            smile,
            ..Default::default()
        }
    }
}

/// Tenor (days) -> smile surface
///
/// Serialized as the bare map `{tenor: {smile, rr, bf, vol_spread}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VolSurface {
    tenors: BTreeMap<u32, TenorSlice>,
}

impl VolSurface {
    /// Build a surface, rejecting empty surfaces and empty smiles
    pub fn new(tenors: BTreeMap<u32, TenorSlice>) -> Result<Self> {
        let surface = Self { tenors };
        surface.validate()?;
        Ok(surface)
    }

    /// One flat smile at every tenor
    pub fn flat(vol: f64, tenors: &[u32]) -> Result<Self> {
        let smile: BTreeMap<u32, f64> = SMILE_POINTS.iter().map(|&point| (point, vol)).collect();
        Self::new(
            tenors
                .iter()
                .map(|&tenor| (tenor, TenorSlice::from_smile(smile.clone())))
                .collect(),
        )
    }

    pub fn validate(&self) -> Result<()> {
        if self.tenors.is_empty() {
            return Err(MarketDataError::EmptySurface);
        }

        for (&tenor_days, slice) in &self.tenors {
            if slice.smile.is_empty() {
                return Err(MarketDataError::EmptySmile { tenor_days });
            }
            if let Some((point, vol)) = slice.smile.iter().find(|(_, vol)| !vol.is_finite()) {
                return Err(MarketDataError::InvalidSurface(format!(
                    "tenor {}d point {} has non-finite vol {}",
                    tenor_days, point, vol
                )));
            }
        }

        Ok(())
    }

    pub fn tenors(&self) -> impl Iterator<Item = u32> + '_ {
        self.tenors.keys().copied()
    }

    pub fn slice(&self, tenor_days: u32) -> Option<&TenorSlice> {
        self.tenors.get(&tenor_days)
    }

    pub fn min_tenor(&self) -> Option<u32> {
        self.tenors.keys().next().copied()
    }

    /// Tenor closest to `time` (years) on a 365-day count; on a tie the
    /// shorter tenor wins.
    pub fn nearest_tenor(&self, time: f64) -> Result<u32> {
        let target = time * 365.0;
        let mut best: Option<(u32, f64)> = None;

        for tenor in self.tenors() {
            let distance = (f64::from(tenor) - target).abs();
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((tenor, distance)),
            }
        }

        best.map(|(tenor, _)| tenor).ok_or(MarketDataError::EmptySurface)
    }

    /// Interpolated vol for a strike
    ///
    /// The log-moneyness against the forward is mapped onto the smile's
    /// delta axis as `50 + m / (2π) * 100` and interpolated linearly, clamped
    /// to the outermost points.
    pub fn vol(&self, spot: f64, strike: f64, time: f64, r_rate: f64, q_rate: f64) -> Result<f64> {
        let tenor_days = self.nearest_tenor(time)?;
        let smile = self
            .tenors
            .get(&tenor_days)
            .map(|slice| &slice.smile)
            .ok_or(MarketDataError::EmptySurface)?;

        let forward = spot * ((r_rate - q_rate) * time).exp();
        let moneyness = (strike / forward).ln();
        let coordinate = 50.0 + (moneyness / (2.0 * PI)) * 100.0;

        let vol = interpolate_smile(smile, coordinate, tenor_days)?;
        debug!(tenor_days, strike, coordinate, vol, "Surface vol");
        Ok(vol)
    }

    /// `vol_spread[50]` of a tenor, 0.01 when the tenor or point is absent
    pub fn vol_spread(&self, tenor_days: u32) -> f64 {
        self.tenors
            .get(&tenor_days)
            .and_then(|slice| slice.vol_spread.get(&ATM_POINT))
            .copied()
            .unwrap_or(DEFAULT_VOL_SPREAD)
    }

    /// Parametric surface around a base (ATM) vol
    ///
    /// The one-day tenor is unscaled; longer tenors apply the term factor
    /// `1 + term_slope * ln(tenor / 365 + 1)` to the smile and scale the
    /// risk-reversal and butterfly quotes linearly in tenor.
    pub fn from_smile_parameters(base_vol: f64, params: &SmileParameters) -> Self {
        let tenors = BUILDER_TENORS
            .iter()
            .map(|&tenor| {
                let years = f64::from(tenor) / 365.0;
                let (factor, rr_scale, bf_scale) = if tenor == 1 {
                    (1.0, 1.0, 1.0)
                } else {
                    (
                        1.0 + params.term_slope * (years + 1.0).ln(),
                        1.0 + params.rr_term * years,
                        1.0 + params.bf_term * years,
                    )
                };

                let multipliers = [
                    params.smile_wings,
                    params.smile_body,
                    1.0,
                    params.smile_body,
                    params.smile_wings,
                ];
                let smile = SMILE_POINTS
                    .iter()
                    .zip(multipliers)
                    .map(|(&point, multiplier)| (point, multiplier * base_vol * factor))
                    .collect();

                let slice = TenorSlice {
                    smile,
                    rr: BTreeMap::from([
                        (25, params.rr_25 * rr_scale),
                        (10, params.rr_10 * rr_scale),
                    ]),
                    bf: BTreeMap::from([
                        (25, params.bf_25 * bf_scale),
                        (10, params.bf_10 * bf_scale),
                    ]),
                    vol_spread: BTreeMap::from([(ATM_POINT, DEFAULT_VOL_SPREAD)]),
                };
                (tenor, slice)
            })
            .collect();

        Self { tenors }
    }
}

fn interpolate_smile(smile: &BTreeMap<u32, f64>, coordinate: f64, tenor_days: u32) -> Result<f64> {
    let (Some((&low_point, &low_vol)), Some((&high_point, &high_vol))) =
        (smile.first_key_value(), smile.last_key_value())
    else {
        return Err(MarketDataError::EmptySmile { tenor_days });
    };

    if coordinate <= f64::from(low_point) {
        return Ok(low_vol);
    }
    if coordinate >= f64::from(high_point) {
        return Ok(high_vol);
    }

    let points: Vec<(f64, f64)> = smile.iter().map(|(&p, &v)| (f64::from(p), v)).collect();
    for pair in points.windows(2) {
        let (x0, v0) = pair[0];
        let (x1, v1) = pair[1];
        if x0 <= coordinate && coordinate <= x1 {
            if v0 == v1 {
                return Ok(v0);
            }
            let w = (coordinate - x0) / (x1 - x0);
            return Ok(v0 * (1.0 - w) + v1 * w);
        }
    }

    smile
        .get(&ATM_POINT)
        .copied()
        .ok_or(MarketDataError::MissingAtmPoint { tenor_days })
}
