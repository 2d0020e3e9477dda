//! Market data primitives for the Digital Slope pricer
//!
//! # Core Components
//!
//! - [`black_scholes`] - Closed-form lognormal binary and vanilla prices with
//!   their delta and vega
//! - [`vol_surface`] - Tenor/smile volatility surface, the interpolation
//!   query and the parametric surface builder
//!
//! # Key Invariants
//!
//! - Every function here is pure: no caching, no shared state
//! - Degenerate inputs (zero vol or zero time) resolve to the deterministic
//!   payoff limit instead of failing
//! - Smile coordinates are kept sorted by the `BTreeMap` backing store

pub mod black_scholes;
pub mod error;
pub mod types;
pub mod vol_surface;

pub use black_scholes::{
    binary_call, binary_greeks, binary_put, price_binary_option, vanilla_call, vanilla_put,
    vega_vanilla,
};
pub use error::MarketDataError;
pub use types::{BSInputs, Greeks};
pub use vol_surface::{TenorSlice, VolSurface};

pub type Result<T> = std::result::Result<T, MarketDataError>;
