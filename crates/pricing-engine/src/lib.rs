//! European Digital Slope pricer
//!
//! Prices European binary options as a lognormal probability, corrected for
//! the local slope of the volatility smile, plus a rule-based risk markup.
//!
//! # Example
//!
//! ```ignore
//! use pricing_engine::{EuropeanDigitalSlope, PricingRequest};
//!
//! let engine = EuropeanDigitalSlope::new(request, surface)?
//!     .with_underlyings(Arc::new(config.underlying_table()));
//! let outcome = engine.price()?;
//! println!("{} {:?}", outcome.probability, outcome.trace);
//! ```
//!
//! # Modules
//!
//! - [`request`] - Immutable pricing request and its validation
//! - [`engine`] - Base-probability dispatch, slope adjustment, markup
//! - [`trace`] - Structured diagnostic trace
//! - [`vanilla`] - Vanilla component strategy for base-currency pricing
//! - [`replication`] - Butterfly cross-check and higher-order smile terms

pub mod engine;
pub mod error;
pub mod replication;
pub mod request;
pub mod trace;
pub mod vanilla;

pub use engine::{EuropeanDigitalSlope, PricingOutcome};
pub use error::PricingError;
pub use replication::HigherOrderAdjustment;
pub use request::PricingRequest;
pub use trace::{ContractTrace, SlopeParameters, SlopeTrace, TraceAmount};
pub use vanilla::{VanillaComponent, ZeroVanillaComponent};

pub type Result<T> = std::result::Result<T, PricingError>;
