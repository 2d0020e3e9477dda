//! Risk markup engine for Digital Slope
//!
//! Computes the additive markup placed on top of a model probability. The
//! markup is the sum of an ordered stack of rules, halved so it splits
//! evenly across both sides of the quote.
//!
//! # Rule stack
//!
//! Traded markets (forex, commodities, indices, `*_basket`):
//!
//! 1. Hour-end, when an hour-end section is configured
//! 2. Vol-spread, for non-ATM contracts
//! 3. Spot-spread, for contracts longer than a day
//! 4. Smile-uncertainty, for short-dated non-ATM indices
//! 5. Equal-tie
//!
//! Rules 2-4 are skipped for forward-starting contracts while the equal-tie
//! rule is inactive. Model-arbitrage applies to every market for contracts
//! not for sale that expire within the arbitrage window.
//!
//! Each rule is a [`MarkupRule`] and can be swapped on the [`MarkupEngine`].

pub mod markup;
pub mod rules;
pub mod types;

pub use markup::MarkupEngine;
pub use rules::*;
pub use types::{MarkupBreakdown, MarkupContext, MarkupContribution, MarkupKind};
