//! Common types and utilities for Digital Slope
//!
//! This crate provides the contract vocabulary shared by every pricing
//! crate in the workspace.
//!
//! # Modules
//!
//! - [`error`] - Request validation errors
//! - [`types`] - Contract types, pricing currencies, market classes

pub mod error;
pub mod types;

pub use error::{Result, ValidationError};
pub use types::*;
