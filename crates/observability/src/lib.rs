//! Observability infrastructure for the Digital Slope pricer
//!
//! This crate provides:
//! - Structured logging via tracing
//! - Pricing metrics recorded through the `metrics` facade
//!
//! # Quick Start
//!
//! ```ignore
//! use observability::{init_logging, LogFormat, PricingMetrics};
//!
//! init_logging("digital-slope", LogFormat::Json, "info")?;
//!
//! let metrics = PricingMetrics::new("frxEURUSD");
//! metrics.record_request("CALL");
//! ```
//!
//! No exporter is installed here; the host process installs whichever
//! `metrics` recorder it uses. Without one, recording is a no-op.

pub mod logging;
pub mod metrics;

pub use logging::{init_default_logging, init_logging, try_init_test_logging, LogFormat};
pub use metrics::{PricingMetrics, PricingTimer};
