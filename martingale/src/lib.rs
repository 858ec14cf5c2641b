//! # martingale
//!
//! Binomial-tree pricing of European and American vanilla options.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `mg-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use martingale::instruments::{OptionSpec, VanillaOption};
//!
//! let spec = OptionSpec::new(60.0, 62.0, 0.06, 0.5, 0.13, 5).unwrap();
//! let put = VanillaOption::american_put(spec);
//! assert!((put.price().unwrap() - 2.6204).abs() < 1e-4);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use mg_core as core;

/// Probability distributions and comparison helpers.
pub use mg_math as math;

/// Lattice geometry, node cache, and the pricer registry.
pub use mg_methods as methods;

/// Vanilla option instruments.
pub use mg_instruments as instruments;

/// Lattice and closed-form pricing engines.
pub use mg_pricingengines as pricingengines;

/// Environment-driven pricing configuration.
pub mod config;

pub use config::PricingConfig;
