//! # mg-pricingengines
//!
//! Pricing engines for vanilla options.
//!
//! ## Engines
//!
//! - [`BinomialVanillaEngine`]: lattice price plus delta, gamma and theta
//!   read from the first lattice steps
//! - [`AnalyticEuropeanEngine`]: Black-Scholes closed form for European
//!   options, the limit the lattice converges to

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analytic_european_engine;
pub mod binomial_engine;

pub use analytic_european_engine::{black_scholes, AnalyticEuropeanEngine};
pub use binomial_engine::{binomial_expectation_price, BinomialVanillaEngine};
