//! Probability distributions.
//!
//! Provides the standard normal (for the closed-form Black-Scholes reference)
//! and the binomial distribution of lattice up-moves, delegating to the
//! `statrs` crate.

pub mod binomial;
pub mod normal;

pub use binomial::BinomialDistribution;
pub use normal::{normal_cdf, normal_pdf};
