//! # mg-math
//!
//! Mathematical utilities for martingale: probability distributions (via
//! statrs) and floating-point comparison helpers.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Floating-point comparison utilities.
pub mod comparison;

/// Probability distributions.
pub mod distributions;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use comparison::{close_enough, relative_error};
pub use distributions::{normal_cdf, normal_pdf, BinomialDistribution};
