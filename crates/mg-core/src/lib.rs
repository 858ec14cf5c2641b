//! # mg-core
//!
//! Core types, traits, and error definitions for martingale.
//!
//! This crate provides the foundational building blocks shared across all
//! other crates in the workspace – type aliases, the error enum with its
//! guard macros, and the `LazyObject` caching pattern used by instruments.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `ensure_valid!` / `ensure_post!` macros.
pub mod errors;

/// Design patterns: lazy_object.
pub mod patterns;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// Alias used for array sizes, indices and step counts.
pub type Size = usize;

/// A rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A discount factor in [0, 1].
pub type DiscountFactor = Real;

/// A probability in [0, 1].
pub type Probability = Real;

/// A volatility level expressed as a decimal.
pub type Volatility = Real;

/// A time measurement in years.
pub type Time = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
pub use patterns::lazy_object::{LazyObject, LazyState};
