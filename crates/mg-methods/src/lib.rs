//! # mg-methods
//!
//! Numerical methods for martingale: the recombining binomial lattice and
//! the pricers that walk it.
//!
//! # Modules
//!
//! * [`lattice`]: lattice geometry, node cache, backward-induction pricer
//!   and the pricer strategy registry

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Lattice methods: geometry, node cache, binomial backward induction.
pub mod lattice;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use lattice::{
    BinomialTreePricer, ContractTerms, LatticeGeometry, LatticeNode, LatticePricer, PriceCache,
    PricerFactory, PricerStatus, PricerType, TreeOption,
};
