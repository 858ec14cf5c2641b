//! Lattice methods for option pricing.
//!
//! # Overview
//!
//! * [`LatticeGeometry`]: step size, up/down factors, risk-neutral
//!   probability and per-step discount of a recombining binomial lattice
//! * [`LatticeNode`]: a node `(j, m)`: `j` up-moves after `m` steps
//! * [`PriceCache`]: write-once triangular store of node values
//! * [`TreeOption`]: what a contract must supply to be priced on the lattice
//! * [`ContractTerms`]: payoff identity a pricing run is bound to
//! * [`BinomialTreePricer`]: memoized backward induction
//! * [`PricerType`]: strategy identifiers and the constructor registry

pub mod binomial_tree;
pub mod cache;
pub mod geometry;
pub mod pricer;

pub use binomial_tree::BinomialTreePricer;
pub use cache::PriceCache;
pub use geometry::LatticeGeometry;
pub use pricer::{LatticePricer, PricerFactory, PricerStatus, PricerType};

use mg_core::{Error, Real, Result, Size};
use std::fmt;

// ─── LatticeNode ──────────────────────────────────────────────────────────────

/// A node of a recombining binomial lattice.
///
/// `j` counts up-moves and `m` elapsed steps, so `0 <= j <= m <= steps`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LatticeNode {
    /// Number of up-moves.
    pub j: Size,
    /// Number of elapsed steps.
    pub m: Size,
}

impl LatticeNode {
    /// Create a node without range checks.
    pub const fn new(j: Size, m: Size) -> Self {
        Self { j, m }
    }

    /// The root `(0, 0)`.
    pub const fn root() -> Self {
        Self::new(0, 0)
    }

    /// Successor after an up-move.
    pub const fn up(self) -> Self {
        Self::new(self.j + 1, self.m + 1)
    }

    /// Successor after a down-move.
    pub const fn down(self) -> Self {
        Self::new(self.j, self.m + 1)
    }

    /// Check that the node lies inside a lattice with `steps` steps.
    pub fn check(self, steps: Size) -> Result<Self> {
        if self.j <= self.m && self.m <= steps {
            Ok(self)
        } else {
            Err(Error::IndexOutOfRange {
                j: self.j,
                m: self.m,
                steps,
            })
        }
    }
}

impl fmt::Display for LatticeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.j, self.m)
    }
}

// ─── TreeOption ───────────────────────────────────────────────────────────────

/// Payoff identity of a contract on a given lattice.
///
/// Two contracts with equal geometry and equal terms have identical node
/// values, so a pricer run may only serve cached nodes to options whose
/// terms match the ones it was configured with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContractTerms {
    /// Payoff family, e.g. `"call"`.
    pub payoff: &'static str,
    /// Strike the payoff is struck at.
    pub strike: Real,
    /// Whether the holder may exercise before maturity.
    pub early_exercise: bool,
}

/// A contract that can be valued on a binomial lattice.
///
/// Payoff methods have no default implementation: a contract type that does
/// not supply both of them does not compile.
pub trait TreeOption: fmt::Debug + Sync {
    /// The lattice the contract lives on.
    fn geometry(&self) -> &LatticeGeometry;

    /// Payoff at maturity in the node with `j` up-moves.
    fn terminal_value(&self, j: Size) -> Real;

    /// Value of immediate exercise at node `(j, m)` (may be negative).
    fn intrinsic_value(&self, j: Size, m: Size) -> Real;

    /// Whether the holder may exercise before maturity.
    fn early_exercise(&self) -> bool;

    /// Terms that, with the geometry, determine every node value.
    fn terms(&self) -> ContractTerms;
}

// ─── Test fixtures ────────────────────────────────────────────────────────────


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_successors() {
        let n = LatticeNode::new(2, 5);
        assert_eq!(n.up(), LatticeNode::new(3, 6));
        assert_eq!(n.down(), LatticeNode::new(2, 6));
        assert_eq!(LatticeNode::root().to_string(), "(0, 0)");
    }

    #[test]
    fn node_range_check() {
        assert!(LatticeNode::new(3, 3).check(3).is_ok());
        assert_eq!(
            LatticeNode::new(4, 3).check(5),
            Err(Error::IndexOutOfRange { j: 4, m: 3, steps: 5 })
        );
        assert!(LatticeNode::new(0, 6).check(5).is_err());
    }
}
