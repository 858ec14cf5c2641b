//! Memoized backward induction on a recombining binomial lattice.
//!
//! The value of node `(j, m)` is
//!
//! * `terminal_value(j)` when `m == steps`,
//! * `c = e^{−rΔt} (p·V(j+1, m+1) + (1−p)·V(j, m+1))` otherwise, replaced by
//!   `max(intrinsic_value(j, m), c)` when early exercise is allowed.
//!
//! Requesting `(j, m)` fills the sub-triangle of nodes it depends on, one
//! diagonal at a time from maturity backward. Nodes already in the cache are
//! skipped, so each node is computed at most once per run and a full
//! valuation costs O(steps²) without any recursion.
//!
//! With the `parallel` feature, diagonals wider than
//! [`PARALLEL_THRESHOLD`] nodes are computed with rayon. Values of a
//! diagonal are collected first and written afterwards, so every cache slot
//! is still written exactly once.

use super::cache::PriceCache;
use super::geometry::LatticeGeometry;
use super::pricer::{LatticePricer, PricerStatus, PricerType};
use super::{ContractTerms, LatticeNode, TreeOption};
use mg_core::{ensure_valid, Error, Real, Result, Size};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Diagonal width from which the `parallel` feature spreads work over
/// threads.
pub const PARALLEL_THRESHOLD: Size = 512;

/// State of one pricing run.
#[derive(Debug, Clone)]
struct Run {
    geometry: LatticeGeometry,
    terms: ContractTerms,
    cache: PriceCache,
}

/// Binomial-tree pricer.
///
/// Holds no state between runs: [`configure`](LatticePricer::configure)
/// starts a run with an empty cache, [`finish`](LatticePricer::finish) ends
/// it.
#[derive(Debug, Clone, Default)]
pub struct BinomialTreePricer {
    run: Option<Run>,
}

impl BinomialTreePricer {
    /// A fresh, unconfigured pricer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes valued so far in the current run.
    pub fn nodes_evaluated(&self) -> Size {
        self.run.as_ref().map_or(0, |run| run.cache.len())
    }

    fn fill(run: &mut Run, target: LatticeNode, option: &dyn TreeOption) -> Result<Real> {
        if let Some(value) = run.cache.get(target) {
            return Ok(value);
        }
        let steps = run.geometry.steps();
        for m in (target.m..=steps).rev() {
            let width = m - target.m;
            let pending: Vec<Size> = (target.j..=target.j + width)
                .filter(|&j| !run.cache.contains(LatticeNode::new(j, m)))
                .collect();
            if pending.is_empty() {
                continue;
            }
            let values = diagonal(&run.cache, &run.geometry, option, m, &pending)?;
            for (j, value) in pending.into_iter().zip(values) {
                run.cache.insert(LatticeNode::new(j, m), value)?;
            }
        }
        run.cache.get(target).ok_or_else(|| {
            Error::Postcondition(format!("node {target} not valued after backward induction"))
        })
    }
}

/// Values of the nodes `(j, m)` for `j` in `pending`, reading their
/// successors from `cache`.
fn diagonal(
    cache: &PriceCache,
    geometry: &LatticeGeometry,
    option: &dyn TreeOption,
    m: Size,
    pending: &[Size],
) -> Result<Vec<Real>> {
    #[cfg(feature = "parallel")]
    if pending.len() >= PARALLEL_THRESHOLD {
        return pending
            .par_iter()
            .map(|&j| node_value(cache, geometry, option, j, m))
            .collect();
    }
    pending
        .iter()
        .map(|&j| node_value(cache, geometry, option, j, m))
        .collect()
}

fn node_value(
    cache: &PriceCache,
    geometry: &LatticeGeometry,
    option: &dyn TreeOption,
    j: Size,
    m: Size,
) -> Result<Real> {
    if m == geometry.steps() {
        return Ok(option.terminal_value(j));
    }
    let node = LatticeNode::new(j, m);
    let successor = |n: LatticeNode| {
        cache.get(n).ok_or_else(|| {
            Error::Postcondition(format!("successor {n} of {node} valued out of order"))
        })
    };
    let continuation = geometry.continuation(successor(node.up())?, successor(node.down())?);
    if option.early_exercise() {
        Ok(continuation.max(option.intrinsic_value(j, m)))
    } else {
        Ok(continuation)
    }
}

impl LatticePricer for BinomialTreePricer {
    fn pricer_type(&self) -> PricerType {
        PricerType::BinomialTree
    }

    fn status(&self) -> PricerStatus {
        match &self.run {
            None => PricerStatus::Unconfigured,
            Some(run) if run.cache.contains(LatticeNode::root()) => PricerStatus::Priced,
            Some(_) => PricerStatus::Configured,
        }
    }

    fn configure(&mut self, option: &dyn TreeOption) {
        let geometry = *option.geometry();
        let terms = option.terms();
        tracing::debug!(
            steps = geometry.steps(),
            payoff = terms.payoff,
            strike = terms.strike,
            early_exercise = terms.early_exercise,
            "binomial pricer configured"
        );
        self.run = Some(Run {
            geometry,
            terms,
            cache: PriceCache::new(geometry.steps()),
        });
    }

    fn evaluate(&mut self, j: Size, m: Size, option: &dyn TreeOption) -> Result<Real> {
        let run = self.run.as_mut().ok_or(Error::UninitializedPricer)?;
        ensure_valid!(
            *option.geometry() == run.geometry,
            "option lattice differs from the one this run was configured for"
        );
        let terms = option.terms();
        ensure_valid!(
            terms == run.terms,
            "option terms {terms:?} differ from {:?} this run was configured for",
            run.terms
        );
        let node = LatticeNode::new(j, m).check(run.geometry.steps())?;
        let before = run.cache.len();
        let value = Self::fill(run, node, option)?;
        tracing::trace!(
            %node,
            value,
            computed = run.cache.len() - before,
            "node evaluated"
        );
        Ok(value)
    }

    fn finish(&mut self) -> Option<PriceCache> {
        let run = self.run.take()?;
        tracing::debug!(nodes = run.cache.len(), "binomial run finished");
        Some(run.cache)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
