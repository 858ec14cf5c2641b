//! Pricer strategies and their registry.
//!
//! A [`LatticePricer`] values a [`TreeOption`] node by node. Strategies are
//! selected by [`PricerType`]; each type maps to a constructor function in a
//! static registry, so a new strategy is added by registering it here
//! without touching the option types that use it.

use super::binomial_tree::BinomialTreePricer;
use super::cache::PriceCache;
use super::TreeOption;
use mg_core::{Error, Real, Result, Size};
use std::fmt;
use std::str::FromStr;

/// Lifecycle of a pricer within one pricing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PricerStatus {
    /// No option bound; `evaluate` fails with `UninitializedPricer`.
    Unconfigured,
    /// Bound to an option's lattice, root not yet valued.
    Configured,
    /// Root value computed.
    Priced,
}

/// A strategy that values a [`TreeOption`] on its lattice.
///
/// A pricer is bound to one option per run with
/// [`configure`][Self::configure] and returned to the unconfigured state by
/// [`finish`][Self::finish] or [`reset`][Self::reset]; no values survive
/// from one run to the next.
pub trait LatticePricer: fmt::Debug + Send {
    /// The strategy this pricer implements.
    fn pricer_type(&self) -> PricerType;

    /// Current lifecycle state.
    fn status(&self) -> PricerStatus;

    /// Bind the pricer to `option`, discarding any previous run.
    fn configure(&mut self, option: &dyn TreeOption);

    /// Value of node `(j, m)` of `option`'s lattice.
    ///
    /// Fails with `UninitializedPricer` before [`configure`][Self::configure]
    /// and with `InvalidParameters` if `option` is not the one the run was
    /// configured for.
    fn evaluate(&mut self, j: Size, m: Size, option: &dyn TreeOption) -> Result<Real>;

    /// Value of the root node.
    fn price(&mut self, option: &dyn TreeOption) -> Result<Real> {
        self.evaluate(0, 0, option)
    }

    /// End the run, handing back the node values it computed.
    fn finish(&mut self) -> Option<PriceCache>;

    /// End the run and drop its values.
    fn reset(&mut self) {
        self.finish();
    }
}

// ─── Registry ─────────────────────────────────────────────────────────────────

/// Constructor of a fresh, unconfigured pricer.
pub type PricerFactory = fn() -> Box<dyn LatticePricer>;

struct Registration {
    pricer_type: PricerType,
    id: &'static str,
    factory: PricerFactory,
}

fn binomial_tree() -> Box<dyn LatticePricer> {
    Box::new(BinomialTreePricer::new())
}

static REGISTRY: [Registration; 1] = [Registration {
    pricer_type: PricerType::BinomialTree,
    id: "binomial-tree",
    factory: binomial_tree,
}];

/// Identifier of a pricing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PricerType {
    /// Memoized backward induction on the binomial lattice.
    #[default]
    BinomialTree,
}

impl PricerType {
    /// Every strategy, in registry order.
    pub const ALL: [PricerType; 1] = [PricerType::BinomialTree];

    fn registration(self) -> Option<&'static Registration> {
        REGISTRY.iter().find(|r| r.pricer_type == self)
    }

    /// Identifier used in configuration, e.g. `"binomial-tree"`.
    pub fn id(self) -> &'static str {
        self.registration().map_or("unregistered", |r| r.id)
    }

    /// The registered constructor for this strategy.
    pub fn factory(self) -> Result<PricerFactory> {
        self.registration()
            .map(|r| r.factory)
            .ok_or_else(|| Error::InvalidArgument(format!("no pricer registered for {self:?}")))
    }

    /// Build a fresh, unconfigured pricer.
    pub fn create(self) -> Result<Box<dyn LatticePricer>> {
        let pricer = (self.factory()?)();
        tracing::trace!(pricer = self.id(), "pricer created");
        Ok(pricer)
    }

    /// Identifiers of all registered strategies.
    pub fn registered_ids() -> impl Iterator<Item = &'static str> {
        REGISTRY.iter().map(|r| r.id)
    }
}

impl fmt::Display for PricerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for PricerType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        REGISTRY
            .iter()
            .find(|r| r.id.eq_ignore_ascii_case(wanted))
            .map(|r| r.pricer_type)
            .ok_or_else(|| {
                let known: Vec<_> = Self::registered_ids().collect();
                Error::InvalidArgument(format!(
                    "unknown pricer '{wanted}' (known: {})",
                    known.join(", ")
                ))
            })
    }
}
