//! European and American vanilla options.
//!
//! A [`VanillaOption`] is a tagged variant: an [`OptionKind`] (call/put ×
//! European/American) over a shared [`OptionSpec`]. Pricing is delegated to
//! a lattice pricer taken from the strategy registry; the node values of the
//! last run are kept by the option, so repeated calls to
//! [`VanillaOption::price`] are O(1) until a parameter changes.

use crate::engine::{PricingEngine, PricingResults};
use crate::exercise::ExerciseType;
use crate::option_spec::OptionSpec;
use crate::payoff::{OptionType, PlainVanillaPayoff};
use mg_core::{Error, LazyObject, LazyState, Real, Result, Size};
use mg_methods::{ContractTerms, LatticeGeometry, LatticeNode, PriceCache, PricerType, TreeOption};
use std::cell::RefCell;
use std::fmt;

// ────────────────────────────────────────────────────────────────────────────
// OptionKind
// ────────────────────────────────────────────────────────────────────────────

/// Payoff kind and exercise style of a vanilla option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OptionKind {
    /// Call or put.
    pub option_type: OptionType,
    /// European or American.
    pub exercise: ExerciseType,
}

impl OptionKind {
    /// European call.
    pub const EUROPEAN_CALL: Self = Self::new(OptionType::Call, ExerciseType::European);
    /// European put.
    pub const EUROPEAN_PUT: Self = Self::new(OptionType::Put, ExerciseType::European);
    /// American call.
    pub const AMERICAN_CALL: Self = Self::new(OptionType::Call, ExerciseType::American);
    /// American put.
    pub const AMERICAN_PUT: Self = Self::new(OptionType::Put, ExerciseType::American);

    /// All four variants.
    pub const ALL: [Self; 4] = [
        Self::EUROPEAN_CALL,
        Self::EUROPEAN_PUT,
        Self::AMERICAN_CALL,
        Self::AMERICAN_PUT,
    ];

    /// Combine an option type and an exercise style.
    pub const fn new(option_type: OptionType, exercise: ExerciseType) -> Self {
        Self {
            option_type,
            exercise,
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.exercise, self.option_type)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Contract: what the lattice pricer sees
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct Contract {
    kind: OptionKind,
    spec: OptionSpec,
    payoff: PlainVanillaPayoff,
}

impl Contract {
    fn new(kind: OptionKind, spec: OptionSpec) -> Self {
        Self {
            kind,
            spec,
            payoff: PlainVanillaPayoff::new(kind.option_type, spec.strike_price()),
        }
    }
}

impl TreeOption for Contract {
    fn geometry(&self) -> &LatticeGeometry {
        self.spec.geometry()
    }

    fn terminal_value(&self, j: Size) -> Real {
        let g = self.spec.geometry();
        self.payoff.value(g.stock_price(j, g.steps()))
    }

    fn intrinsic_value(&self, j: Size, m: Size) -> Real {
        self.payoff
            .intrinsic(self.spec.geometry().stock_price(j, m))
    }

    fn early_exercise(&self) -> bool {
        self.kind.exercise.allows_early_exercise()
    }

    fn terms(&self) -> ContractTerms {
        ContractTerms {
            payoff: self.kind.option_type.name(),
            strike: self.payoff.strike,
            early_exercise: self.early_exercise(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Engine arguments
// ────────────────────────────────────────────────────────────────────────────

/// Arguments needed for pricing a vanilla option with a [`PricingEngine`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VanillaOptionArguments {
    /// Payoff kind and exercise style.
    pub kind: OptionKind,
    /// Contract and lattice parameters.
    pub spec: OptionSpec,
}

// ────────────────────────────────────────────────────────────────────────────
// VanillaOption
// ────────────────────────────────────────────────────────────────────────────

/// A plain vanilla option on a single underlying, priced on a binomial
/// lattice.
///
/// # Example
/// ```
/// use mg_instruments::{OptionSpec, VanillaOption};
///
/// let spec = OptionSpec::new(60.0, 62.0, 0.06, 0.5, 0.13, 5).unwrap();
/// let american = VanillaOption::american_call(spec);
/// let european = VanillaOption::european_call(spec);
/// assert!(american.price().unwrap() >= european.price().unwrap());
/// ```
#[derive(Debug)]
pub struct VanillaOption {
    contract: Contract,
    pricer_type: PricerType,
    nodes: RefCell<Option<PriceCache>>,
    lazy: LazyState,
}

impl VanillaOption {
    /// Create an option of the given kind, priced with the default strategy.
    pub fn new(kind: OptionKind, spec: OptionSpec) -> Self {
        Self {
            contract: Contract::new(kind, spec),
            pricer_type: PricerType::default(),
            nodes: RefCell::new(None),
            lazy: LazyState::new(),
        }
    }

    /// European call on `spec`.
    pub fn european_call(spec: OptionSpec) -> Self {
        Self::new(OptionKind::EUROPEAN_CALL, spec)
    }

    /// European put on `spec`.
    pub fn european_put(spec: OptionSpec) -> Self {
        Self::new(OptionKind::EUROPEAN_PUT, spec)
    }

    /// American call on `spec`.
    pub fn american_call(spec: OptionSpec) -> Self {
        Self::new(OptionKind::AMERICAN_CALL, spec)
    }

    /// American put on `spec`.
    pub fn american_put(spec: OptionSpec) -> Self {
        Self::new(OptionKind::AMERICAN_PUT, spec)
    }

    /// Select the pricing strategy.
    pub fn with_pricer(mut self, pricer_type: PricerType) -> Self {
        self.set_pricer(pricer_type);
        self
    }

    /// Payoff kind and exercise style.
    pub fn kind(&self) -> OptionKind {
        self.contract.kind
    }

    /// The option type (call/put).
    pub fn option_type(&self) -> OptionType {
        self.contract.kind.option_type
    }

    /// The exercise style.
    pub fn exercise(&self) -> ExerciseType {
        self.contract.kind.exercise
    }

    /// Contract and lattice parameters.
    pub fn spec(&self) -> &OptionSpec {
        &self.contract.spec
    }

    /// The strike price.
    pub fn strike(&self) -> Real {
        self.contract.spec.strike_price()
    }

    /// The payoff.
    pub fn payoff(&self) -> &PlainVanillaPayoff {
        &self.contract.payoff
    }

    /// The selected pricing strategy.
    pub fn pricer_type(&self) -> PricerType {
        self.pricer_type
    }

    /// Payoff at maturity in the node with `j` up-moves.
    pub fn terminal_value(&self, j: Size) -> Result<Real> {
        LatticeNode::new(j, self.spec().steps()).check(self.spec().steps())?;
        Ok(self.contract.terminal_value(j))
    }

    /// Value of immediate exercise at node `(j, m)`; negative when out of
    /// the money.
    pub fn intrinsic_value(&self, j: Size, m: Size) -> Result<Real> {
        LatticeNode::new(j, m).check(self.spec().steps())?;
        Ok(self.contract.intrinsic_value(j, m))
    }

    /// Fair value at the root of the lattice.
    ///
    /// The first call runs the pricer; later calls return the cached value
    /// until a parameter changes or [`clear_cache`][Self::clear_cache] is
    /// called.
    pub fn price(&self) -> Result<Real> {
        self.price_with(false)
    }

    /// Like [`price`][Self::price], optionally discarding cached node
    /// values first.
    pub fn price_with(&self, clean_cache: bool) -> Result<Real> {
        if clean_cache {
            self.clear_cache();
        }
        self.node_value(0, 0)
    }

    /// Value of node `(j, m)` from the last pricing run, pricing first if
    /// needed.
    pub fn node_value(&self, j: Size, m: Size) -> Result<Real> {
        let node = LatticeNode::new(j, m).check(self.spec().steps())?;
        self.calculate()?;
        self.nodes
            .borrow()
            .as_ref()
            .and_then(|cache| cache.get(node))
            .ok_or_else(|| Error::Postcondition(format!("node {node} missing after pricing")))
    }

    /// Drop cached node values; the next [`price`][Self::price] recomputes.
    pub fn clear_cache(&self) {
        if self.nodes.borrow_mut().take().is_some() {
            tracing::debug!(kind = %self.kind(), "node cache cleared");
        }
        self.update();
    }

    /// Number of pricing runs performed so far.
    pub fn pricing_runs(&self) -> u64 {
        self.lazy.calculations()
    }

    /// Replace the contract parameters and invalidate cached values.
    pub fn set_spec(&mut self, spec: OptionSpec) {
        self.contract = Contract::new(self.contract.kind, spec);
        self.clear_cache();
    }

    /// Change the strike and invalidate cached values.
    pub fn set_strike(&mut self, strike_price: Real) -> Result<()> {
        let spec = self.spec().with_strike(strike_price)?;
        self.set_spec(spec);
        Ok(())
    }

    /// Change the pricing strategy and invalidate cached values.
    pub fn set_pricer(&mut self, pricer_type: PricerType) {
        self.pricer_type = pricer_type;
        self.clear_cache();
    }

    /// Get the arguments for a pricing engine.
    pub fn arguments(&self) -> VanillaOptionArguments {
        VanillaOptionArguments {
            kind: self.kind(),
            spec: *self.spec(),
        }
    }

    /// Price this option using the given engine.
    pub fn results_with(
        &self,
        engine: &dyn PricingEngine<VanillaOptionArguments>,
    ) -> Result<PricingResults> {
        engine.calculate(&self.arguments())
    }
}

impl LazyObject for VanillaOption {
    fn perform_calculations(&self) -> Result<()> {
        let mut pricer = self.pricer_type.create()?;
        pricer.configure(&self.contract);
        let value = pricer.price(&self.contract);
        let cache = pricer.finish();
        let value = value?;
        let cache = cache.ok_or_else(|| {
            Error::Postcondition(format!("{} pricer returned no node values", self.pricer_type))
        })?;
        tracing::debug!(
            kind = %self.kind(),
            pricer = %self.pricer_type,
            steps = self.spec().steps(),
            nodes = cache.len(),
            value,
            "option priced"
        );
        *self.nodes.borrow_mut() = Some(cache);
        Ok(())
    }

    fn lazy_state(&self) -> &LazyState {
        &self.lazy
    }
}

/// Price a vanilla option of `kind` on `spec` in one call.
///
/// # Example
/// ```
/// use mg_instruments::{price, OptionKind, OptionSpec};
/// let spec = OptionSpec::new(100.0, 100.0, 0.05, 1.0, 0.2, 1).unwrap();
/// let call = price(OptionKind::EUROPEAN_CALL, &spec).unwrap();
/// let p = ((0.05_f64).exp() - 0.8) / 0.4;
/// assert!((call - (-0.05_f64).exp() * p * 20.0).abs() < 1e-12);
/// ```
pub fn price(kind: OptionKind, spec: &OptionSpec) -> Result<Real> {
    VanillaOption::new(kind, *spec).price()
}
