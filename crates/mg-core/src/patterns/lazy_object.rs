//! LazyObject pattern.
//!
//! A `LazyObject` caches the result of an expensive computation and only
//! recomputes it after its inputs have changed and [`LazyObject::update`]
//! marked the cache stale.
//!
//! The bookkeeping uses interior mutability (`Cell`) so that the calculation
//! can be triggered through an `&self` reference.

use std::cell::Cell;

/// Trait for objects that lazily compute and cache their results.
///
/// Implementors provide [`perform_calculations`][Self::perform_calculations]
/// and expose their embedded [`LazyState`]; the provided methods handle the
/// `calculated` flag.
pub trait LazyObject {
    /// Perform the actual (expensive) calculation and store its results.
    ///
    /// Called by [`calculate`][Self::calculate] when the cached result is
    /// stale.
    fn perform_calculations(&self) -> crate::errors::Result<()>;

    /// The embedded bookkeeping state.
    fn lazy_state(&self) -> &LazyState;

    /// Ensure results are up-to-date.
    ///
    /// The cache is marked valid only if the calculation succeeds, so an
    /// error never leaves a half-populated result behind as "current".
    fn calculate(&self) -> crate::errors::Result<()> {
        let state = self.lazy_state();
        if !state.calculated.get() {
            self.perform_calculations()?;
            state.calculated.set(true);
            state.calculations.set(state.calculations.get() + 1);
        }
        Ok(())
    }

    /// Mark the cached result as stale without triggering a recalculation.
    fn update(&self) {
        self.lazy_state().calculated.set(false);
    }

    /// Return `true` if the cache is currently valid.
    fn is_calculated(&self) -> bool {
        self.lazy_state().calculated.get()
    }
}

/// Bookkeeping fields required by [`LazyObject`].
///
/// Embed this in your struct and return it from
/// [`LazyObject::lazy_state`].
///
/// # Example
/// ```
/// use std::cell::Cell;
/// use mg_core::patterns::lazy_object::{LazyObject, LazyState};
///
/// struct Doubler {
///     state: LazyState,
///     input: f64,
///     result: Cell<f64>,
/// }
///
/// impl LazyObject for Doubler {
///     fn perform_calculations(&self) -> mg_core::errors::Result<()> {
///         self.result.set(2.0 * self.input);
///         Ok(())
///     }
///     fn lazy_state(&self) -> &LazyState { &self.state }
/// }
///
/// let obj = Doubler { state: LazyState::new(), input: 21.0, result: Cell::new(0.0) };
/// obj.calculate().unwrap();
/// obj.calculate().unwrap();
/// assert_eq!(obj.result.get(), 42.0);
/// assert_eq!(obj.state.calculations(), 1);
/// ```
#[derive(Debug, Default)]
pub struct LazyState {
    calculated: Cell<bool>,
    calculations: Cell<u64>,
}

impl LazyState {
    /// Create a new `LazyState` where the cache is initially stale.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times the calculation has actually run.
    pub fn calculations(&self) -> u64 {
        self.calculations.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{Error, Result};

    struct Flaky {
        state: LazyState,
        fail: Cell<bool>,
    }

    impl LazyObject for Flaky {
        fn perform_calculations(&self) -> Result<()> {
            if self.fail.get() {
                return Err(Error::Postcondition("boom".into()));
            }
            Ok(())
        }

        fn lazy_state(&self) -> &LazyState {
            &self.state
        }
    }

    #[test]
    fn failed_calculation_stays_stale() {
        let obj = Flaky {
            state: LazyState::new(),
            fail: Cell::new(true),
        };
        assert!(obj.calculate().is_err());
        assert!(!obj.is_calculated());
        assert_eq!(obj.state.calculations(), 0);

        obj.fail.set(false);
        obj.calculate().unwrap();
        assert!(obj.is_calculated());
    }

    #[test]
    fn update_forces_recalculation() {
        let obj = Flaky {
            state: LazyState::new(),
            fail: Cell::new(false),
        };
        obj.calculate().unwrap();
        obj.calculate().unwrap();
        assert_eq!(obj.state.calculations(), 1);

        obj.update();
        assert!(!obj.is_calculated());
        obj.calculate().unwrap();
        assert_eq!(obj.state.calculations(), 2);
    }
}
