//! Floating-point comparison for lattice results.
//!
//! Lattice prices are compared in two regimes: against each other, where
//! identical arithmetic should agree to a few ulps, and against a closed
//! form, where the discretisation error is measured relative to the
//! reference.

use mg_core::Real;

/// Agreement to within `ulps` machine epsilons, scaled by the larger
/// magnitude. Exact equality (including both zero) always passes.
#[inline]
pub fn close_enough(a: Real, b: Real, ulps: u32) -> bool {
    if a == b {
        return true;
    }
    let scale = a.abs().max(b.abs());
    (a - b).abs() <= scale * Real::EPSILON * Real::from(ulps)
}

/// `|value - reference| / |reference|`, or the absolute error when the
/// reference is zero.
#[inline]
pub fn relative_error(value: Real, reference: Real) -> Real {
    let diff = (value - reference).abs();
    match reference.abs() {
        r if r > 0.0 => diff / r,
        _ => diff,
    }
}
