//! Standard normal distribution.
//!
//! The cumulative function delegates to `statrs`' complementary error
//! function, which keeps full double precision in both tails.

use mg_core::Real;
use statrs::function::erf::erfc;
use std::f64::consts::{PI, SQRT_2};

/// The standard normal probability density function.
///
/// `φ(x) = exp(-x²/2) / √(2π)`
#[inline]
pub fn normal_pdf(x: Real) -> Real {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// The standard normal cumulative distribution function Φ(x).
///
/// `Φ(x) = ½ erfc(−x / √2)`
#[inline]
pub fn normal_cdf(x: Real) -> Real {
    0.5 * erfc(-x / SQRT_2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_pdf_at_zero() {
        let expected = 1.0 / (2.0 * PI).sqrt();
        assert!((normal_pdf(0.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn normal_cdf_at_zero() {
        assert!((normal_cdf(0.0) - 0.5).abs() < 1e-15);
    }

    #[test]
    fn normal_cdf_tails() {
        assert!((normal_cdf(10.0) - 1.0).abs() < 1e-12);
        assert!(normal_cdf(-10.0) < 1e-20);
    }

    #[test]
    fn normal_cdf_symmetry() {
        for x in [0.1, 0.5, 1.0, 1.96, 3.0] {
            let sum = normal_cdf(x) + normal_cdf(-x);
            assert!((sum - 1.0).abs() < 1e-14, "Φ({x}) + Φ(-{x}) = {sum}");
        }
    }

    #[test]
    fn normal_cdf_known_quantile() {
        // erfc is accurate to about 1e-12 around the 97.5% quantile.
        let p = normal_cdf(1.959_963_984_540_054);
        assert!((p - 0.975).abs() < 1e-11, "Φ(1.96) = {p}");
    }
}
