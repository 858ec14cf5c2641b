//! Binomial distribution.
//!
//! Wraps the `statrs` crate's binomial implementation. In a recombining
//! lattice with `n` steps and up-probability `p`, the number of up-moves at
//! maturity follows this distribution, which gives a closed-form check on
//! European lattice prices.

use mg_core::{ensure_valid, Error, Real, Result};
use statrs::distribution::{Binomial, Discrete, DiscreteCDF};

/// Binomial distribution with `n` trials and success probability `p`.
#[derive(Debug, Clone)]
pub struct BinomialDistribution {
    dist: Binomial,
    n: u64,
    p: Real,
}

impl BinomialDistribution {
    /// Create a binomial distribution with `n` trials and probability `p`.
    ///
    /// Fails with [`Error::InvalidParameters`] if `p` is not in `[0, 1]` or
    /// `n` is 0.
    pub fn new(p: Real, n: u64) -> Result<Self> {
        ensure_valid!((0.0..=1.0).contains(&p), "p must be in [0, 1], got {p}");
        ensure_valid!(n > 0, "n must be positive");
        let dist = Binomial::new(p, n).map_err(|e| Error::InvalidParameters(e.to_string()))?;
        Ok(Self { dist, n, p })
    }

    /// Number of trials.
    pub fn n(&self) -> u64 {
        self.n
    }

    /// Success probability.
    pub fn p(&self) -> Real {
        self.p
    }

    /// Probability mass function P(X = k).
    pub fn pmf(&self, k: u64) -> Real {
        self.dist.pmf(k)
    }

    /// Cumulative distribution function P(X ≤ k).
    pub fn cdf(&self, k: u64) -> Real {
        self.dist.cdf(k)
    }

    /// Mean of the distribution (= np).
    pub fn mean(&self) -> Real {
        self.n as Real * self.p
    }

    /// Variance of the distribution (= np(1-p)).
    pub fn variance(&self) -> Real {
        self.n as Real * self.p * (1.0 - self.p)
    }

    /// Expectation `E[f(X)] = Σ pmf(k) f(k)` over `k = 0..=n`.
    pub fn expectation(&self, f: impl Fn(u64) -> Real) -> Real {
        (0..=self.n).map(|k| self.pmf(k) * f(k)).sum()
    }
}
