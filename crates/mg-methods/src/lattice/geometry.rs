//! Geometry of a recombining binomial lattice.
//!
//! Each step of length `Δt = T / n` moves the underlying up by
//! `u = 1 + σ√Δt` or down by `d = 1 − σ√Δt`. The risk-neutral up-probability
//! is `p = (e^{rΔt} − d) / (u − d)` and every step is discounted by
//! `e^{−rΔt}`.
//!
//! The geometry is computed once, validated, and then only read: option
//! contracts own it and pricers consume it.

use mg_core::{ensure_valid, DiscountFactor, Probability, Rate, Real, Result, Size, Time, Volatility};

/// Validated lattice parameters and their derived quantities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeGeometry {
    spot: Real,
    rate: Rate,
    maturity: Time,
    volatility: Volatility,
    steps: Size,
    dt: Time,
    up: Real,
    down: Real,
    probability: Probability,
    discount: DiscountFactor,
}

impl LatticeGeometry {
    /// Build the lattice for spot `spot`, continuously compounded `rate`,
    /// `maturity` in years, `volatility` and `steps` time steps.
    ///
    /// Fails with `InvalidParameters` for non-finite inputs, `spot <= 0`,
    /// `steps < 1`, `maturity <= 0`, `volatility < 0`, `u <= d`, `d <= 0`
    /// or a risk-neutral probability outside `[0, 1]`.
    pub fn new(
        spot: Real,
        rate: Rate,
        maturity: Time,
        volatility: Volatility,
        steps: Size,
    ) -> Result<Self> {
        ensure_valid!(
            spot.is_finite() && rate.is_finite() && maturity.is_finite() && volatility.is_finite(),
            "lattice inputs must be finite (spot={spot}, rate={rate}, maturity={maturity}, volatility={volatility})"
        );
        ensure_valid!(spot > 0.0, "stock price must be positive, got {spot}");
        ensure_valid!(steps >= 1, "steps must be >= 1, got {steps}");
        ensure_valid!(maturity > 0.0, "maturity must be positive, got {maturity}");
        ensure_valid!(volatility >= 0.0, "volatility must be non-negative, got {volatility}");

        let dt = maturity / steps as Real;
        let jump = volatility * dt.sqrt();
        let up = 1.0 + jump;
        let down = 1.0 - jump;
        ensure_valid!(
            up > down,
            "degenerate lattice: up factor {up} must exceed down factor {down}"
        );
        ensure_valid!(
            down > 0.0,
            "down factor {down} must be positive (volatility {volatility} too large for {steps} steps)"
        );

        let growth = (rate * dt).exp();
        let probability = (growth - down) / (up - down);
        ensure_valid!(
            (0.0..=1.0).contains(&probability),
            "risk-neutral probability {probability} outside [0, 1]: lattice admits arbitrage"
        );

        Ok(Self {
            spot,
            rate,
            maturity,
            volatility,
            steps,
            dt,
            up,
            down,
            probability,
            discount: (-rate * dt).exp(),
        })
    }

    /// Spot price of the underlying at the root.
    pub fn spot(&self) -> Real {
        self.spot
    }

    /// Continuously compounded risk-free rate.
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// Time to maturity in years.
    pub fn maturity(&self) -> Time {
        self.maturity
    }

    /// Volatility of the underlying.
    pub fn volatility(&self) -> Volatility {
        self.volatility
    }

    /// Number of time steps.
    pub fn steps(&self) -> Size {
        self.steps
    }

    /// Time increment per step.
    pub fn dt(&self) -> Time {
        self.dt
    }

    /// Up factor `u`.
    pub fn up(&self) -> Real {
        self.up
    }

    /// Down factor `d`.
    pub fn down(&self) -> Real {
        self.down
    }

    /// Risk-neutral probability of an up-move.
    pub fn probability(&self) -> Probability {
        self.probability
    }

    /// Discount factor applied per step, `e^{−rΔt}`.
    pub fn discount(&self) -> DiscountFactor {
        self.discount
    }

    /// Number of nodes in the whole lattice, `(n + 1)(n + 2) / 2`.
    pub fn node_count(&self) -> Size {
        (self.steps + 1) * (self.steps + 2) / 2
    }

    /// Underlying price at node `(j, m)`: `S · u^j · d^(m−j)`.
    ///
    /// The caller guarantees `j <= m`.
    pub fn stock_price(&self, j: Size, m: Size) -> Real {
        debug_assert!(j <= m, "node ({j}, {m}) has more up-moves than steps");
        self.spot * self.up.powi(j as i32) * self.down.powi((m - j) as i32)
    }

    /// Discounted risk-neutral expectation of the two successors of a node.
    #[inline]
    pub fn continuation(&self, value_up: Real, value_down: Real) -> Real {
        self.discount * (self.probability * value_up + (1.0 - self.probability) * value_down)
    }
}
