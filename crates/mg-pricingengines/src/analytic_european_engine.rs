//! Analytic European option engine (Black-Scholes).
//!
//! Prices European vanilla options on a non-dividend-paying stock using the
//! closed-form Black-Scholes formula. Computes NPV and first/second-order
//! Greeks. Lattice prices converge to these values as the number of steps
//! grows.

use mg_core::{ensure, errors::Result, Error, Real};
use mg_instruments::{ExerciseType, OptionType, PricingEngine, PricingResults, VanillaOptionArguments};
use mg_math::distributions::{normal_cdf, normal_pdf};

/// Analytic pricing engine for European vanilla options.
///
/// $$C = S N(d_1) - K e^{-rT} N(d_2)$$
/// $$P = K e^{-rT} N(-d_2) - S N(-d_1)$$
///
/// where $d_{1,2} = \frac{\ln(S/K) + (r \pm \sigma^2/2)T}{\sigma\sqrt{T}}$
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEuropeanEngine;

impl AnalyticEuropeanEngine {
    /// Create a new engine.
    pub fn new() -> Self {
        Self
    }
}

/// Compute Black-Scholes price and Greeks for a European option.
///
/// Returns `(price, delta, gamma, vega, theta, rho)`.
pub fn black_scholes(
    option_type: OptionType,
    spot: Real,
    strike: Real,
    risk_free_rate: Real,
    volatility: Real,
    time_to_expiry: Real,
) -> (Real, Real, Real, Real, Real, Real) {
    let phi = option_type.sign();
    let t = time_to_expiry;

    if t <= 0.0 {
        let intrinsic = (phi * (spot - strike)).max(0.0);
        return (intrinsic, 0.0, 0.0, 0.0, 0.0, 0.0);
    }

    let r = risk_free_rate;
    let sigma = volatility;
    let sqrt_t = t.sqrt();
    let std_dev = sigma * sqrt_t;
    let df_r = (-r * t).exp();
    let fwd = spot * (r * t).exp();

    let (d1, d2) = if std_dev > 1e-15 && strike > 0.0 {
        let d1 = ((spot / strike).ln() + (r + 0.5 * sigma * sigma) * t) / std_dev;
        (d1, d1 - std_dev)
    } else {
        let big = if fwd > strike { 1e15 } else { -1e15 };
        (big, big)
    };

    let nd1 = normal_cdf(phi * d1);
    let nd2 = normal_cdf(phi * d2);
    let npd1 = normal_pdf(d1);

    let price = phi * (spot * nd1 - strike * df_r * nd2);
    let delta = phi * nd1;
    let (gamma, vega) = if std_dev > 1e-15 {
        (npd1 / (spot * std_dev), spot * npd1 * sqrt_t)
    } else {
        (0.0, 0.0)
    };
    // Theta (per year)
    let theta = -(spot * npd1 * sigma) / (2.0 * sqrt_t) - phi * r * strike * df_r * nd2;
    // Rho (per 1.0 rate shift)
    let rho = phi * strike * t * df_r * nd2;

    (price, delta, gamma, vega, theta, rho)
}

impl PricingEngine<VanillaOptionArguments> for AnalyticEuropeanEngine {
    fn calculate(&self, args: &VanillaOptionArguments) -> Result<PricingResults> {
        if args.kind.exercise != ExerciseType::European {
            return Err(Error::InvalidArgument(format!(
                "analytic engine prices European options only, got {}",
                args.kind
            )));
        }
        let spec = &args.spec;
        ensure!(
            spec.volatility() > 0.0,
            "volatility must be positive for the closed form"
        );

        let (price, delta, gamma, vega, theta, rho) = black_scholes(
            args.kind.option_type,
            spec.stock_price(),
            spec.strike_price(),
            spec.rate(),
            spec.volatility(),
            spec.maturity(),
        );

        Ok(PricingResults::from_npv(price)
            .with_result("delta", delta)
            .with_result("gamma", gamma)
            .with_result("vega", vega)
            .with_result("theta", theta)
            .with_result("rho", rho))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mg_instruments::{OptionKind, OptionSpec, VanillaOption};

    #[test]
    fn bs_call_price() {
        // S=100, K=100, r=5%, σ=20%, T=1
        let (price, delta, gamma, vega, _theta, rho) =
            black_scholes(OptionType::Call, 100.0, 100.0, 0.05, 0.20, 1.0);
        assert!((price - 10.4506).abs() < 1e-3, "price = {price}");
        assert!(delta > 0.5 && delta < 0.8, "delta = {delta}");
        assert!(gamma > 0.0, "gamma = {gamma}");
        assert!(vega > 0.0, "vega = {vega}");
        assert!(rho > 0.0, "rho = {rho}");
    }

    #[test]
    fn bs_put_call_parity() {
        let (call, ..) = black_scholes(OptionType::Call, 100.0, 105.0, 0.08, 0.25, 0.5);
        let (put, ..) = black_scholes(OptionType::Put, 100.0, 105.0, 0.08, 0.25, 0.5);
        let parity = call - 100.0 + 105.0 * (-0.08_f64 * 0.5).exp();
        assert!((put - parity).abs() < 1e-10, "put={put}, parity={parity}");
    }

    #[test]
    fn bs_deep_itm_call() {
        let (price, delta, ..) = black_scholes(OptionType::Call, 200.0, 100.0, 0.05, 0.20, 1.0);
        assert!(price > 100.0, "price = {price}");
        assert!(delta > 0.95, "delta = {delta}");
    }

    #[test]
    fn bs_expired_is_intrinsic() {
        let (price, delta, ..) = black_scholes(OptionType::Put, 90.0, 100.0, 0.05, 0.20, 0.0);
        assert_eq!(price, 10.0);
        assert_eq!(delta, 0.0);
    }

    #[test]
    fn engine_prices_european_arguments() {
        let spec = OptionSpec::new(100.0, 100.0, 0.05, 1.0, 0.2, 10).unwrap();
        let option = VanillaOption::european_call(spec);
        let result = option.results_with(&AnalyticEuropeanEngine::new()).unwrap();
        assert!((result.npv - 10.4506).abs() < 1e-3, "npv = {}", result.npv);
        for key in ["delta", "gamma", "vega", "theta", "rho"] {
            assert!(result.result(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn engine_rejects_american() {
        let spec = OptionSpec::new(100.0, 100.0, 0.05, 1.0, 0.2, 10).unwrap();
        let option = VanillaOption::new(OptionKind::AMERICAN_PUT, spec);
        assert!(matches!(
            option.results_with(&AnalyticEuropeanEngine::new()),
            Err(Error::InvalidArgument(_))
        ));
    }
}
