//! Binomial lattice engine for vanilla options.
//!
//! Prices through [`VanillaOption`] with the configured lattice pricer and
//! reads delta, gamma and theta off the first two time steps of the filled
//! lattice, so the Greeks cost no extra valuation.

use mg_core::{errors::Result, Real};
use mg_instruments::{
    ExerciseType, OptionKind, OptionSpec, PricingEngine, PricingResults, VanillaOption,
    VanillaOptionArguments,
};
use mg_math::BinomialDistribution;
use mg_methods::PricerType;

/// Lattice pricing engine for European and American vanilla options.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinomialVanillaEngine {
    pricer_type: PricerType,
}

impl BinomialVanillaEngine {
    /// Engine backed by the default lattice pricer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine backed by a specific registered pricer.
    pub fn with_pricer(pricer_type: PricerType) -> Self {
        Self { pricer_type }
    }

    /// The pricer this engine delegates to.
    pub fn pricer_type(&self) -> PricerType {
        self.pricer_type
    }
}

impl PricingEngine<VanillaOptionArguments> for BinomialVanillaEngine {
    fn calculate(&self, args: &VanillaOptionArguments) -> Result<PricingResults> {
        let option = VanillaOption::new(args.kind, args.spec).with_pricer(self.pricer_type);
        let npv = option.price()?;
        let spec = option.spec();

        // Step 1: one up-node and one down-node.
        let v_down = option.node_value(0, 1)?;
        let v_up = option.node_value(1, 1)?;
        let s_down = spec.stock_price_at(0, 1)?;
        let s_up = spec.stock_price_at(1, 1)?;
        let delta = (v_up - v_down) / (s_up - s_down);

        let mut results = PricingResults::from_npv(npv).with_result("delta", delta);

        if spec.steps() >= 2 {
            let v = [
                option.node_value(0, 2)?,
                option.node_value(1, 2)?,
                option.node_value(2, 2)?,
            ];
            let s = [
                spec.stock_price_at(0, 2)?,
                spec.stock_price_at(1, 2)?,
                spec.stock_price_at(2, 2)?,
            ];
            let delta_up = (v[2] - v[1]) / (s[2] - s[1]);
            let delta_down = (v[1] - v[0]) / (s[1] - s[0]);
            let gamma = (delta_up - delta_down) / (0.5 * (s[2] - s[0]));
            // The middle node at step 2 sits at S·u·d, not S; remove the
            // first-order effect of that spot shift before differencing in time.
            let spot_shift = s[1] - spec.stock_price();
            let theta = (v[1] - npv - delta * spot_shift) / (2.0 * spec.delta_t());
            results = results
                .with_result("gamma", gamma)
                .with_result("theta", theta);
        }

        tracing::debug!(
            kind = %args.kind,
            pricer = %self.pricer_type,
            steps = spec.steps(),
            npv,
            delta,
            "binomial engine finished"
        );
        Ok(results)
    }
}

/// European lattice price as a closed-form expectation over the terminal
/// layer: `e^{-rT} Σ_j C(n, j) p^j (1−p)^{n−j} payoff(S u^j d^{n−j})`.
///
/// Independent of the node cache, which makes it a cross-check on the
/// backward induction. Fails with `InvalidArgument` for American exercise,
/// which has no such closed form.
pub fn binomial_expectation_price(kind: OptionKind, spec: &OptionSpec) -> Result<Real> {
    if kind.exercise != ExerciseType::European {
        return Err(mg_core::Error::InvalidArgument(format!(
            "closed-form lattice expectation needs European exercise, got {kind}"
        )));
    }
    let steps = spec.steps();
    let geometry = spec.geometry();
    let distribution = BinomialDistribution::new(spec.probability(), steps as u64)?;
    let phi = kind.option_type.sign();
    let strike = spec.strike_price();
    let expected = distribution.expectation(|j| {
        let stock = geometry.stock_price(j as usize, steps);
        (phi * (stock - strike)).max(0.0)
    });
    Ok((-spec.rate() * spec.maturity()).exp() * expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scenario() -> OptionSpec {
        OptionSpec::new(60.0, 62.0, 0.06, 0.5, 0.13, 5).unwrap()
    }

    #[test]
    fn npv_matches_direct_pricing() {
        let engine = BinomialVanillaEngine::new();
        for kind in OptionKind::ALL {
            let option = VanillaOption::new(kind, scenario());
            let direct = option.price().unwrap();
            let result = option.results_with(&engine).unwrap();
            assert_eq!(result.npv.to_bits(), direct.to_bits(), "{kind}");
        }
    }

    #[test]
    fn greeks_have_expected_signs() {
        let spec = OptionSpec::new(100.0, 100.0, 0.05, 1.0, 0.2, 100).unwrap();
        let engine = BinomialVanillaEngine::new();

        let call = VanillaOption::european_call(spec).results_with(&engine).unwrap();
        let call_delta = call.result("delta").unwrap();
        assert!(call_delta > 0.0 && call_delta < 1.0, "delta = {call_delta}");
        assert!(call.result("gamma").unwrap() > 0.0);
        assert!(call.result("theta").unwrap() < 0.0);

        let put = VanillaOption::american_put(spec).results_with(&engine).unwrap();
        let put_delta = put.result("delta").unwrap();
        assert!(put_delta < 0.0 && put_delta > -1.0, "delta = {put_delta}");
        assert!(put.result("gamma").unwrap() > 0.0);
    }

    #[test]
    fn single_step_lattice_reports_delta_only() {
        let spec = OptionSpec::new(100.0, 100.0, 0.05, 1.0, 0.2, 1).unwrap();
        let result = VanillaOption::european_call(spec)
            .results_with(&BinomialVanillaEngine::new())
            .unwrap();
        // Payoffs 20 and 0 over stock prices 120 and 80.
        assert_relative_eq!(result.result("delta").unwrap(), 0.5, epsilon = 1e-12);
        assert!(result.result("gamma").is_none());
        assert!(result.result("theta").is_none());
    }

    #[test]
    fn expectation_matches_backward_induction() {
        let spec = scenario();
        for kind in [OptionKind::EUROPEAN_CALL, OptionKind::EUROPEAN_PUT] {
            let lattice = mg_instruments::price(kind, &spec).unwrap();
            let closed = binomial_expectation_price(kind, &spec).unwrap();
            assert_relative_eq!(lattice, closed, epsilon = 1e-10);
        }
    }

    #[test]
    fn expectation_rejects_american() {
        assert!(matches!(
            binomial_expectation_price(OptionKind::AMERICAN_PUT, &scenario()),
            Err(mg_core::Error::InvalidArgument(_))
        ));
    }
}
