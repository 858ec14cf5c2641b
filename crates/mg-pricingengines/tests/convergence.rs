//! Convergence of lattice prices towards the Black-Scholes closed form, and
//! agreement between the lattice engines.

use approx::assert_relative_eq;
use mg_instruments::{price, OptionKind, OptionSpec, OptionType, PricingEngine, VanillaOption};
use mg_math::{close_enough, relative_error};
use mg_pricingengines::{
    binomial_expectation_price, black_scholes, AnalyticEuropeanEngine, BinomialVanillaEngine,
};
use proptest::prelude::*;

fn at_the_money(steps: usize) -> OptionSpec {
    OptionSpec::new(100.0, 100.0, 0.05, 1.0, 0.2, steps).unwrap()
}

#[test]
fn european_call_converges_to_black_scholes() {
    let lattice = price(OptionKind::EUROPEAN_CALL, &at_the_money(500)).unwrap();
    let (analytic, ..) = black_scholes(OptionType::Call, 100.0, 100.0, 0.05, 0.2, 1.0);
    assert_relative_eq!(lattice, 10.449_602_179_295_152, epsilon = 1e-8);
    assert_relative_eq!(analytic, 10.450_583_572_185_565, epsilon = 1e-6);
    assert!(relative_error(lattice, analytic) < 0.01);
}

#[test]
fn european_put_converges_to_black_scholes() {
    let lattice = price(OptionKind::EUROPEAN_PUT, &at_the_money(500)).unwrap();
    let (analytic, ..) = black_scholes(OptionType::Put, 100.0, 100.0, 0.05, 0.2, 1.0);
    assert_relative_eq!(lattice, 5.572_544_629_364_363, epsilon = 1e-8);
    assert!(relative_error(lattice, analytic) < 0.01);
}

#[test]
fn error_shrinks_with_more_steps() {
    let (analytic, ..) = black_scholes(OptionType::Call, 100.0, 100.0, 0.05, 0.2, 1.0);
    let coarse = price(OptionKind::EUROPEAN_CALL, &at_the_money(1)).unwrap();
    let fine = price(OptionKind::EUROPEAN_CALL, &at_the_money(500)).unwrap();
    assert_relative_eq!(coarse, 11.950_823_019_971_445, epsilon = 1e-10);
    assert!(relative_error(fine, analytic) < relative_error(coarse, analytic));
}

#[test]
fn american_call_matches_european_call_without_dividends() {
    let spec = at_the_money(500);
    let american = price(OptionKind::AMERICAN_CALL, &spec).unwrap();
    let european = price(OptionKind::EUROPEAN_CALL, &spec).unwrap();
    assert!(close_enough(american, european, 4), "{american} vs {european}");
}

#[test]
fn american_put_carries_early_exercise_premium() {
    let spec = OptionSpec::new(100.0, 110.0, 0.05, 1.0, 0.3, 200).unwrap();
    let american = price(OptionKind::AMERICAN_PUT, &spec).unwrap();
    let european = price(OptionKind::EUROPEAN_PUT, &spec).unwrap();
    assert_relative_eq!(american, 15.627_700_225_014_976, epsilon = 1e-8);
    assert_relative_eq!(european, 14.663_364_562_219_474, epsilon = 1e-8);
}

#[test]
fn engines_agree_on_european_greeks() {
    let option = VanillaOption::european_call(at_the_money(500));
    let lattice = BinomialVanillaEngine::new().calculate(&option.arguments()).unwrap();
    let analytic = AnalyticEuropeanEngine::new().calculate(&option.arguments()).unwrap();

    assert!((lattice.npv - analytic.npv).abs() < 0.01);
    for key in ["delta", "gamma", "theta"] {
        let l = lattice.result(key).unwrap();
        let a = analytic.result(key).unwrap();
        assert!(
            (l - a).abs() <= 0.02 * a.abs().max(1e-2),
            "{key}: lattice {l}, analytic {a}"
        );
    }
}

proptest! {
    #[test]
    fn expectation_agrees_with_backward_induction(
        stock in 50.0_f64..150.0,
        strike in 50.0_f64..150.0,
        rate in 0.0_f64..0.08,
        volatility in 0.1_f64..0.5,
        steps in 1_usize..80,
    ) {
        let spec = OptionSpec::new(stock, strike, rate, 1.0, volatility, steps);
        prop_assume!(spec.is_ok());
        let spec = spec.unwrap();
        for kind in [OptionKind::EUROPEAN_CALL, OptionKind::EUROPEAN_PUT] {
            let lattice = price(kind, &spec).unwrap();
            let closed = binomial_expectation_price(kind, &spec).unwrap();
            prop_assert!(
                (lattice - closed).abs() < 1e-8 * stock,
                "{}: lattice {} vs expectation {}", kind, lattice, closed
            );
        }
    }
}
