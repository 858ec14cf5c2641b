//! Prices the four vanilla variants of a reference contract on the binomial
//! lattice and prints them alongside the Black-Scholes value.
//!
//! Lattice settings come from `MARTINGALE_PRICER` / `MARTINGALE_STEPS`;
//! log verbosity from `RUST_LOG`.

use martingale::config::PricingConfig;
use martingale::instruments::{ExerciseType, OptionKind, OptionSpec, VanillaOption};
use martingale::pricingengines::black_scholes;
use std::process::ExitCode;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "pricing failed");
            ExitCode::FAILURE
        }
    }
}

fn run() -> martingale::core::Result<()> {
    let config = PricingConfig::from_env()?;
    let spec = config.apply(&OptionSpec::new(60.0, 62.0, 0.06, 0.5, 0.13, 5)?)?;

    tracing::info!(
        pricer = %config.pricer,
        steps = spec.steps(),
        stock = spec.stock_price(),
        strike = spec.strike_price(),
        "pricing reference contract"
    );

    println!("{:<16} {:>12} {:>12}", "option", "lattice", "black-scholes");
    for kind in OptionKind::ALL {
        let option = VanillaOption::new(kind, spec).with_pricer(config.pricer);
        let value = option.price()?;
        let analytic = match kind.exercise {
            ExerciseType::European => {
                let (bs, ..) = black_scholes(
                    kind.option_type,
                    spec.stock_price(),
                    spec.strike_price(),
                    spec.rate(),
                    spec.volatility(),
                    spec.maturity(),
                );
                format!("{bs:>12.6}")
            }
            ExerciseType::American => format!("{:>12}", "-"),
        };
        println!("{:<16} {value:>12.6} {analytic}", kind.to_string());
    }
    Ok(())
}
