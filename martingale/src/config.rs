//! Pricing configuration read from the environment.
//!
//! | Variable            | Default         |
//! |---------------------|-----------------|
//! | `MARTINGALE_PRICER` | `binomial-tree` |
//! | `MARTINGALE_STEPS`  | `5`             |
//!
//! A `.env` file in the working directory is loaded first, if present.

use mg_core::{Error, Result, Size};
use mg_instruments::OptionSpec;
use mg_methods::PricerType;

/// Lattice settings for a pricing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingConfig {
    /// Registered pricer to value options with.
    pub pricer: PricerType,
    /// Number of lattice steps.
    pub steps: Size,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            pricer: PricerType::default(),
            steps: 5,
        }
    }
}

impl PricingConfig {
    /// Load `.env` and read the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name
    /// to its value when set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let pricer = var_or("MARTINGALE_PRICER", PricerType::default().id())
            .parse::<PricerType>()
            .map_err(|e| Error::Config(format!("MARTINGALE_PRICER: {e}")))?;

        let steps = var_or("MARTINGALE_STEPS", "5")
            .trim()
            .parse::<Size>()
            .map_err(|e| Error::Config(format!("MARTINGALE_STEPS: {e}")))?;
        if steps == 0 {
            return Err(Error::Config("MARTINGALE_STEPS: must be at least 1".into()));
        }

        tracing::debug!(pricer = %pricer, steps, "pricing configuration loaded");
        Ok(Self { pricer, steps })
    }

    /// `spec` re-laid on this configuration's step count.
    pub fn apply(&self, spec: &OptionSpec) -> Result<OptionSpec> {
        spec.with_steps(self.steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = PricingConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, PricingConfig::default());
        assert_eq!(config.pricer, PricerType::BinomialTree);
        assert_eq!(config.steps, 5);
    }

    #[test]
    fn reads_both_variables() {
        let config = PricingConfig::from_lookup(lookup(&[
            ("MARTINGALE_PRICER", "Binomial-Tree"),
            ("MARTINGALE_STEPS", " 250 "),
        ]))
        .unwrap();
        assert_eq!(config.pricer, PricerType::BinomialTree);
        assert_eq!(config.steps, 250);
    }

    #[test]
    fn unknown_pricer_is_a_config_error() {
        let err = PricingConfig::from_lookup(lookup(&[("MARTINGALE_PRICER", "trinomial")]))
            .unwrap_err();
        match err {
            Error::Config(msg) => assert!(msg.starts_with("MARTINGALE_PRICER"), "{msg}"),
            other => panic!("expected Config, got {other:?}"),
        }
    }

    #[test]
    fn malformed_steps_are_config_errors() {
        for bad in ["ten", "-3", "0", ""] {
            assert!(
                matches!(
                    PricingConfig::from_lookup(lookup(&[("MARTINGALE_STEPS", bad)])),
                    Err(Error::Config(_))
                ),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn apply_relays_steps() {
        let spec = OptionSpec::new(60.0, 62.0, 0.06, 0.5, 0.13, 5).unwrap();
        let config = PricingConfig {
            steps: 40,
            ..PricingConfig::default()
        };
        let relaid = config.apply(&spec).unwrap();
        assert_eq!(relaid.steps(), 40);
        assert_eq!(relaid.strike_price(), 62.0);
    }
}
