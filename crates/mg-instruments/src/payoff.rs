//! Vanilla option payoffs.
//!
//! Payoffs describe the value of exercising an option as a function of the
//! underlying price. The call and put formulas live in a static table keyed
//! by [`OptionType`]; [`PlainVanillaPayoff`] binds a row of that table to a
//! strike.

use mg_core::Real;
use std::fmt;

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionType {
    /// A call option (right to buy).
    Call,
    /// A put option (right to sell).
    Put,
}

impl OptionType {
    /// +1 for Call, −1 for Put.
    pub fn sign(self) -> Real {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// Lower-case identifier, `"call"` or `"put"`.
    pub fn name(self) -> &'static str {
        self.rule().name
    }

    fn rule(self) -> &'static PayoffRule {
        match self {
            OptionType::Call => &PAYOFF_TABLE[0],
            OptionType::Put => &PAYOFF_TABLE[1],
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "Call"),
            OptionType::Put => write!(f, "Put"),
        }
    }
}

/// Exercise value of one option type as a function of `(spot, strike)`.
struct PayoffRule {
    name: &'static str,
    intrinsic: fn(Real, Real) -> Real,
}

static PAYOFF_TABLE: [PayoffRule; 2] = [
    PayoffRule {
        name: "call",
        intrinsic: |spot, strike| spot - strike,
    },
    PayoffRule {
        name: "put",
        intrinsic: |spot, strike| strike - spot,
    },
];

/// Standard "plain vanilla" European/American option payoff.
///
/// `payoff = max(φ(S − K), 0)` where `φ = +1` for Call, `−1` for Put.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlainVanillaPayoff {
    /// Option type.
    pub option_type: OptionType,
    /// Strike price.
    pub strike: Real,
}

impl PlainVanillaPayoff {
    /// Create a new plain vanilla payoff.
    pub fn new(option_type: OptionType, strike: Real) -> Self {
        Self {
            option_type,
            strike,
        }
    }

    /// Payoff when the option is held to `price` and exercised only if
    /// worthwhile: `max(intrinsic, 0)`.
    pub fn value(&self, price: Real) -> Real {
        self.intrinsic(price).max(0.0)
    }

    /// Signed exercise value, negative when out of the money.
    pub fn intrinsic(&self, price: Real) -> Real {
        (self.option_type.rule().intrinsic)(price, self.strike)
    }
}

impl fmt::Display for PlainVanillaPayoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vanilla {} @ {}", self.option_type, self.strike)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_vanilla_call() {
        let p = PlainVanillaPayoff::new(OptionType::Call, 100.0);
        assert!((p.value(110.0) - 10.0).abs() < 1e-15);
        assert!((p.value(90.0) - 0.0).abs() < 1e-15);
        assert!((p.value(100.0) - 0.0).abs() < 1e-15);
        assert!((p.intrinsic(90.0) + 10.0).abs() < 1e-15);
    }

    #[test]
    fn plain_vanilla_put() {
        let p = PlainVanillaPayoff::new(OptionType::Put, 100.0);
        assert!((p.value(90.0) - 10.0).abs() < 1e-15);
        assert!((p.value(110.0) - 0.0).abs() < 1e-15);
        assert!((p.intrinsic(110.0) + 10.0).abs() < 1e-15);
    }

    #[test]
    fn table_agrees_with_sign() {
        for option_type in [OptionType::Call, OptionType::Put] {
            let p = PlainVanillaPayoff::new(option_type, 95.0);
            for s in [50.0, 95.0, 130.0] {
                let expected = option_type.sign() * (s - 95.0);
                assert!((p.intrinsic(s) - expected).abs() < 1e-15);
            }
        }
    }

    #[test]
    fn names_come_from_the_table() {
        assert_eq!(OptionType::Call.name(), "call");
        assert_eq!(OptionType::Put.name(), "put");
    }

    #[test]
    fn description() {
        let p = PlainVanillaPayoff::new(OptionType::Put, 62.0);
        assert_eq!(p.to_string(), "Vanilla Put @ 62");
    }
}
