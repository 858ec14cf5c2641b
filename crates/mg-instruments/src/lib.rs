//! # mg-instruments
//!
//! Vanilla option instruments: European and American calls and puts priced
//! on a binomial lattice.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod engine;
pub mod exercise;
pub mod option;
pub mod option_spec;
pub mod payoff;

pub use engine::{PricingEngine, PricingResults};
pub use exercise::ExerciseType;
pub use option::{price, OptionKind, VanillaOption, VanillaOptionArguments};
pub use option_spec::{OptionSpec, OptionSpecBuilder};
pub use payoff::{OptionType, PlainVanillaPayoff};
