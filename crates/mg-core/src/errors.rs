//! Error types for martingale.
//!
//! Every fallible operation in the workspace returns [`Result`] with the
//! single `thiserror`-derived [`Error`] enum defined here. Guard clauses are
//! written with the `ensure!`, `ensure_valid!` and `ensure_post!` macros.

use thiserror::Error;

/// The top-level error type used throughout martingale.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Contract or lattice parameters do not describe a usable lattice
    /// (non-positive maturity, zero steps, `u <= d`, arbitrage, ...).
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// A pricer was asked to evaluate a node before being configured.
    #[error("pricer used before configuration")]
    UninitializedPricer,

    /// Precondition violated.
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Postcondition violated.
    #[error("postcondition not satisfied: {0}")]
    Postcondition(String),

    /// Lattice node outside the tree triangle.
    #[error("node (j={j}, m={m}) outside lattice with {steps} steps")]
    IndexOutOfRange {
        /// Number of up-moves.
        j: usize,
        /// Elapsed steps.
        m: usize,
        /// Steps in the lattice.
        steps: usize,
    },

    /// Invalid argument (e.g. an unknown pricer identifier).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Malformed configuration value.
    #[error("config error: {0}")]
    Config(String),
}

/// Shorthand `Result` type used throughout martingale.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use mg_core::{ensure, errors::Error};
/// fn positive(x: f64) -> mg_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(matches!(positive(-1.0), Err(Error::Precondition(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::InvalidParameters(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use mg_core::{ensure_valid, errors::Error};
/// fn steps(n: usize) -> mg_core::errors::Result<usize> {
///     ensure_valid!(n >= 1, "steps must be >= 1, got {n}");
///     Ok(n)
/// }
/// assert!(steps(3).is_ok());
/// assert!(matches!(steps(0), Err(Error::InvalidParameters(_))));
/// ```
#[macro_export]
macro_rules! ensure_valid {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidParameters(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Postcondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use mg_core::{ensure_post, errors::Error};
/// fn compute(x: f64) -> mg_core::errors::Result<f64> {
///     let result = x * 2.0;
///     ensure_post!(result > 0.0, "result must be positive, got {result}");
///     Ok(result)
/// }
/// assert!(compute(1.0).is_ok());
/// assert!(compute(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure_post {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Postcondition(
                format!($($msg)*)
            ));
        }
    };
}
