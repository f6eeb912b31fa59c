//! Bracketed root-finding.
//!
//! Failures are reported through [`RootFindingError`] so that callers can
//! decide on a fallback value instead of aborting the calculation.

use std::cmp::Ordering;

pub mod bisection;
pub mod bracketing;
pub mod brent;

pub use self::bracketing::Bracket;

/// Default accuracy of [`brent::find_root`].
pub const DEFAULT_ACCURACY: f64 = 1e-8;

/// Default iteration budget of the solvers.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Default growth factor when expanding a bracket.
pub const DEFAULT_EXPAND_FACTOR: f64 = 1.6;

/// Default iteration budget when expanding a bracket.
pub const DEFAULT_MAX_EXPAND_ITERATIONS: usize = 100;

/// All the ways that finding a root can fail.
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum RootFindingError {
    #[error("accuracy must be greater than zero, got {0}")]
    InvalidAccuracy(f64),
    #[error("lower bound {lower} must be less than upper bound {upper}")]
    InvalidRange { lower: f64, upper: f64 },
    #[error("no sign change within [{lower}, {upper}]")]
    NotBracketed { lower: f64, upper: f64 },
    #[error("accuracy not reached but cannot be improved further around {root}")]
    Stalled { root: f64 },
    #[error("no root found within {0} iterations")]
    IterationsExhausted(usize),
}

fn sign(x: f64) -> Option<Ordering> {
    x.partial_cmp(&0.0)
}

/// Whether both values have the same sign. Zero is its own sign and `NaN` has
/// none.
fn same_sign(a: f64, b: f64) -> bool {
    matches!((sign(a), sign(b)), (Some(a), Some(b)) if a == b)
}
