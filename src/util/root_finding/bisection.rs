//! Bisection root-finding.

use super::{
    bracketing::{self, Bracket},
    same_sign, RootFindingError,
};

/// Find a root of `f` within `[lower, upper]`.
///
/// Both the bracket width and `|f(root)|` must be within `accuracy` for the
/// root to be accepted.
pub fn find_root(
    mut f: impl FnMut(f64) -> f64,
    lower: f64,
    upper: f64,
    accuracy: f64,
    max_iterations: usize,
) -> Result<f64, RootFindingError> {
    if accuracy <= 0.0 {
        return Err(RootFindingError::InvalidAccuracy(accuracy));
    }

    let (mut lower, mut upper) = if upper < lower {
        (upper, lower)
    } else {
        (lower, upper)
    };

    let mut f_min = f(lower);

    if f_min == 0.0 {
        return Ok(lower);
    }

    let mut f_max = f(upper);

    if f_max == 0.0 {
        return Ok(upper);
    }

    if same_sign(f_min, f_max) {
        return Err(RootFindingError::NotBracketed { lower, upper });
    }

    let mut root = 0.5 * (lower + upper);

    for _ in 0..=max_iterations {
        let f_root = f(root);

        if upper - lower <= 2.0 * accuracy && f_root.abs() <= accuracy {
            return Ok(root);
        }

        #[allow(clippy::float_cmp)]
        if lower == root || upper == root {
            return Err(RootFindingError::Stalled { root });
        }

        if same_sign(f_root, f_min) {
            lower = root;
            f_min = f_root;
        } else if same_sign(f_root, f_max) {
            upper = root;
            f_max = f_root;
        } else {
            return Ok(root);
        }

        root = 0.5 * (lower + upper);
    }

    Err(RootFindingError::IterationsExhausted(max_iterations))
}

/// [`find_root`] within `[lower, upper]` after searching for a zero crossing
/// through [`bracketing::expand_reduce`].
///
/// The widened bracket only validates the range, the root is still searched
/// within the given bounds. A root outside of them results in
/// [`RootFindingError::NotBracketed`].
pub fn find_root_expand(
    mut f: impl FnMut(f64) -> f64,
    lower: f64,
    upper: f64,
    accuracy: f64,
    max_iterations: usize,
    expand_factor: f64,
    max_expand_iterations: usize,
) -> Result<f64, RootFindingError> {
    bracketing::expand_reduce(
        &mut f,
        Bracket::new(lower, upper),
        expand_factor,
        max_expand_iterations,
        max_expand_iterations * 10,
    )?;

    find_root(f, lower, upper, accuracy, max_iterations)
}
