//! Root-finding by Brent, van Wijngaarden, and Dekker, following the
//! formulation of "Numerical Recipes in C".

use crate::util::precision::{almost_equal_norm_relative, almost_equal_relative};

use super::{
    bracketing::{self, Bracket},
    same_sign, RootFindingError,
};

/// Find a root of `f` within `[lower, upper]`.
///
/// The root is refined until it is within `accuracy` or the iteration budget
/// is used up.
#[allow(clippy::float_cmp, clippy::many_single_char_names)]
pub fn find_root(
    mut f: impl FnMut(f64) -> f64,
    mut lower: f64,
    mut upper: f64,
    accuracy: f64,
    max_iterations: usize,
) -> Result<f64, RootFindingError> {
    let mut f_min = f(lower);
    let mut f_max = f(upper);
    let mut f_root = f_max;
    let mut d = 0.0;
    let mut e = 0.0;

    let mut root = upper;
    let mut x_mid = f64::NAN;

    if same_sign(f_min, f_max) {
        return Err(RootFindingError::NotBracketed { lower, upper });
    }

    for _ in 0..=max_iterations {
        // Adjust bounds
        if same_sign(f_root, f_max) {
            upper = lower;
            f_max = f_min;
            d = root - lower;
            e = d;
        }

        if f_max.abs() < f_root.abs() {
            lower = root;
            root = upper;
            upper = lower;
            f_min = f_root;
            f_root = f_max;
            f_max = f_min;
        }

        // Convergence check
        let x_acc = f64::EPSILON * root.abs() + 0.5 * accuracy;
        let x_mid_old = x_mid;
        x_mid = (upper - root) / 2.0;

        if x_mid.abs() <= x_acc || almost_equal_norm_relative(f_root, 0.0, f_root, accuracy) {
            return Ok(root);
        }

        if x_mid == x_mid_old {
            return Err(RootFindingError::Stalled { root });
        }

        if e.abs() >= x_acc && f_min.abs() > f_root.abs() {
            // Attempt inverse quadratic interpolation
            let s = f_root / f_min;

            let (mut p, mut q) = if almost_equal_relative(lower, upper) {
                (2.0 * x_mid * s, 1.0 - s)
            } else {
                let q = f_min / f_max;
                let r = f_root / f_max;

                (
                    s * (2.0 * x_mid * q * (q - r) - (root - lower) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };

            if p > 0.0 {
                q = -q;
            }

            p = p.abs();

            if 2.0 * p < (3.0 * x_mid * q - (x_acc * q).abs()).min((e * q).abs()) {
                // Accept interpolation
                e = d;
                d = p / q;
            } else {
                // Interpolation failed, use bisection
                d = x_mid;
                e = d;
            }
        } else {
            // Bounds decreasing too slowly, use bisection
            d = x_mid;
            e = d;
        }

        lower = root;
        f_min = f_root;

        if d.abs() > x_acc {
            root += d;
        } else {
            root += x_acc.copysign(x_mid);
        }

        f_root = f(root);
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

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::util::root_finding::{
        DEFAULT_ACCURACY, DEFAULT_EXPAND_FACTOR, DEFAULT_MAX_EXPAND_ITERATIONS,
        DEFAULT_MAX_ITERATIONS,
    };

    use super::*;

    #[test]
    fn linear_root() {
        let root = find_root(|x| 3.0 * x + 2.0, -5.0, 5.0, 1e-10, 100).unwrap();

        assert!(
            (root + 2.0 / 3.0).abs() < 1e-10,
            "Expected: -0.6667 | Actual: {root}"
        );
    }

    #[test]
    fn cubic_root() {
        let root = find_root(
            |x| x * x * x - 2.0 * x - 5.0,
            2.0,
            3.0,
            DEFAULT_ACCURACY,
            DEFAULT_MAX_ITERATIONS,
        )
        .unwrap();

        assert!(
            (root - 2.094_551_481_542_327).abs() < 1e-8,
            "Expected: 2.0946 | Actual: {root}"
        );
    }

    #[test]
    fn no_sign_change() {
        assert_eq!(
            find_root(|x| x * x + 1.0, -1.0, 1.0, 1e-8, 100),
            Err(RootFindingError::NotBracketed {
                lower: -1.0,
                upper: 1.0
            })
        );
    }

    #[test]
    fn no_sign_change_after_expansion() {
        let res = find_root_expand(
            |x| x * x + 1.0,
            -1.0,
            1.0,
            DEFAULT_ACCURACY,
            DEFAULT_MAX_ITERATIONS,
            DEFAULT_EXPAND_FACTOR,
            10,
        );

        assert_eq!(
            res,
            Err(RootFindingError::NotBracketed {
                lower: -1.0,
                upper: 1.0
            })
        );
    }

    #[test]
    fn expand_solves_within_given_bounds() {
        let root = find_root_expand(
            |x| x - 734.5,
            -100.0,
            1000.0,
            DEFAULT_ACCURACY,
            DEFAULT_MAX_ITERATIONS,
            DEFAULT_EXPAND_FACTOR,
            DEFAULT_MAX_EXPAND_ITERATIONS,
        )
        .unwrap();

        assert!((root - 734.5).abs() < 1e-8, "Expected: 734.5 | Actual: {root}");
    }

    #[test]
    fn root_beyond_bounds() {
        // * the expansion finds the crossing but the bounds stay as given
        let res = find_root_expand(
            |x| x - 1234.5,
            -100.0,
            1000.0,
            DEFAULT_ACCURACY,
            DEFAULT_MAX_ITERATIONS,
            DEFAULT_EXPAND_FACTOR,
            DEFAULT_MAX_EXPAND_ITERATIONS,
        );

        assert_eq!(
            res,
            Err(RootFindingError::NotBracketed {
                lower: -100.0,
                upper: 1000.0
            })
        );
    }

    #[test]
    fn expand_rejects_invalid_range() {
        let res = find_root_expand(
            |x| x,
            5.0,
            5.0,
            DEFAULT_ACCURACY,
            DEFAULT_MAX_ITERATIONS,
            DEFAULT_EXPAND_FACTOR,
            DEFAULT_MAX_EXPAND_ITERATIONS,
        );

        assert_eq!(
            res,
            Err(RootFindingError::InvalidRange {
                lower: 5.0,
                upper: 5.0
            })
        );
    }

    proptest! {
        #[test]
        fn linear_functions(slope in 0.1_f64..10.0, target in -50.0_f64..50.0) {
            let f = |x: f64| slope * (x - target);

            let brent = find_root(f, -100.0, 100.0, 1e-9, 100).unwrap();
            let bisection = super::super::bisection::find_root(f, -100.0, 100.0, 1e-9, 200).unwrap();

            prop_assert!((brent - target).abs() < 1e-8);
            prop_assert!((bisection - target).abs() < 1e-8);
        }
    }
}
