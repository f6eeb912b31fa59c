use proptest::prelude::*;
use rosu_tp::util::{
    interpolation::LinearSpline,
    mean::power_mean,
    poisson_binomial::PoissonBinomial,
    root_finding::{brent, RootFindingError, DEFAULT_ACCURACY, DEFAULT_MAX_ITERATIONS},
    special_functions::{erf, erf_inv, logistic, logit},
};

use self::common::*;

mod common;

proptest! {
    #[test]
    fn erf_inv_inverts_erf(x in -2.5..2.5_f64) {
        let inverted = erf_inv(erf(x));

        prop_assert!((inverted - x).abs() < 1e-6, "{inverted} != {x}");
    }

    #[test]
    fn logit_inverts_logistic(x in -10.0..10.0_f64) {
        let inverted = logit(logistic(x));

        prop_assert!((inverted - x).abs() < 1e-8, "{inverted} != {x}");
    }

    #[test]
    fn power_mean_is_bounded(values in prop::collection::vec(0.01..100.0_f64, 1..20), p in 1.0..10.0_f64) {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(0.0, f64::max);
        let mean = power_mean(&values, p);

        prop_assert!(mean >= min - 1e-9 && mean <= max + 1e-9);
    }

    #[test]
    fn brent_finds_cube_roots(a in 0.1..100.0_f64) {
        let root = brent::find_root(|x| x * x * x - a, 0.0, 10.0, DEFAULT_ACCURACY, DEFAULT_MAX_ITERATIONS)
            .unwrap();

        prop_assert!((root - a.cbrt()).abs() < 1e-6);
    }

    #[test]
    fn spline_within_knots(t in 0.0..4.0_f64) {
        let spline = LinearSpline::interpolate_sorted(&[0.0, 1.0, 2.5, 4.0], &[3.0, 1.0, 2.0, 0.5]);
        let value = spline.interpolate(t);

        prop_assert!((0.5..=3.0).contains(&value));
    }
}

#[test]
fn power_mean_of_equal_values() {
    assert_approx(power_mean(&[4.2; 7], 7.0), 4.2, 1e-12);
    assert_eq_float(power_mean(&[], 2.0), 0.0);
}

#[test]
fn brent_requires_sign_change() {
    let res = brent::find_root(|x| x * x + 1.0, -1.0, 1.0, DEFAULT_ACCURACY, DEFAULT_MAX_ITERATIONS);

    assert_eq!(
        res,
        Err(RootFindingError::NotBracketed {
            lower: -1.0,
            upper: 1.0
        })
    );
}

#[test]
fn poisson_binomial_cdf_grows() {
    let dist = PoissonBinomial::new(&[0.1, 0.3, 0.2, 0.05, 0.4, 0.25]);

    let cdfs: Vec<_> = (0..6).map(|k| dist.cdf(f64::from(k))).collect();

    assert!(cdfs.windows(2).all(|w| w[0] <= w[1]), "{cdfs:?}");
    assert!(cdfs.iter().all(|p| (0.0..=1.0).contains(p)));
}
