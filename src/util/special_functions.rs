//! Special functions used by the hit probability model and the performance
//! translation.

use std::f64::consts::{FRAC_2_SQRT_PI, PI};

use super::precision::FloatExt;

/// Coefficients of the polynomial approximating `2^x` on `[0, 1)`.
const EXP2_COEFFS: [f64; 7] = [
    1.000_000_006_037_112_6,
    0.693_146_840_098_149,
    0.240_231_082_613_106_4,
    0.055_478_946_831_317_16,
    0.009_686_150_703_032_881,
    0.001_238_253_124_147_896_5,
    0.000_218_714_272_631_215_24,
];

/// Amount of refinement steps applied to the initial [`erf_inv`] guess.
const ERF_INV_REFINEMENTS: usize = 3;

/// The error function.
pub fn erf(x: f64) -> f64 {
    libm::erf(x)
}

/// The complementary error function `1 - erf(x)`.
pub fn erfc(x: f64) -> f64 {
    libm::erfc(x)
}

/// The inverse of [`erf`] on `[-1, 1]`.
///
/// Returns infinity of the matching sign on the boundaries and `NaN` for
/// arguments outside of the domain.
pub fn erf_inv(z: f64) -> f64 {
    if z.is_nan() || z.abs() > 1.0 {
        return f64::NAN;
    } else if z <= -1.0 {
        return f64::NEG_INFINITY;
    } else if z >= 1.0 {
        return f64::INFINITY;
    } else if z.eq(0.0) {
        return 0.0;
    }

    // Winitzki's approximation, good to ~2e-3
    const A: f64 = 0.147;

    let ln = (1.0 - z) * (1.0 + z);
    let ln = ln.ln();
    let t = 2.0 / (PI * A) + 0.5 * ln;
    let mut x = z.signum() * ((t * t - ln / A).sqrt() - t).sqrt();

    // Halley's method; f''/f' = -2x for erf
    for _ in 0..ERF_INV_REFINEMENTS {
        // erfc keeps precision for arguments close to 1
        let err = if z.abs() > 0.5 {
            z.signum() * ((1.0 - z.abs()) - erfc(x.abs()))
        } else {
            erf(x) - z
        };

        let derivative = FRAC_2_SQRT_PI * (-x * x).exp();

        if derivative < f64::MIN_POSITIVE {
            break;
        }

        x -= err / (derivative + x * err);
    }

    x
}

/// The logistic function `1 / (1 + e^-x)`.
pub fn logistic(x: f64) -> f64 {
    1.0 / ((-x).exp() + 1.0)
}

/// The logit function i.e. the inverse of [`logistic`].
///
/// Arguments outside of `[0, 1]` produce `NaN`.
pub fn logit(p: f64) -> f64 {
    if !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }

    (p / (1.0 - p)).ln()
}

/// Fast approximation of `2^x`, accurate to around nine significant digits.
///
/// The integer part is a bit shift, the fractional part a polynomial.
pub fn exp2(x: f64) -> f64 {
    if x < 0.0 {
        return 1.0 / exp2(-x);
    } else if x > 60.0 {
        return f64::INFINITY;
    }

    let floor = x.trunc();
    let frac = x - floor;

    let poly = EXP2_COEFFS
        .iter()
        .rev()
        .fold(0.0, |sum, coeff| sum * frac + coeff);

    (1_u64 << floor as u32) as f64 * poly
}
