//! Floating point comparisons, decimal rounding, and sample generation.

/// Smallest magnitude that is still compared relatively instead of absolutely.
const RELATIVE_EPSILON: f64 = 2.220_446_049_250_313e-15;

pub trait FloatExt: Sized {
    /// `self == other`
    fn eq(self, other: Self) -> bool;

    /// `self != other`
    fn not_eq(self, other: Self) -> bool;
}

impl FloatExt for f64 {
    fn eq(self, other: Self) -> bool {
        (self - other).abs() < f64::EPSILON
    }

    fn not_eq(self, other: Self) -> bool {
        (self - other).abs() >= f64::EPSILON
    }
}

/// Compares two values, given their norms and the norm of their difference,
/// and determines if they are equal within `max_err`.
#[allow(clippy::float_cmp)]
pub fn almost_equal_norm_relative(a: f64, b: f64, diff: f64, max_err: f64) -> bool {
    // * Infinities are only equal to themselves
    if a == f64::INFINITY || b == f64::INFINITY {
        return a == b;
    }

    if a.is_nan() || b.is_nan() {
        return false;
    }

    // * If one is almost zero, fall back to absolute equality
    if a.abs() < RELATIVE_EPSILON || b.abs() < RELATIVE_EPSILON {
        return diff.abs() < max_err;
    }

    if (a == 0.0 && b.abs() < max_err) || (b == 0.0 && a.abs() < max_err) {
        return true;
    }

    diff.abs() < max_err * a.abs().max(b.abs())
}

/// [`almost_equal_norm_relative`] for two plain values with the default
/// tolerance.
pub fn almost_equal_relative(a: f64, b: f64) -> bool {
    almost_equal_norm_relative(a, b, a - b, RELATIVE_EPSILON)
}

/// Truncate `value` to the decimal exponent `exp`, e.g. `exp = -3` keeps three
/// decimal places.
pub fn trunc10(value: f64, exp: i32) -> f64 {
    decimal_adjust(value, exp, f64::trunc)
}

/// Round `value` to the decimal exponent `exp`.
pub fn round10(value: f64, exp: i32) -> f64 {
    decimal_adjust(value, exp, f64::round)
}

/// Floor `value` to the decimal exponent `exp`.
pub fn floor10(value: f64, exp: i32) -> f64 {
    decimal_adjust(value, exp, f64::floor)
}

/// Ceil `value` to the decimal exponent `exp`.
pub fn ceil10(value: f64, exp: i32) -> f64 {
    decimal_adjust(value, exp, f64::ceil)
}

// Shifting through the shortest decimal representation instead of multiplying
// by a power of ten keeps values such as `1.005` from drifting before rounding.
fn decimal_adjust(value: f64, exp: i32, adjust: fn(f64) -> f64) -> f64 {
    if exp == 0 {
        return adjust(value);
    } else if !value.is_finite() {
        return value;
    }

    let shifted = shift_decimal(value, -exp);

    shift_decimal(adjust(shifted), exp)
}

fn shift_decimal(value: f64, exp: i32) -> f64 {
    format!("{value}e{exp}").parse().unwrap_or(value)
}

/// Linearly spaced samples of the given length between `start` and `stop`,
/// both inclusive.
///
/// A length of one yields only `stop`.
pub fn linear_spaced(len: usize, start: f64, stop: f64) -> Vec<f64> {
    match len {
        0 => return Vec::new(),
        1 => return vec![stop],
        _ => {}
    }

    let step = (stop - start) / (len - 1) as f64;

    let mut data: Vec<_> = (0..len).map(|i| start + i as f64 * step).collect();

    if let Some(last) = data.last_mut() {
        *last = stop;
    }

    data
}
