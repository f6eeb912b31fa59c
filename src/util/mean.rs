use super::precision::FloatExt;

/// The power mean `(Σ x^p / n)^(1/p)` of the given values.
///
/// Non-positive values count as zero. For negative `p` any such value pulls
/// the mean down to `0.0`, for `p == 0` the geometric mean is returned, and an
/// empty slice has a mean of `0.0`.
pub fn power_mean(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let n = values.len() as f64;

    if p.eq(0.0) {
        if values.iter().any(|&x| x <= 0.0) {
            return 0.0;
        }

        return (values.iter().map(|x| x.ln()).sum::<f64>() / n).exp();
    }

    let mut sum = 0.0;

    for &x in values {
        if x > 0.0 {
            sum += x.powf(p);
        } else if p < 0.0 {
            return 0.0;
        }
    }

    (sum / n).powf(p.recip())
}

/// [`power_mean`] of two values.
pub fn power_mean_2(x: f64, y: f64, p: f64) -> f64 {
    power_mean(&[x, y], p)
}

/// Sum of `values` where the `i`-th value is weighted by `decay^i`.
pub fn weighted_sum(values: &[f64], decay: f64) -> f64 {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| value * decay.powf(i as f64))
        .sum()
}
