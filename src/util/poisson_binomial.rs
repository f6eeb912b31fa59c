use super::special_functions::erfc;

/// Approximation of the Poisson binomial distribution, the number of
/// successes among independent trials with individual probabilities.
///
/// Uses the normal approximation with a skewness correction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PoissonBinomial {
    mu: f64,
    sigma: f64,
    v: f64,
}

impl PoissonBinomial {
    pub fn new(probabilities: &[f64]) -> Self {
        let mu = probabilities.iter().sum();
        let mut variance = 0.0;
        let mut gamma = 0.0;

        for &p in probabilities {
            variance += p * (1.0 - p);
            gamma += p * (1.0 - p) * (1.0 - 2.0 * p);
        }

        let sigma = f64::sqrt(variance);
        let v = gamma / (6.0 * sigma.powi(3));

        Self { mu, sigma, v }
    }

    /// Approximate probability of at most `count` successes, clamped to
    /// `[0, 1]`.
    pub fn cdf(&self, count: f64) -> f64 {
        if self.sigma == 0.0 {
            return 1.0;
        }

        let k = (count + 0.5 - self.mu) / self.sigma;
        let res = normal_cdf(k) + self.v * (1.0 - k * k) * normal_pdf(k);

        res.clamp(0.0, 1.0)
    }
}

fn normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / 1.414_213_562_37)
}

fn normal_pdf(x: f64) -> f64 {
    f64::exp(-0.5 * x * x) / 2.506_628_274_63
}
