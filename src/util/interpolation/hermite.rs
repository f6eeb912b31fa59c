/// Cubic Hermite polynomial on `[x0, x1]`, extrapolated linearly with the
/// boundary slope outside of it.
#[derive(Clone, Debug, PartialEq)]
pub struct HermiteSpline {
    x0: f64,
    x1: f64,
    d1: f64,
    val1: f64,
    c0: f64,
    c1: f64,
    c2: f64,
    c3: f64,
}

impl HermiteSpline {
    pub fn new(x0: f64, val0: f64, d0: f64, x1: f64, val1: f64, d1: f64) -> Self {
        let scale = (x1 - x0).recip();
        let scale2 = scale * scale;

        Self {
            x0,
            x1,
            d1,
            val1,
            c0: val0,
            c1: d0,
            c2: 3.0 * (val1 - val0) * scale2 - (2.0 * d0 + d1) * scale,
            c3: (2.0 * (val0 - val1) * scale + d0 + d1) * scale2,
        }
    }

    pub const fn x0(&self) -> f64 {
        self.x0
    }

    pub const fn x1(&self) -> f64 {
        self.x1
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        if x > self.x1 {
            return (x - self.x1) * self.d1 + self.val1;
        }

        if x < self.x0 {
            return (x - self.x0) * self.c1 + self.c0;
        }

        let t = x - self.x0;
        let t2 = t * t;
        let t3 = t2 * t;

        self.c0 + self.c1 * t + self.c2 * t2 + self.c3 * t3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_knots() {
        let spline = HermiteSpline::new(1.0, 2.0, 0.5, 3.0, -1.0, 4.0);

        assert!((spline.evaluate(1.0) - 2.0).abs() < 1e-12);
        assert!((spline.evaluate(3.0) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn reproduces_cubic() {
        // f(x) = x³ - x, f'(x) = 3x² - 1
        let f = |x: f64| x * x * x - x;
        let spline = HermiteSpline::new(-1.0, f(-1.0), 2.0, 2.0, f(2.0), 11.0);

        for x in [-0.75, 0.0, 0.3, 1.1, 1.9] {
            let actual = spline.evaluate(x);
            assert!((actual - f(x)).abs() < 1e-12, "x={x}: {actual} vs {}", f(x));
        }
    }

    #[test]
    fn linear_extrapolation() {
        let spline = HermiteSpline::new(0.0, 1.0, -2.0, 1.0, 3.0, 5.0);

        assert!((spline.evaluate(-1.0) - 3.0).abs() < 1e-12);
        assert!((spline.evaluate(3.0) - 13.0).abs() < 1e-12);
    }
}
