use super::{three_point_derivative, two_point_derivative, BoundaryDerivatives, HermiteSpline};

/// Finite difference cubic Hermite interpolation over sorted knots.
#[derive(Clone, Debug, PartialEq)]
pub struct CubicInterp {
    splines: Vec<HermiteSpline>,
}

impl CubicInterp {
    /// Returns `None` if fewer than two knots are given or if `x` and `values`
    /// differ in length.
    pub fn new(x: &[f64], values: &[f64], derivatives: BoundaryDerivatives) -> Option<Self> {
        if x.len() < 2 || x.len() != values.len() {
            return None;
        }

        let last = x.len() - 1;
        let mut slopes = vec![0.0; x.len()];

        for i in 1..last {
            slopes[i] = three_point_derivative(
                x[i - 1],
                values[i - 1],
                x[i],
                values[i],
                x[i + 1],
                values[i + 1],
            );
        }

        slopes[0] = derivatives
            .lower
            .unwrap_or_else(|| two_point_derivative(x[0], values[0], x[1], values[1]));

        slopes[last] = derivatives.upper.unwrap_or_else(|| {
            two_point_derivative(x[last], values[last], x[last - 1], values[last - 1])
        });

        let splines = (0..last)
            .map(|i| {
                HermiteSpline::new(
                    x[i],
                    values[i],
                    slopes[i],
                    x[i + 1],
                    values[i + 1],
                    slopes[i + 1],
                )
            })
            .collect();

        Some(Self { splines })
    }

    pub fn spline_index(&self, x: f64) -> usize {
        let mut idx = self.splines.len() - 1;

        while idx > 0 && self.splines[idx].x0() > x {
            idx -= 1;
        }

        idx
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        self.evaluate_at(self.spline_index(x), x)
    }

    /// Evaluate the spline of the given segment, see [`CubicInterp::spline_index`].
    pub fn evaluate_at(&self, idx: usize, x: f64) -> f64 {
        self.splines[idx].evaluate(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_few_knots() {
        assert!(CubicInterp::new(&[1.0], &[2.0], BoundaryDerivatives::NONE).is_none());
        assert!(CubicInterp::new(&[1.0, 2.0], &[2.0], BoundaryDerivatives::NONE).is_none());
    }

    #[test]
    fn passes_through_knots() {
        let x = [0.0, 1.0, 2.5, 4.0];
        let y = [1.0, -1.0, 3.0, 2.0];
        let interp = CubicInterp::new(&x, &y, BoundaryDerivatives::NONE).unwrap();

        for (x, y) in x.into_iter().zip(y) {
            assert!((interp.evaluate(x) - y).abs() < 1e-12);
        }
    }

    #[test]
    fn linear_data_stays_linear() {
        let x = [0.0, 1.0, 3.0, 6.0];
        let y: Vec<_> = x.iter().map(|x| 2.0 * x + 1.0).collect();
        let interp = CubicInterp::new(&x, &y, BoundaryDerivatives::NONE).unwrap();

        for t in [-2.0, 0.5, 2.0, 4.5, 9.0] {
            let actual = interp.evaluate(t);
            assert!((actual - (2.0 * t + 1.0)).abs() < 1e-12, "t={t}: {actual}");
        }
    }

    #[test]
    fn explicit_boundary_slopes() {
        let interp = CubicInterp::new(
            &[0.0, 1.0],
            &[0.0, 1.0],
            BoundaryDerivatives::new(Some(0.0), Some(0.0)),
        )
        .unwrap();

        // Smoothstep
        assert!((interp.evaluate(0.5) - 0.5).abs() < 1e-12);
        assert!((interp.evaluate(0.25) - 0.15625).abs() < 1e-12);

        // Extrapolation with a flat boundary slope
        assert!((interp.evaluate(5.0) - 1.0).abs() < 1e-12);
    }
}
