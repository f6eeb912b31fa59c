use crate::util::precision::FloatExt;

/// Piecewise linear interpolation over sorted knots, extrapolated with the
/// slope of the outermost segments.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinearSpline {
    x: Vec<f64>,
    c0: Vec<f64>,
    c1: Vec<f64>,
}

impl LinearSpline {
    /// Knots must be sorted ascendingly. Surplus entries of the longer slice
    /// are ignored.
    pub fn interpolate_sorted(x: &[f64], y: &[f64]) -> Self {
        let len = x.len().min(y.len());
        let x = x[..len].to_vec();
        let c0 = y[..len].to_vec();

        let c1 = x
            .windows(2)
            .zip(c0.windows(2))
            .map(|(x, y)| {
                let dx = x[1] - x[0];

                if dx.eq(0.0) {
                    0.0
                } else {
                    (y[1] - y[0]) / dx
                }
            })
            .collect();

        Self { x, c0, c1 }
    }

    /// An empty spline yields `0.0`, a single knot yields its value.
    pub fn interpolate(&self, t: f64) -> f64 {
        match self.x.len() {
            0 => 0.0,
            1 => self.c0[0],
            _ => {
                let k = self.left_segment_index(t);

                self.c0[k] + (t - self.x[k]) * self.c1[k]
            }
        }
    }

    fn left_segment_index(&self, t: f64) -> usize {
        let count = self.x.partition_point(|&x| x <= t);

        count.saturating_sub(1).min(self.x.len() - 2)
    }
}
