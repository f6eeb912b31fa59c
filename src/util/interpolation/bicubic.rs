use super::{outer_index, tensor_segment, BoundaryDerivatives, CubicInterp};

/// Cubic Hermite interpolation on a rectilinear grid.
///
/// `values[i][j]` is the value at `(x[i], y[j])`.
#[derive(Clone, Debug, PartialEq)]
pub struct BicubicInterp {
    x: Vec<f64>,
    dx: BoundaryDerivatives,
    interps: Vec<CubicInterp>,
}

impl BicubicInterp {
    /// Returns `None` if any axis has fewer than two knots or if the grid
    /// does not match the axes.
    pub fn new(
        x: &[f64],
        y: &[f64],
        values: &[Vec<f64>],
        dx: BoundaryDerivatives,
        dy: BoundaryDerivatives,
    ) -> Option<Self> {
        if x.len() < 2 || x.len() != values.len() {
            return None;
        }

        let interps = values
            .iter()
            .map(|row| CubicInterp::new(y, row, dy))
            .collect::<Option<Vec<_>>>()?;

        Some(Self {
            x: x.to_vec(),
            dx,
            interps,
        })
    }

    pub fn spline_index(&self, x: f64, y: f64) -> (usize, usize) {
        (outer_index(&self.x, x), self.interps[0].spline_index(y))
    }

    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        let (x_idx, y_idx) = self.spline_index(x, y);

        self.evaluate_at(x_idx, y_idx, x, y)
    }

    /// Evaluate on the grid cell given by [`BicubicInterp::spline_index`].
    pub fn evaluate_at(&self, x_idx: usize, y_idx: usize, x: f64, y: f64) -> f64 {
        tensor_segment(&self.x, x_idx, self.dx, |i| {
            self.interps[i].evaluate_at(y_idx, y)
        })
        .evaluate(x)
    }
}
