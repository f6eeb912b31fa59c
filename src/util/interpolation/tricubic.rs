use super::{outer_index, tensor_segment, BicubicInterp, BoundaryDerivatives};

/// Cubic Hermite interpolation on a three-dimensional rectilinear grid.
///
/// `values[i][j][k]` is the value at `(x[i], y[j], z[k])`.
#[derive(Clone, Debug, PartialEq)]
pub struct TricubicInterp {
    x: Vec<f64>,
    dx: BoundaryDerivatives,
    interps: Vec<BicubicInterp>,
}

impl TricubicInterp {
    /// Returns `None` if any axis has fewer than two knots or if the grid
    /// does not match the axes.
    pub fn new(
        x: &[f64],
        y: &[f64],
        z: &[f64],
        values: &[Vec<Vec<f64>>],
        dx: BoundaryDerivatives,
        dy: BoundaryDerivatives,
        dz: BoundaryDerivatives,
    ) -> Option<Self> {
        if x.len() < 2 || x.len() != values.len() {
            return None;
        }

        let interps = values
            .iter()
            .map(|plane| BicubicInterp::new(y, z, plane, dy, dz))
            .collect::<Option<Vec<_>>>()?;

        Some(Self {
            x: x.to_vec(),
            dx,
            interps,
        })
    }

    pub fn evaluate(&self, x: f64, y: f64, z: f64) -> f64 {
        let x_idx = outer_index(&self.x, x);
        let (y_idx, z_idx) = self.interps[0].spline_index(y, z);

        tensor_segment(&self.x, x_idx, self.dx, |i| {
            self.interps[i].evaluate_at(y_idx, z_idx, y, z)
        })
        .evaluate(x)
    }
}
