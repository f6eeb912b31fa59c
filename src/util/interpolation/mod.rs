pub use self::{
    bicubic::BicubicInterp, cubic::CubicInterp, hermite::HermiteSpline, linear::LinearSpline,
    tricubic::TricubicInterp,
};

mod bicubic;
mod cubic;
mod hermite;
mod linear;
mod tricubic;

/// Optional derivatives at the outer knots of an axis.
///
/// A missing derivative is replaced by the two-point finite difference of the
/// outermost segment.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BoundaryDerivatives {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

impl BoundaryDerivatives {
    pub const NONE: Self = Self {
        lower: None,
        upper: None,
    };

    pub const fn new(lower: Option<f64>, upper: Option<f64>) -> Self {
        Self { lower, upper }
    }
}

pub fn two_point_derivative(x: f64, val: f64, x_next: f64, val_next: f64) -> f64 {
    (val_next - val) / (x_next - x)
}

pub fn three_point_derivative(
    x_prev: f64,
    val_prev: f64,
    x: f64,
    val: f64,
    x_next: f64,
    val_next: f64,
) -> f64 {
    ((x_next - x) * two_point_derivative(x_prev, val_prev, x, val)
        + (x - x_prev) * two_point_derivative(x, val, x_next, val_next))
        / (x_next - x_prev)
}

/// Index of the segment that `value` falls into, counting down from the last
/// segment of `knots`.
fn outer_index(knots: &[f64], value: f64) -> usize {
    let mut idx = knots.len().saturating_sub(2);

    while idx > 0 && knots[idx] > value {
        idx -= 1;
    }

    idx
}

/// Hermite spline through the segment `[idx, idx + 1]` of `knots` where
/// `eval` yields the interpolated value at a knot index.
///
/// Used to stack one-dimensional interpolants into higher dimensions.
fn tensor_segment(
    knots: &[f64],
    idx: usize,
    derivatives: BoundaryDerivatives,
    mut eval: impl FnMut(usize) -> f64,
) -> HermiteSpline {
    let x0 = knots[idx];
    let x1 = knots[idx + 1];
    let val0 = eval(idx);
    let val1 = eval(idx + 1);

    let d0 = if idx == 0 {
        derivatives
            .lower
            .unwrap_or_else(|| two_point_derivative(x0, val0, x1, val1))
    } else {
        three_point_derivative(knots[idx - 1], eval(idx - 1), x0, val0, x1, val1)
    };

    let d1 = if idx + 2 == knots.len() {
        derivatives
            .upper
            .unwrap_or_else(|| two_point_derivative(x0, val0, x1, val1))
    } else {
        three_point_derivative(x0, val0, x1, val1, knots[idx + 2], eval(idx + 2))
    };

    HermiteSpline::new(x0, val0, d0, x1, val1, d1)
}
