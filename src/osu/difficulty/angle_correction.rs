use std::sync::OnceLock;

use crate::util::{interpolation::LinearSpline, special_functions::logistic};

/// Learned corrections for the angle between a movement and its
/// neighbouring movement.
///
/// Each correction is the logistic of a sum of scaled L2 norms whose
/// parameters depend on the movement's distance.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AngleCorrection {
    /// Flow aim w.r.t. the object two before.
    FlowNeg2,
    /// Snap aim w.r.t. the object two before.
    SnapNeg2,
    /// Flow aim w.r.t. the next object.
    FlowNext,
    /// Snap aim w.r.t. the next object.
    SnapNext,
}

impl AngleCorrection {
    /// Evaluate the correction for a movement of normalized distance
    /// `distance` with the neighbour located at `(x, y)`.
    pub fn evaluate(self, distance: f64, x: f64, y: f64) -> f64 {
        let [flow_neg2, snap_neg2, flow_next, snap_next] = corrections();

        let correction = match self {
            Self::FlowNeg2 => flow_neg2,
            Self::SnapNeg2 => snap_neg2,
            Self::FlowNext => flow_next,
            Self::SnapNext => snap_next,
        };

        correction.evaluate(distance, x, y)
    }
}

fn corrections() -> &'static [MultiL2NormCorrection; 4] {
    static CORRECTIONS: OnceLock<[MultiL2NormCorrection; 4]> = OnceLock::new();

    CORRECTIONS.get_or_init(|| {
        [
            MultiL2NormCorrection::new(&FLOW_NEG2),
            MultiL2NormCorrection::new(&SNAP_NEG2),
            MultiL2NormCorrection::new(&FLOW_NEXT),
            MultiL2NormCorrection::new(&SNAP_NEXT),
        ]
    })
}

struct L2NormCorrection {
    x_offset: LinearSpline,
    y_offset: LinearSpline,
    offset: LinearSpline,
    scale: LinearSpline,
}

impl L2NormCorrection {
    fn evaluate(&self, distance: f64, x: f64, y: f64) -> f64 {
        let x = x - self.x_offset.interpolate(distance);
        let y = y - self.y_offset.interpolate(distance);
        let z = self.offset.interpolate(distance);
        let c = self.scale.interpolate(distance);

        c * (x * x + y * y + z).sqrt()
    }
}

struct MultiL2NormCorrection {
    components: Vec<L2NormCorrection>,
    offset: LinearSpline,
    scale: LinearSpline,
}

impl MultiL2NormCorrection {
    fn new(table: &CorrectionTable) -> Self {
        let distances = table.distances;

        let components = table
            .components
            .iter()
            .map(|[x_offset, y_offset, offset, scale]| L2NormCorrection {
                x_offset: LinearSpline::interpolate_sorted(distances, x_offset),
                y_offset: LinearSpline::interpolate_sorted(distances, y_offset),
                offset: LinearSpline::interpolate_sorted(distances, offset),
                scale: LinearSpline::interpolate_sorted(distances, scale),
            })
            .collect();

        Self {
            components,
            offset: LinearSpline::interpolate_sorted(distances, table.offset),
            scale: LinearSpline::interpolate_sorted(distances, table.scale),
        }
    }

    fn evaluate(&self, distance: f64, x: f64, y: f64) -> f64 {
        let sum = self
            .components
            .iter()
            .map(|component| component.evaluate(distance, x, y))
            .sum::<f64>()
            + self.offset.interpolate(distance);

        logistic(sum) * self.scale.interpolate(distance)
    }
}

struct CorrectionTable {
    distances: &'static [f64],
    /// x offset, y offset, offset, and scale of each component
    components: &'static [[&'static [f64]; 4]],
    offset: &'static [f64],
    scale: &'static [f64],
}

const FLOW_NEG2_DISTANCES: &[f64] = &[0.0, 1.0, 1.35, 1.7, 2.3, 3.0];
const SNAP_NEG2_DISTANCES: &[f64] = &[0.0, 1.5, 2.5, 4.0, 6.0, 8.0];
const FLOW_NEXT_DISTANCES: &[f64] = &[0.0, 1.0, 2.0, 3.0, 4.0];
const SNAP_NEXT_DISTANCES: &[f64] = &[1.0, 1.5, 2.5, 4.0, 6.0, 8.0];

const FLOW_NEG2: CorrectionTable = CorrectionTable {
    distances: FLOW_NEG2_DISTANCES,
    components: &[
        [
            &[0.0, -0.5, -1.15, -1.8, -2.0, -2.0],
            &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            &[1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
            &[6.0, 1.0, 1.0, 1.0, 1.0, 1.0],
        ],
        [
            &[0.0, -0.8, -0.9, -1.0, -1.0, -1.0],
            &[0.0, 0.5, 0.75, 1.0, 2.0, 2.0],
            &[1.0, 0.5, 0.4, 0.3, 0.0, 0.0],
            &[3.0, 0.7, 0.7, 0.7, 1.0, 1.0],
        ],
        [
            &[0.0, -0.8, -0.9, -1.0, -1.0, -1.0],
            &[0.0, -0.5, -0.75, -1.0, -2.0, -2.0],
            &[1.0, 0.5, 0.4, 0.3, 0.0, 0.0],
            &[3.0, 0.7, 0.7, 0.7, 1.0, 1.0],
        ],
        [
            &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            &[0.0, 0.95, 0.975, 1.0, 0.0, 0.0],
            &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            &[0.0, 0.7, 0.55, 0.4, 0.0, 0.0],
        ],
        [
            &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            &[0.0, -0.95, -0.975, -1.0, 0.0, 0.0],
            &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            &[0.0, 0.7, 0.55, 0.4, 0.0, 0.0],
        ],
    ],
    offset: &[-11.5, -5.9, -5.4, -5.6, -2.0, -2.0],
    scale: &[1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
};

const SNAP_NEG2: CorrectionTable = CorrectionTable {
    distances: SNAP_NEG2_DISTANCES,
    components: &[
        [
            &[0.5, 2.0, 2.8, 5.0, 5.0, 5.0],
            &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            &[1.0, 1.0, 1.0, 0.0, 0.0, 0.0],
            &[0.6, 1.0, 0.8, 0.6, 0.2, 0.2],
        ],
        [
            &[0.25, 1.0, 0.7, 2.0, 2.0, 2.0],
            &[0.5, 2.0, 2.8, 4.0, 6.0, 6.0],
            &[1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
            &[0.6, 1.0, 0.8, 0.3, 0.2, 0.2],
        ],
        [
            &[0.25, 1.0, 0.7, 2.0, 2.0, 2.0],
            &[-0.5, -2.0, -2.8, -4.0, -6.0, -6.0],
            &[1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
            &[0.6, 1.0, 0.8, 0.3, 0.2, 0.2],
        ],
        [
            &[0.0, 0.0, -0.5, -2.0, -3.0, -3.0],
            &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            &[1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
            &[-0.7, -1.0, -0.9, -0.1, -0.1, -0.1],
        ],
    ],
    offset: &[-1.0, -5.0, -6.7, -6.5, -4.3, -4.3],
    scale: &[1.0, 0.85, 0.6, 0.8, 1.0, 1.0],
};

const FLOW_NEXT: CorrectionTable = CorrectionTable {
    distances: FLOW_NEXT_DISTANCES,
    components: &[
        [
            &[0.0, 1.2, 2.0, 2.0, 2.0],
            &[0.0, 0.0, 0.0, 0.0, 0.0],
            &[0.0, 0.0, 0.0, 0.0, 0.0],
            &[1.5, 1.0, 0.4, 0.0, 0.0],
        ],
        [
            &[0.0, 0.0, 0.0, 0.0, 0.0],
            &[0.0, 0.0, 0.0, 0.0, 0.0],
            &[0.0, 0.0, 0.0, 0.0, 0.0],
            &[2.0, 1.5, 2.5, 3.5, 3.5],
        ],
        [
            &[0.0, 0.3, 0.6, 0.6, 0.6],
            &[0.0, 1.0, 2.4, 2.4, 2.4],
            &[0.0, 0.0, 0.0, 0.0, 0.0],
            &[0.0, 0.4, 0.4, 0.0, 0.0],
        ],
        [
            &[0.0, 0.3, 0.6, 0.6, 0.6],
            &[0.0, -1.0, -2.4, -2.4, -2.4],
            &[0.0, 0.0, 0.0, 0.0, 0.0],
            &[0.0, 0.4, 0.4, 0.0, 0.0],
        ],
    ],
    offset: &[-4.0, -5.3, -5.2, -2.5, -2.5],
    scale: &[1.0, 1.0, 1.0, 1.0, 1.0],
};

const SNAP_NEXT: CorrectionTable = CorrectionTable {
    distances: SNAP_NEXT_DISTANCES,
    components: &[
        [
            &[-2.0, -2.0, -3.0, -4.0, -6.0, -6.0],
            &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            &[1.0, 1.0, 1.0, 0.0, 0.0, 0.0],
            &[0.4, 0.4, 0.2, 0.4, 0.3, 0.3],
        ],
        [
            &[-1.0, -1.0, -1.5, -2.0, -3.0, -3.0],
            &[1.4, 1.4, 2.1, 2.0, 3.0, 3.0],
            &[1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
            &[0.4, 0.4, 0.2, 0.4, 0.2, 0.2],
        ],
        [
            &[-1.0, -1.0, -1.5, -2.0, -3.0, -3.0],
            &[-1.4, -1.4, -2.1, -2.0, -3.0, -3.0],
            &[1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
            &[0.4, 0.4, 0.2, 0.4, 0.2, 0.2],
        ],
        [
            &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            &[0.0, 0.0, 1.0, 0.6, 0.6, 0.6],
        ],
        [
            &[1.0, 1.0, 1.5, 2.0, 3.0, 3.0],
            &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            &[1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
            &[0.0, 0.0, -0.6, -0.4, -0.3, -0.3],
        ],
    ],
    offset: &[-2.0, -2.0, -3.0, -5.4, -4.9, -4.9],
    scale: &[1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
};

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [AngleCorrection; 4] = [
        AngleCorrection::FlowNeg2,
        AngleCorrection::SnapNeg2,
        AngleCorrection::FlowNext,
        AngleCorrection::SnapNext,
    ];

    #[test]
    fn tables_are_consistent() {
        for table in [&FLOW_NEG2, &SNAP_NEG2, &FLOW_NEXT, &SNAP_NEXT] {
            let len = table.distances.len();

            assert_eq!(table.offset.len(), len);
            assert_eq!(table.scale.len(), len);

            for component in table.components {
                assert!(component.iter().all(|values| values.len() == len));
                // * negative offsets would lead to NaN
                assert!(component[2].iter().all(|&z| z >= 0.0));
            }
        }
    }

    #[test]
    fn bounded_by_scale() {
        for correction in ALL {
            for distance in [0.0, 0.5, 1.0, 2.0, 3.5, 5.0, 10.0] {
                for (x, y) in [(0.0, 0.0), (-1.0, 0.5), (1.0, -1.0), (3.0, 2.0)] {
                    let value = correction.evaluate(distance, x, y);

                    assert!(value.is_finite(), "{correction:?} at {distance}: {value}");
                    assert!((0.0..=1.0).contains(&value), "{correction:?}: {value}");
                }
            }
        }
    }

    #[test]
    fn flow_neg2_known_value() {
        // * At distance 0 only the constant terms remain:
        // * sqrt(1)*6 + sqrt(1)*3 + sqrt(1)*3 + 0 + 0 - 11.5 = 0.5
        let value = AngleCorrection::FlowNeg2.evaluate(0.0, 0.0, 0.0);
        let expected = logistic(0.5);

        assert!((value - expected).abs() < 1e-12, "{value} != {expected}");
    }
}
