//! Search for ranges that contain a zero crossing.

use super::{same_sign, RootFindingError};

/// A range `[lower, upper]` in which a root is searched.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bracket {
    pub lower: f64,
    pub upper: f64,
}

impl Bracket {
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    const fn validate(self) -> Result<Self, RootFindingError> {
        if self.lower < self.upper {
            Ok(self)
        } else {
            Err(RootFindingError::InvalidRange {
                lower: self.lower,
                upper: self.upper,
            })
        }
    }
}

/// Grow the bracket geometrically by `factor` until the function values at
/// its bounds differ in sign.
///
/// Returns `Ok(None)` if no sign change was found within `max_iterations`.
pub fn expand(
    mut f: impl FnMut(f64) -> f64,
    bracket: Bracket,
    factor: f64,
    max_iterations: usize,
) -> Result<Option<Bracket>, RootFindingError> {
    let Bracket {
        mut lower,
        mut upper,
    } = bracket.validate()?;

    let mut f_min = f(lower);
    let mut f_max = f(upper);

    for _ in 0..max_iterations {
        if !same_sign(f_min, f_max) {
            return Ok(Some(Bracket::new(lower, upper)));
        }

        if f_min.abs() < f_max.abs() {
            lower += factor * (lower - upper);
            f_min = f(lower);
        } else {
            upper += factor * (upper - lower);
            f_max = f(upper);
        }
    }

    Ok(None)
}

/// Scan the bracket in `subdivisions` equal steps for the first sub-range
/// that contains a sign change.
///
/// Returns `Ok(None)` if no sign change was found.
pub fn reduce(
    mut f: impl FnMut(f64) -> f64,
    bracket: Bracket,
    subdivisions: usize,
) -> Result<Option<Bracket>, RootFindingError> {
    let Bracket { lower, upper } = bracket.validate()?;

    let f_min = f(lower);
    let f_max = f(upper);

    if !same_sign(f_min, f_max) {
        return Ok(Some(bracket));
    }

    let step = (upper - lower) / subdivisions as f64;
    let mut sub_min = lower;

    for _ in 0..subdivisions {
        let sub_max = sub_min + step;
        let f_sub_max = f(sub_max);

        // * Expand the interval to include the pole
        if f_sub_max == f64::INFINITY {
            sub_min = sub_max;

            continue;
        }

        if !same_sign(f_sub_max, f_min) {
            return Ok(Some(Bracket::new(sub_min, sub_max)));
        }

        sub_min = sub_max;
    }

    Ok(None)
}

/// [`expand`] and, if that fails, [`reduce`] the bracket.
///
/// If neither finds a sign change, the given bracket is returned unchanged and
/// the solver that follows will report it as not bracketed.
pub fn expand_reduce(
    mut f: impl FnMut(f64) -> f64,
    bracket: Bracket,
    expand_factor: f64,
    max_expand_iterations: usize,
    reduce_subdivisions: usize,
) -> Result<Bracket, RootFindingError> {
    if let Some(expanded) = expand(&mut f, bracket, expand_factor, max_expand_iterations)? {
        return Ok(expanded);
    }

    match reduce(&mut f, bracket, reduce_subdivisions)? {
        Some(reduced) => Ok(reduced),
        None => {
            tracing::debug!(
                lower = bracket.lower,
                upper = bracket.upper,
                "No zero crossing found, keeping original bracket"
            );

            Ok(bracket)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_finds_distant_root() {
        let bracket = expand(|x| x - 50.0, Bracket::new(0.0, 1.0), 1.6, 50)
            .unwrap()
            .unwrap();

        assert!(bracket.lower <= 50.0 && 50.0 <= bracket.upper, "{bracket:?}");
    }

    #[test]
    fn expand_keeps_valid_bracket() {
        let bracket = Bracket::new(-1.0, 1.0);

        assert_eq!(expand(|x| x, bracket, 1.6, 50), Ok(Some(bracket)));
    }

    #[test]
    fn expand_rejects_invalid_range() {
        assert_eq!(
            expand(|x| x, Bracket::new(1.0, 1.0), 1.6, 50),
            Err(RootFindingError::InvalidRange {
                lower: 1.0,
                upper: 1.0
            })
        );
    }

    #[test]
    fn reduce_finds_inner_crossing() {
        // positive at both ends, negative around 0.5
        let f = |x: f64| (x - 0.5).abs() - 0.055;
        let bracket = reduce(f, Bracket::new(0.0, 1.0), 100).unwrap().unwrap();

        assert!(bracket.lower < 0.445 && 0.445 < bracket.upper, "{bracket:?}");
        assert!(bracket.upper - bracket.lower < 0.011);
    }

    #[test]
    fn expand_reduce_falls_back_to_original() {
        let bracket = Bracket::new(-1.0, 1.0);
        let actual = expand_reduce(|x| x * x + 1.0, bracket, 1.6, 10, 100);

        assert_eq!(actual, Ok(bracket));
    }
}
