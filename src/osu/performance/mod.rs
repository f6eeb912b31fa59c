use tracing::debug;

use crate::{
    model::beatmap::Beatmap,
    osu::{
        difficulty::{Difficulty, DifficultyError},
        score_state::{OsuScoreState, ScoreError},
    },
    util::map_or_attrs::MapOrAttrs,
};

use self::calculator::OsuPerformanceCalculator;

use super::attributes::{OsuDifficultyAttributes, OsuPerformanceAttributes};

mod calculator;

pub use self::calculator::PERFORMANCE_BASE_MULTIPLIER;

/// Error when a performance calculation cannot be performed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PerformanceError {
    #[error("failed to calculate difficulty attributes")]
    Difficulty(#[from] DifficultyError),
    #[error("invalid score")]
    Score(#[from] ScoreError),
}

/// Performance calculator on osu!standard maps.
///
/// # Example
///
/// ```
/// use rosu_tp::{model::hit_object::{HitObject, Pos}, Beatmap};
///
/// let map = Beatmap::builder()
///     .hit_objects((0..20).map(|i| {
///         let x = if i % 2 == 0 { 100.0 } else { 300.0 };
///
///         HitObject::circle(Pos::new(x, 200.0), f64::from(i) * 250.0)
///     }))
///     .build();
///
/// let attrs = map
///     .performance()
///     .mods(8) // HD
///     .accuracy(98.5)
///     .n_misses(1)
///     .combo(12)
///     .calculate()
///     .unwrap();
///
/// assert!(attrs.pp >= 0.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct Performance<'map> {
    map_or_attrs: MapOrAttrs<'map>,
    mods: u32,
    acc: Option<f64>,
    combo: Option<u32>,

    n300: Option<u32>,
    n100: Option<u32>,
    n50: Option<u32>,
    n_misses: Option<u32>,
    passed_objects: Option<u32>,
    clock_rate: Option<f64>,
}

impl<'map> Performance<'map> {
    /// Create a new performance calculator for the given map.
    pub fn new(map: &'map Beatmap) -> Self {
        map.into()
    }

    /// Provide the result of a previous difficulty or performance calculation.
    /// If you already calculated the attributes for the current map-mod combination,
    /// be sure to put them in here so that they don't have to be recalculated.
    pub fn attributes(mut self, attributes: impl Into<OsuDifficultyAttributes>) -> Self {
        self.map_or_attrs = MapOrAttrs::Attrs(attributes.into());

        self
    }

    /// Specify mods through their bit values.
    ///
    /// See [https://github.com/ppy/osu-api/wiki#mods](https://github.com/ppy/osu-api/wiki#mods)
    pub const fn mods(mut self, mods: u32) -> Self {
        self.mods = mods;

        self
    }

    /// Specify the max combo of the play.
    pub const fn combo(mut self, combo: u32) -> Self {
        self.combo = Some(combo);

        self
    }

    /// Specify the amount of 300s of a play.
    pub const fn n300(mut self, n300: u32) -> Self {
        self.n300 = Some(n300);

        self
    }

    /// Specify the amount of 100s of a play.
    pub const fn n100(mut self, n100: u32) -> Self {
        self.n100 = Some(n100);

        self
    }

    /// Specify the amount of 50s of a play.
    pub const fn n50(mut self, n50: u32) -> Self {
        self.n50 = Some(n50);

        self
    }

    /// Specify the amount of misses of a play.
    pub const fn n_misses(mut self, n_misses: u32) -> Self {
        self.n_misses = Some(n_misses);

        self
    }

    /// Amount of passed objects for partial plays, e.g. a fail.
    pub const fn passed_objects(mut self, passed_objects: u32) -> Self {
        self.passed_objects = Some(passed_objects);

        self
    }

    /// Adjust the clock rate used in the calculation.
    /// If none is specified, it will take the clock rate based on the mods
    /// i.e. 1.5 for DT, 0.75 for HT and 1.0 otherwise.
    pub const fn clock_rate(mut self, clock_rate: f64) -> Self {
        self.clock_rate = Some(clock_rate);

        self
    }

    /// Provide parameters through an [`OsuScoreState`].
    #[allow(clippy::needless_pass_by_value)]
    pub const fn state(mut self, state: OsuScoreState) -> Self {
        let OsuScoreState {
            max_combo,
            n300,
            n100,
            n50,
            misses,
        } = state;

        self.combo = Some(max_combo);
        self.n300 = Some(n300);
        self.n100 = Some(n100);
        self.n50 = Some(n50);
        self.n_misses = Some(misses);

        self
    }

    /// Specify the accuracy of a play either between `0.0` and `1.0` or
    /// between `0.0` and `100.0`.
    /// This will be used to generate matching hitresults.
    pub const fn accuracy(mut self, acc: f64) -> Self {
        self.acc = Some(acc);

        self
    }

    /// Create the [`OsuScoreState`] that will be used for performance calculation.
    ///
    /// Unspecified hit counts default to an SS of all passed objects.
    pub fn generate_state(&mut self) -> Result<OsuScoreState, PerformanceError> {
        let difficulty = self.difficulty();
        let attrs = self.map_or_attrs.attrs_or_calculate(&difficulty)?;

        let n_objects = attrs.n_objects();
        let total_hits = self.passed_objects.map_or(n_objects, |n| n.min(n_objects));
        let max_combo = self.combo.map_or(attrs.max_combo, |combo| combo.min(attrs.max_combo));

        let mut builder = OsuScoreState::builder()
            .total_hits(total_hits)
            .max_combo(max_combo);

        if let Some(n300) = self.n300 {
            builder = builder.n300(n300.min(total_hits));
        }

        if let Some(n100) = self.n100 {
            builder = builder.n100(n100.min(total_hits));
        }

        if let Some(n50) = self.n50 {
            builder = builder.n50(n50.min(total_hits));
        }

        if let Some(n_misses) = self.n_misses {
            builder = builder.misses(n_misses.min(total_hits));
        }

        if let Some(acc) = self.acc {
            builder = builder.accuracy(acc);
        }

        builder.build().map_err(PerformanceError::from)
    }

    /// Calculate all performance related values, including pp and stars.
    pub fn calculate(mut self) -> Result<OsuPerformanceAttributes, PerformanceError> {
        let state = self.generate_state()?;
        let difficulty = self.difficulty();
        let attrs = self.map_or_attrs.into_attrs(&difficulty)?;

        debug!(
            mods = self.mods,
            acc = state.accuracy(),
            combo = state.max_combo,
            misses = state.misses,
            "Calculating performance"
        );

        let attrs = OsuPerformanceCalculator::new(attrs, self.mods, state).calculate();

        debug!(pp = attrs.pp, "Calculated performance");

        Ok(attrs)
    }

    fn difficulty(&self) -> Difficulty {
        let mut difficulty = Difficulty::new().mods(self.mods);

        if let Some(passed_objects) = self.passed_objects {
            difficulty = difficulty.passed_objects(passed_objects);
        }

        if let Some(clock_rate) = self.clock_rate {
            difficulty = difficulty.clock_rate(clock_rate);
        }

        difficulty
    }
}

impl<'map> From<&'map Beatmap> for Performance<'map> {
    fn from(map: &'map Beatmap) -> Self {
        Self::from_map_or_attrs(map.into(), 0)
    }
}

impl From<OsuDifficultyAttributes> for Performance<'_> {
    fn from(attrs: OsuDifficultyAttributes) -> Self {
        let mods = attrs.mods;

        Self::from_map_or_attrs(attrs.into(), mods)
    }
}

impl From<OsuPerformanceAttributes> for Performance<'_> {
    fn from(attrs: OsuPerformanceAttributes) -> Self {
        attrs.difficulty.into()
    }
}

impl<'map> Performance<'map> {
    const fn from_map_or_attrs(map_or_attrs: MapOrAttrs<'map>, mods: u32) -> Self {
        Self {
            map_or_attrs,
            mods,
            acc: None,
            combo: None,
            n300: None,
            n100: None,
            n50: None,
            n_misses: None,
            passed_objects: None,
            clock_rate: None,
        }
    }
}
