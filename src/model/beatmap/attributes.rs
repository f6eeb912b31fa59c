use crate::model::mods::Mods;

use super::Beatmap;

/// Summary struct for a [`Beatmap`]'s attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct BeatmapAttributes {
    /// The approach rate, back-derived from the clock rate adjusted preempt.
    pub ar: f64,
    /// The overall difficulty, back-derived from the clock rate adjusted
    /// great hit window.
    pub od: f64,
    /// The circle size.
    pub cs: f64,
    /// The health drain rate
    pub hp: f64,
    /// The clock rate with respect to mods.
    pub clock_rate: f64,
    /// The hit windows for approach rate and overall difficulty.
    pub hit_windows: HitWindows,
}

/// AR and OD hit windows
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HitWindows {
    /// Hit window for approach rate i.e. `TimePreempt` in milliseconds.
    pub ar: f64,
    /// Hit window for overall difficulty i.e. time to hit a 300 ("Great") in milliseconds.
    pub od: f64,
}

/// Map stats after applying mods but before accounting for the clock rate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AdjustedStats {
    pub cs: f64,
    pub hp: f64,
    pub od: f64,
    pub ar: f64,
}

/// Applies HR and EZ to a map stat.
fn adjust_stat(value: f32, mods: u32, hr_factor: f64) -> f64 {
    let mut value = f64::from(value);

    // * HR and EZ may both be applied
    if mods.hr() {
        value *= hr_factor;
    }

    if mods.ez() {
        value /= 2.0;
    }

    value.min(10.0)
}

/// A builder for [`BeatmapAttributes`] and [`HitWindows`].
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct BeatmapAttributesBuilder {
    ar: f32,
    od: f32,
    cs: f32,
    hp: f32,
    mods: u32,
    clock_rate: Option<f64>,
}

impl BeatmapAttributesBuilder {
    const OD_MIN: f64 = 80.0;
    const OD_AVG: f64 = 50.0;
    const OD_MAX: f64 = 20.0;

    const PREEMPT_MIN: f64 = 1800.0;
    const PREEMPT_AVG: f64 = 1200.0;
    const PREEMPT_MAX: f64 = 450.0;

    /// Create a new [`BeatmapAttributesBuilder`].
    ///
    /// Attributes are set to `5.0`.
    pub const fn new() -> Self {
        Self {
            ar: 5.0,
            od: 5.0,
            cs: 5.0,
            hp: 5.0,
            mods: 0,
            clock_rate: None,
        }
    }

    /// Use the given [`Beatmap`]'s attributes.
    pub const fn map(self, map: &Beatmap) -> Self {
        Self {
            ar: map.ar,
            od: map.od,
            cs: map.cs,
            hp: map.hp,
            mods: self.mods,
            clock_rate: self.clock_rate,
        }
    }

    /// Specify the approach rate before mods are applied.
    pub const fn ar(self, ar: f32) -> Self {
        Self { ar, ..self }
    }

    /// Specify the overall difficulty before mods are applied.
    pub const fn od(self, od: f32) -> Self {
        Self { od, ..self }
    }

    /// Specify the circle size before mods are applied.
    pub const fn cs(self, cs: f32) -> Self {
        Self { cs, ..self }
    }

    /// Specify the drain rate before mods are applied.
    pub const fn hp(self, hp: f32) -> Self {
        Self { hp, ..self }
    }

    /// Specify the mods.
    pub const fn mods(self, mods: u32) -> Self {
        Self { mods, ..self }
    }

    /// Specify a custom clock rate.
    pub const fn clock_rate(self, clock_rate: f64) -> Self {
        Self {
            clock_rate: Some(clock_rate),
            ..self
        }
    }

    /// The clock rate, either custom or based on the mods.
    pub fn get_clock_rate(&self) -> f64 {
        self.clock_rate.unwrap_or_else(|| self.mods.clock_rate())
    }

    /// Stats after applying HR and EZ.
    pub fn adjusted(&self) -> AdjustedStats {
        let mods = self.mods;

        AdjustedStats {
            cs: adjust_stat(self.cs, mods, 1.3),
            hp: adjust_stat(self.hp, mods, 1.4),
            od: adjust_stat(self.od, mods, 1.4),
            ar: adjust_stat(self.ar, mods, 1.4),
        }
    }

    /// Calculate the AR and OD hit windows.
    ///
    /// Both windows are truncated to whole milliseconds before the clock
    /// rate is applied.
    pub fn hit_windows(&self) -> HitWindows {
        let clock_rate = self.get_clock_rate();
        let AdjustedStats { od, ar, .. } = self.adjusted();

        let preempt = difficulty_range(
            ar,
            Self::PREEMPT_MIN,
            Self::PREEMPT_AVG,
            Self::PREEMPT_MAX,
        )
        .trunc()
            / clock_rate;

        let hit_window =
            difficulty_range(od, Self::OD_MIN, Self::OD_AVG, Self::OD_MAX).trunc() / clock_rate;

        HitWindows {
            ar: preempt,
            od: hit_window,
        }
    }

    /// Calculate the [`BeatmapAttributes`].
    pub fn build(&self) -> BeatmapAttributes {
        let AdjustedStats { cs, hp, .. } = self.adjusted();
        let hit_windows = self.hit_windows();
        let HitWindows { ar, od } = hit_windows;

        // AR
        let ar = if ar > Self::PREEMPT_AVG {
            (Self::PREEMPT_MIN - ar) / 120.0
        } else {
            (Self::PREEMPT_AVG - ar) / 150.0 + 5.0
        };

        // OD
        let od = (Self::OD_MIN - od) / 6.0;

        BeatmapAttributes {
            ar,
            od,
            cs,
            hp,
            clock_rate: self.get_clock_rate(),
            hit_windows,
        }
    }
}

impl From<&Beatmap> for BeatmapAttributesBuilder {
    fn from(map: &Beatmap) -> Self {
        Self::new().map(map)
    }
}

impl Default for BeatmapAttributesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps a difficulty value in `[0, 10]` onto the range `[min, max]`,
/// hitting `mid` at `5`.
pub fn difficulty_range(difficulty: f64, min: f64, mid: f64, max: f64) -> f64 {
    if difficulty > 5.0 {
        mid + (max - mid) * (difficulty - 5.0) / 5.0
    } else if difficulty < 5.0 {
        mid - (mid - min) * (5.0 - difficulty) / 5.0
    } else {
        mid
    }
}
