use tracing::debug;

use crate::{
    model::beatmap::{difficulty_range, Beatmap, BeatmapAttributes},
    osu::{
        attributes::{AimAttributes, OsuDifficultyAttributes, TapAttributes},
        convert::convert_objects,
        object::OsuObject,
    },
    util::mean::power_mean,
};

use self::{
    movement::extract_movements,
    note_density::note_densities,
    scaling_factor::ScalingFactor,
    skills::{
        aim::calculate_aim_attributes, finger_control::calculate_finger_control_difficulty,
        tap::calculate_tap_attributes,
    },
};

mod angle_correction;
mod fitts_law;
mod hit_probabilities;
mod movement;
mod note_density;
mod skills;

pub(crate) mod scaling_factor;

const AIM_MULTIPLIER: f64 = 0.641;
const TAP_MULTIPLIER: f64 = 0.641;
const FINGER_CONTROL_MULTIPLIER: f64 = 1.245;

const STAR_RATING_EXPONENT: f64 = 0.83;
const TOTAL_POWER_MEAN_EXPONENT: f64 = 7.0;
const TOTAL_MULTIPLIER: f64 = 1.131;

/// Error when a difficulty calculation cannot be performed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DifficultyError {
    #[error("the map has no hit objects to evaluate")]
    NoObjects,
}

/// Difficulty calculator on osu!standard maps.
///
/// # Example
///
/// ```
/// use rosu_tp::{model::hit_object::{HitObject, Pos}, Beatmap, Difficulty};
///
/// let map = Beatmap::builder()
///     .hit_object(HitObject::circle(Pos::new(0.0, 0.0), 0.0))
///     .hit_object(HitObject::circle(Pos::new(200.0, 0.0), 300.0))
///     .build();
///
/// let attrs = Difficulty::new()
///     .mods(8 + 64) // HDDT
///     .calculate(&map)
///     .unwrap();
///
/// assert!(attrs.stars >= 0.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[must_use]
pub struct Difficulty {
    mods: u32,
    passed_objects: Option<u32>,
    clock_rate: Option<f64>,
}

impl Difficulty {
    /// Create a new difficulty calculator.
    pub const fn new() -> Self {
        Self {
            mods: 0,
            passed_objects: None,
            clock_rate: None,
        }
    }

    /// Specify mods through their bit values.
    ///
    /// See [https://github.com/ppy/osu-api/wiki#mods](https://github.com/ppy/osu-api/wiki#mods)
    pub const fn mods(mut self, mods: u32) -> Self {
        self.mods = mods;

        self
    }

    /// Amount of passed objects for partial plays, e.g. a fail.
    pub const fn passed_objects(mut self, passed_objects: u32) -> Self {
        self.passed_objects = Some(passed_objects);

        self
    }

    /// Adjust the clock rate used in the calculation.
    ///
    /// If none is specified, it will take the clock rate based on the mods
    /// i.e. 1.5 for DT, 0.75 for HT and 1.0 otherwise.
    ///
    /// | Minimum | Maximum |
    /// | :-----: | :-----: |
    /// | 0.01    | 100     |
    pub fn clock_rate(mut self, clock_rate: f64) -> Self {
        self.clock_rate = Some(clock_rate.clamp(0.01, 100.0));

        self
    }

    pub const fn get_mods(&self) -> u32 {
        self.mods
    }

    pub fn get_clock_rate(&self) -> Option<f64> {
        self.clock_rate
    }

    pub fn get_passed_objects(&self) -> usize {
        self.passed_objects.map_or(usize::MAX, |n| n as usize)
    }

    /// Perform the difficulty calculation.
    pub fn calculate(&self, map: &Beatmap) -> Result<OsuDifficultyAttributes, DifficultyError> {
        let OsuDifficultySetup {
            scaling_factor,
            map_attrs,
            time_preempt,
            density_preempt,
        } = OsuDifficultySetup::new(self, map);

        let mut hit_objects = convert_objects(map, &scaling_factor, time_preempt);
        hit_objects.truncate(self.get_passed_objects());

        let (Some(first), Some(last)) = (hit_objects.first(), hit_objects.last()) else {
            debug!("Rejected map without hit objects");

            return Err(DifficultyError::NoObjects);
        };

        let clock_rate = map_attrs.clock_rate;
        let map_len = (last.start_time - first.start_time) / 1000.0 / clock_rate;

        debug!(
            n_objects = hit_objects.len(),
            mods = self.mods,
            clock_rate,
            "Calculating difficulty"
        );

        let densities = note_densities(&hit_objects, density_preempt);

        let SkillValues {
            tap,
            aim,
            finger_control,
        } = SkillValues::calculate(&hit_objects, &densities, clock_rate, scaling_factor.radius);

        let tap_stars = star_value(TAP_MULTIPLIER, tap.tap_difficulty);
        let aim_stars = star_value(AIM_MULTIPLIER, aim.fc_prob_throughput);
        let finger_stars = star_value(FINGER_CONTROL_MULTIPLIER, finger_control);

        let stars = power_mean(&[tap_stars, aim_stars, finger_stars], TOTAL_POWER_MEAN_EXPONENT)
            * TOTAL_MULTIPLIER;

        debug!(stars, aim_stars, tap_stars, finger_stars, "Calculated difficulty");

        let mut attrs = OsuDifficultyAttributes {
            stars,
            aim_stars,
            tap_stars,
            finger_stars,
            aim,
            tap,
            finger_control,
            ar: map_attrs.ar,
            od: map_attrs.od,
            cs: map_attrs.cs,
            hp: map_attrs.hp,
            clock_rate,
            map_len,
            mods: self.mods,
            preempt: map_attrs.hit_windows.ar,
            great_hit_window: map_attrs.hit_windows.od,
            ..Default::default()
        };

        for h in hit_objects.iter() {
            if h.is_circle() {
                attrs.n_circles += 1;
            } else if h.is_slider() {
                attrs.n_sliders += 1;
            } else {
                attrs.n_spinners += 1;
            }

            attrs.max_combo += h.combo();
        }

        Ok(attrs)
    }
}

/// `multiplier * value^0.83` where `NaN` yields `0.0`.
fn star_value(multiplier: f64, value: f64) -> f64 {
    let stars = multiplier * value.powf(STAR_RATING_EXPONENT);

    if stars.is_nan() {
        0.0
    } else {
        stars
    }
}

struct OsuDifficultySetup {
    scaling_factor: ScalingFactor,
    map_attrs: BeatmapAttributes,
    /// Mod-adjusted preempt without clock rate, rounded to single precision.
    time_preempt: f64,
    /// Mod-adjusted preempt without clock rate.
    density_preempt: f64,
}

impl OsuDifficultySetup {
    fn new(difficulty: &Difficulty, map: &Beatmap) -> Self {
        let mut builder = map.attributes().mods(difficulty.mods);

        if let Some(clock_rate) = difficulty.clock_rate {
            builder = builder.clock_rate(clock_rate);
        }

        let adjusted = builder.adjusted();
        let map_attrs = builder.build();

        let scaling_factor = ScalingFactor::new(adjusted.cs);

        let density_preempt = difficulty_range(adjusted.ar, 1800.0, 1200.0, 450.0);
        let time_preempt = f64::from(density_preempt as f32);

        Self {
            scaling_factor,
            map_attrs,
            time_preempt,
            density_preempt,
        }
    }
}

struct SkillValues {
    tap: TapAttributes,
    aim: AimAttributes,
    finger_control: f64,
}

impl SkillValues {
    fn calculate(hit_objects: &[OsuObject], densities: &[f64], clock_rate: f64, radius: f64) -> Self {
        let tap_and_aim = || {
            let tap = calculate_tap_attributes(hit_objects, clock_rate, radius);

            let movements =
                extract_movements(hit_objects, clock_rate, radius, &tap.strain_history, None);

            let movements_hidden = extract_movements(
                hit_objects,
                clock_rate,
                radius,
                &tap.strain_history,
                Some(densities),
            );

            let aim = calculate_aim_attributes(&movements, &movements_hidden);

            (tap, aim)
        };

        let finger_control = || calculate_finger_control_difficulty(hit_objects, clock_rate);

        #[cfg(feature = "rayon")]
        let ((tap, aim), finger_control) = rayon::join(tap_and_aim, finger_control);

        #[cfg(not(feature = "rayon"))]
        let ((tap, aim), finger_control) = (tap_and_aim(), finger_control());

        Self {
            tap,
            aim,
            finger_control,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{
        hit_object::{HitObject, Pos},
        mods::Mods,
    };

    use super::*;

    fn jumps(count: u32, interval: f64) -> Beatmap {
        Beatmap::builder()
            .ar(9.0)
            .od(8.0)
            .cs(4.0)
            .hit_objects((0..count).map(|i| {
                let x = if i % 2 == 0 { 100.0 } else { 400.0 };
                let y = 150.0 + f64::from(i % 3) * 40.0;

                HitObject::circle(Pos::new(x, y), 1000.0 + f64::from(i) * interval)
            }))
            .build()
    }

    #[test]
    fn empty_map() {
        let map = Beatmap::default();

        assert_eq!(Difficulty::new().calculate(&map), Err(DifficultyError::NoObjects));
    }

    #[test]
    fn no_passed_objects() {
        let map = jumps(10, 200.0);
        let res = Difficulty::new().passed_objects(0).calculate(&map);

        assert_eq!(res, Err(DifficultyError::NoObjects));
    }

    #[test]
    fn attributes_of_jumps() {
        let map = jumps(100, 200.0);
        let attrs = Difficulty::new().calculate(&map).unwrap();

        assert!(attrs.stars > 0.0);
        assert!(attrs.aim_stars > 0.0);
        assert!(attrs.tap_stars > 0.0);
        assert_eq!(attrs.n_circles, 100);
        assert_eq!(attrs.max_combo, 100);
        assert!((attrs.map_len - 19.8).abs() < 1e-9);
        assert!((attrs.ar - 9.0).abs() < 1e-6);
        assert!((attrs.od - 8.0).abs() < 0.2);
        assert!((attrs.great_hit_window - 32.0).abs() < 1e-9);
        assert!((attrs.preempt - 600.0).abs() < 1e-9);
    }

    #[test]
    fn double_time_is_harder() {
        let map = jumps(100, 200.0);

        let nomod = Difficulty::new().calculate(&map).unwrap();
        let dt = Difficulty::new().mods(u32::DT).calculate(&map).unwrap();

        assert!(dt.stars > nomod.stars);
        assert!((dt.clock_rate - 1.5).abs() < f64::EPSILON);
        assert!((dt.map_len - nomod.map_len / 1.5).abs() < 1e-9);
    }

    #[test]
    fn custom_clock_rate() {
        let map = jumps(50, 200.0);

        let dt = Difficulty::new().mods(u32::DT).calculate(&map).unwrap();
        let custom = Difficulty::new().clock_rate(1.5).calculate(&map).unwrap();

        assert!((dt.stars - custom.stars).abs() < 1e-12);
    }

    #[test]
    fn partial_play() {
        let map = jumps(100, 200.0);
        let attrs = Difficulty::new().passed_objects(40).calculate(&map).unwrap();

        assert_eq!(attrs.n_circles, 40);
        assert_eq!(attrs.max_combo, 40);
    }

    #[test]
    fn star_values() {
        assert_eq!(star_value(1.0, f64::NAN), 0.0);
        assert_eq!(star_value(2.0, 0.0), 0.0);
        assert!((star_value(1.0, 2.0) - 2.0_f64.powf(0.83)).abs() < 1e-12);
    }
}
