use crate::osu::performance::Performance;

/// The result of a difficulty calculation on an osu!standard map.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OsuDifficultyAttributes {
    /// The final star rating.
    pub stars: f64,
    /// The star rating of the aim skill.
    pub aim_stars: f64,
    /// The star rating of the tap skill.
    pub tap_stars: f64,
    /// The star rating of the finger control skill.
    pub finger_stars: f64,
    /// Throughput values and calibration curves of the aim skill.
    pub aim: AimAttributes,
    /// Difficulty values of the tap skill.
    pub tap: TapAttributes,
    /// The difficulty of the finger control skill.
    pub finger_control: f64,
    /// The approach rate, back-derived from [`preempt`].
    ///
    /// [`preempt`]: Self::preempt
    pub ar: f64,
    /// The overall difficulty, back-derived from [`great_hit_window`].
    ///
    /// [`great_hit_window`]: Self::great_hit_window
    pub od: f64,
    /// The circle size.
    pub cs: f64,
    /// The health drain rate.
    pub hp: f64,
    /// The clock rate that was used.
    pub clock_rate: f64,
    /// Time between the first and the last object in seconds.
    pub map_len: f64,
    /// The mods that were used.
    pub mods: u32,
    /// Time in milliseconds that objects are visible before they have to be
    /// hit.
    pub preempt: f64,
    /// The hit window for a 300 in milliseconds.
    pub great_hit_window: f64,
    /// The amount of circles.
    pub n_circles: u32,
    /// The amount of sliders.
    pub n_sliders: u32,
    /// The amount of spinners.
    pub n_spinners: u32,
    /// The maximum combo.
    pub max_combo: u32,
}

impl OsuDifficultyAttributes {
    /// Return the maximum combo.
    pub const fn max_combo(&self) -> u32 {
        self.max_combo
    }

    /// Return the amount of hitobjects.
    pub const fn n_objects(&self) -> u32 {
        self.n_circles + self.n_sliders + self.n_spinners
    }

    /// Returns a builder for performance calculation.
    pub fn performance<'a>(self) -> Performance<'a> {
        self.into()
    }
}

/// Throughput based attributes of the aim skill.
///
/// All calibration curves are stored as parallel vectors of knots.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AimAttributes {
    /// Throughput at which a full combo has a fixed probability.
    pub fc_prob_throughput: f64,
    /// Ratio of the full combo probability throughput with and without hidden.
    pub hidden_factor: f64,
    /// Throughput required to full combo submaps of increasing length.
    pub combo_throughputs: Vec<f64>,
    /// Throughput values for the miss count curve.
    pub miss_throughputs: Vec<f64>,
    /// Expected amount of misses for each of [`miss_throughputs`].
    ///
    /// [`miss_throughputs`]: Self::miss_throughputs
    pub miss_counts: Vec<f64>,
    /// Weighted amount of notes that can be cheesed.
    pub cheese_note_count: f64,
    /// Evenly spaced cheese levels between `0.0` and `1.0`.
    pub cheese_levels: Vec<f64>,
    /// Throughput ratio for each of [`cheese_levels`].
    ///
    /// [`cheese_levels`]: Self::cheese_levels
    pub cheese_factors: Vec<f64>,
}

/// Strain based attributes of the tap skill.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TapAttributes {
    pub tap_difficulty: f64,
    /// Weighted amount of notes that are part of streams.
    pub stream_note_count: f64,
    /// Tap difficulty when mashing instead of tapping precisely.
    pub mash_tap_difficulty: f64,
    /// Strains of the four timescales at each object.
    pub strain_history: Vec<[f64; 4]>,
}

/// The result of a performance calculation on an osu!standard map.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OsuPerformanceAttributes {
    /// The difficulty attributes that were used for the performance calculation
    pub difficulty: OsuDifficultyAttributes,
    /// The final performance points.
    pub pp: f64,
    /// The accuracy portion of the final pp.
    pub pp_acc: f64,
    /// The aim portion of the final pp.
    pub pp_aim: f64,
    /// The tap portion of the final pp.
    pub pp_tap: f64,
    /// Misses including an approximated amount of slider breaks
    pub effective_miss_count: f64,
}

impl OsuPerformanceAttributes {
    /// Return the star value.
    pub const fn stars(&self) -> f64 {
        self.difficulty.stars
    }

    /// Return the performance point value.
    pub const fn pp(&self) -> f64 {
        self.pp
    }

    /// Return the maximum combo of the map.
    pub const fn max_combo(&self) -> u32 {
        self.difficulty.max_combo
    }

    /// Return the amount of hitobjects.
    pub const fn n_objects(&self) -> u32 {
        self.difficulty.n_objects()
    }

    /// Returns a builder for performance calculation.
    pub fn performance<'a>(self) -> Performance<'a> {
        self.difficulty.into()
    }
}

impl From<OsuPerformanceAttributes> for OsuDifficultyAttributes {
    fn from(attributes: OsuPerformanceAttributes) -> Self {
        attributes.difficulty
    }
}
