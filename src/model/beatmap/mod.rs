use crate::osu::performance::Performance;

pub use self::attributes::{
    difficulty_range, AdjustedStats, BeatmapAttributes, BeatmapAttributesBuilder, HitWindows,
};

use super::hit_object::HitObject;

mod attributes;

/// All beatmap data that is relevant for difficulty and performance
/// calculation.
///
/// Parsing `.osu` files is left to other crates; fill in the fields
/// directly or through [`Beatmap::builder`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Beatmap {
    /// The `.osu` file format version.
    ///
    /// Versions below 6 use the legacy stacking algorithm.
    pub version: i32,

    // General
    pub stack_leniency: f32,

    // Difficulty
    pub ar: f32,
    pub cs: f32,
    pub hp: f32,
    pub od: f32,

    // HitObjects
    pub hit_objects: Vec<HitObject>,
}

impl Beatmap {
    /// The most recent `.osu` file format version.
    pub const LATEST_FORMAT_VERSION: i32 = 14;

    /// Create a [`BeatmapBuilder`].
    pub const fn builder() -> BeatmapBuilder {
        BeatmapBuilder::new()
    }

    /// Returns a [`BeatmapAttributesBuilder`] to calculate modified beatmap
    /// attributes.
    pub const fn attributes(&self) -> BeatmapAttributesBuilder {
        BeatmapAttributesBuilder::new().map(self)
    }

    /// Create a performance calculator for this [`Beatmap`].
    pub fn performance(&self) -> Performance<'_> {
        Performance::new(self)
    }

    /// The amount of circles.
    pub fn n_circles(&self) -> u32 {
        self.count_objects(HitObject::is_circle)
    }

    /// The amount of sliders.
    pub fn n_sliders(&self) -> u32 {
        self.count_objects(HitObject::is_slider)
    }

    /// The amount of spinners.
    pub fn n_spinners(&self) -> u32 {
        self.count_objects(HitObject::is_spinner)
    }

    /// The amount of hitobjects.
    pub fn n_objects(&self) -> u32 {
        self.hit_objects.len() as u32
    }

    /// The maximum achievable combo.
    pub fn max_combo(&self) -> u32 {
        self.hit_objects.iter().map(HitObject::combo).sum()
    }

    fn count_objects(&self, f: fn(&HitObject) -> bool) -> u32 {
        self.hit_objects.iter().filter(|h| f(h)).count() as u32
    }
}

impl Default for Beatmap {
    fn default() -> Self {
        Self {
            version: Self::LATEST_FORMAT_VERSION,
            stack_leniency: 0.7,
            ar: 5.0,
            cs: 5.0,
            hp: 5.0,
            od: 5.0,
            hit_objects: Vec::new(),
        }
    }
}

/// Builder for a [`Beatmap`].
///
/// ```
/// use rosu_tp::model::{beatmap::Beatmap, hit_object::{HitObject, Pos}};
///
/// let map = Beatmap::builder()
///     .cs(4.0)
///     .ar(9.0)
///     .hit_object(HitObject::circle(Pos::new(0.0, 0.0), 1000.0))
///     .hit_object(HitObject::circle(Pos::new(100.0, 0.0), 1250.0))
///     .build();
///
/// assert_eq!(map.n_circles(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct BeatmapBuilder {
    map: Beatmap,
}

impl BeatmapBuilder {
    /// Create a new [`BeatmapBuilder`] with default attributes and no
    /// hitobjects.
    pub const fn new() -> Self {
        Self {
            map: Beatmap {
                version: Beatmap::LATEST_FORMAT_VERSION,
                stack_leniency: 0.7,
                ar: 5.0,
                cs: 5.0,
                hp: 5.0,
                od: 5.0,
                hit_objects: Vec::new(),
            },
        }
    }

    /// Specify the `.osu` file format version.
    pub const fn version(mut self, version: i32) -> Self {
        self.map.version = version;

        self
    }

    /// Specify the stack leniency.
    pub const fn stack_leniency(mut self, stack_leniency: f32) -> Self {
        self.map.stack_leniency = stack_leniency;

        self
    }

    /// Specify the approach rate.
    pub const fn ar(mut self, ar: f32) -> Self {
        self.map.ar = ar;

        self
    }

    /// Specify the circle size.
    pub const fn cs(mut self, cs: f32) -> Self {
        self.map.cs = cs;

        self
    }

    /// Specify the drain rate.
    pub const fn hp(mut self, hp: f32) -> Self {
        self.map.hp = hp;

        self
    }

    /// Specify the overall difficulty.
    pub const fn od(mut self, od: f32) -> Self {
        self.map.od = od;

        self
    }

    /// Add a hitobject.
    pub fn hit_object(mut self, h: HitObject) -> Self {
        self.map.hit_objects.push(h);

        self
    }

    /// Add multiple hitobjects.
    pub fn hit_objects<I: IntoIterator<Item = HitObject>>(mut self, iter: I) -> Self {
        self.map.hit_objects.extend(iter);

        self
    }

    /// Finish the [`Beatmap`].
    ///
    /// Hitobjects are sorted by their start time.
    pub fn build(mut self) -> Beatmap {
        self.map
            .hit_objects
            .sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

        self.map
    }
}

impl Default for BeatmapBuilder {
    fn default() -> Self {
        Self::new()
    }
}
