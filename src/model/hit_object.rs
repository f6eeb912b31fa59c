use std::cmp::Ordering;

pub use super::pos::Pos;

/// All hitobject related data required for difficulty calculation.
///
/// Positions are the raw positions of the `.osu` file; stacking is applied
/// during the calculation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitObject {
    pub pos: Pos,
    pub start_time: f64,
    pub kind: HitObjectKind,
}

impl HitObject {
    /// Create a new circle.
    pub const fn circle(pos: Pos, start_time: f64) -> Self {
        Self {
            pos,
            start_time,
            kind: HitObjectKind::Circle,
        }
    }

    /// Create a new slider.
    ///
    /// `combo` is the amount of combo the slider is worth, i.e. its head,
    /// ticks, repeats, and tail. Values below `1` are treated as `1`.
    pub const fn slider(pos: Pos, start_time: f64, end_time: f64, end_pos: Pos, combo: u32) -> Self {
        Self {
            pos,
            start_time,
            kind: HitObjectKind::Slider(Slider {
                end_time,
                end_pos,
                combo,
            }),
        }
    }

    /// Create a new spinner.
    pub const fn spinner(pos: Pos, start_time: f64, end_time: f64) -> Self {
        Self {
            pos,
            start_time,
            kind: HitObjectKind::Spinner(Spinner { end_time }),
        }
    }

    /// Whether the hitobject is a circle.
    pub const fn is_circle(&self) -> bool {
        matches!(&self.kind, HitObjectKind::Circle)
    }

    /// Whether the hitobject is a slider.
    pub const fn is_slider(&self) -> bool {
        matches!(&self.kind, HitObjectKind::Slider(_))
    }

    /// Whether the hitobject is a spinner.
    pub const fn is_spinner(&self) -> bool {
        matches!(&self.kind, HitObjectKind::Spinner(_))
    }

    /// The end time of the object.
    pub const fn end_time(&self) -> f64 {
        match &self.kind {
            HitObjectKind::Circle => self.start_time,
            HitObjectKind::Slider(Slider { end_time, .. })
            | HitObjectKind::Spinner(Spinner { end_time }) => *end_time,
        }
    }

    /// The position at which the object ends.
    pub const fn end_pos(&self) -> Pos {
        match &self.kind {
            HitObjectKind::Circle | HitObjectKind::Spinner(_) => self.pos,
            HitObjectKind::Slider(slider) => slider.end_pos,
        }
    }

    /// The amount of combo this object is worth.
    pub const fn combo(&self) -> u32 {
        match &self.kind {
            HitObjectKind::Circle | HitObjectKind::Spinner(_) => 1,
            HitObjectKind::Slider(Slider { combo: 0, .. }) => 1,
            HitObjectKind::Slider(Slider { combo, .. }) => *combo,
        }
    }
}

impl PartialOrd for HitObject {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.start_time.partial_cmp(&other.start_time)
    }
}

/// Additional data for a [`HitObject`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HitObjectKind {
    Circle,
    Slider(Slider),
    Spinner(Spinner),
}

/// A slider.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slider {
    pub end_time: f64,
    /// Position at the end of the slider's path.
    pub end_pos: Pos,
    /// Head, ticks, repeats, and tail.
    pub combo: u32,
}

/// A spinner.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spinner {
    pub end_time: f64,
}
