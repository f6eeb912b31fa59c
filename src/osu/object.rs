use crate::model::hit_object::{HitObject, HitObjectKind, Pos};

/// A [`HitObject`] with stacking applied.
#[derive(Clone, Debug, PartialEq)]
pub struct OsuObject {
    /// The original position.
    pub pos: Pos,
    pub start_time: f64,
    pub stack_height: i32,
    /// The position after applying the stack offset.
    pub stacked_pos: Pos,
    pub kind: HitObjectKind,
}

impl OsuObject {
    pub const OBJECT_RADIUS: f32 = 64.0;

    pub fn new(h: &HitObject) -> Self {
        Self {
            pos: h.pos,
            start_time: h.start_time,
            stack_height: 0,
            stacked_pos: h.pos,
            kind: h.kind.clone(),
        }
    }

    pub const fn end_time(&self) -> f64 {
        match self.kind {
            HitObjectKind::Circle => self.start_time,
            HitObjectKind::Slider(ref slider) => slider.end_time,
            HitObjectKind::Spinner(ref spinner) => spinner.end_time,
        }
    }

    /// Position at which the object ends, ignoring stacking.
    pub const fn end_pos(&self) -> Pos {
        match self.kind {
            HitObjectKind::Circle | HitObjectKind::Spinner(_) => self.pos,
            HitObjectKind::Slider(ref slider) => slider.end_pos,
        }
    }

    /// The amount of combo the object is worth.
    pub const fn combo(&self) -> u32 {
        match self.kind {
            HitObjectKind::Slider(ref slider) if slider.combo > 1 => slider.combo,
            _ => 1,
        }
    }

    pub const fn is_circle(&self) -> bool {
        matches!(self.kind, HitObjectKind::Circle)
    }

    pub const fn is_slider(&self) -> bool {
        matches!(self.kind, HitObjectKind::Slider(_))
    }

    pub const fn is_spinner(&self) -> bool {
        matches!(self.kind, HitObjectKind::Spinner(_))
    }
}
