use crate::{model::hit_object::Pos, osu::object::OsuObject};

/// Fields around the scaling of hit objects.
///
/// All objects share the same scaling so it's only stored once.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScalingFactor {
    pub scale: f32,
    pub radius: f64,
}

impl ScalingFactor {
    pub fn new(cs: f64) -> Self {
        let scale = ((f64::from(1.0_f32) - f64::from(0.7_f32) * (cs - 5.0) / 5.0) / 2.0) as f32;
        let radius = f64::from(OsuObject::OBJECT_RADIUS * scale);

        Self { scale, radius }
    }

    /// Stacked position of an object with the given stack height.
    ///
    /// The original position is rounded to single precision first.
    pub fn stacked_pos(&self, pos: Pos, stack_height: i32) -> Pos {
        let offset = 0.1 * self.radius * f64::from(stack_height);

        Pos::new(
            f64::from(pos.x as f32) - offset,
            f64::from(pos.y as f32) - offset,
        )
    }
}
