/// Beatmap related types.
pub mod beatmap;

/// Hitobject related types.
pub mod hit_object;

/// Gamemods related types.
pub mod mods;

/// Playfield positions.
pub mod pos;
