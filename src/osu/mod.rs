pub use self::{
    attributes::{AimAttributes, OsuDifficultyAttributes, OsuPerformanceAttributes, TapAttributes},
    difficulty::{Difficulty, DifficultyError},
    performance::{Performance, PerformanceError, PERFORMANCE_BASE_MULTIPLIER},
    score_state::{OsuScoreState, OsuScoreStateBuilder, ScoreError},
};

mod attributes;
mod convert;
mod object;
mod score_state;

pub mod difficulty;
pub mod performance;
