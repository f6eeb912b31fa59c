use crate::{
    model::beatmap::Beatmap,
    osu::{Difficulty, DifficultyError, OsuDifficultyAttributes, OsuPerformanceAttributes},
};

/// Either a map whose attributes still need to be calculated or the
/// attributes themselves.
#[derive(Clone, Debug, PartialEq)]
pub enum MapOrAttrs<'map> {
    Map(&'map Beatmap),
    Attrs(OsuDifficultyAttributes),
}

impl MapOrAttrs<'_> {
    /// Return a reference to the attributes.
    ///
    /// If `self` is of variant `Map`, calculate the attributes with the given
    /// [`Difficulty`] and store them in `self` first.
    pub fn attrs_or_calculate(
        &mut self,
        difficulty: &Difficulty,
    ) -> Result<&OsuDifficultyAttributes, DifficultyError> {
        if let Self::Map(map) = *self {
            *self = Self::Attrs(difficulty.calculate(map)?);
        }

        match self {
            Self::Attrs(attrs) => Ok(attrs),
            Self::Map(_) => unreachable!(),
        }
    }

    /// Return the attributes, calculating them if necessary.
    pub fn into_attrs(self, difficulty: &Difficulty) -> Result<OsuDifficultyAttributes, DifficultyError> {
        match self {
            Self::Map(map) => difficulty.calculate(map),
            Self::Attrs(attrs) => Ok(attrs),
        }
    }
}

impl<'map> From<&'map Beatmap> for MapOrAttrs<'map> {
    fn from(map: &'map Beatmap) -> Self {
        Self::Map(map)
    }
}

impl From<OsuDifficultyAttributes> for MapOrAttrs<'_> {
    fn from(attrs: OsuDifficultyAttributes) -> Self {
        Self::Attrs(attrs)
    }
}

impl From<OsuPerformanceAttributes> for MapOrAttrs<'_> {
    fn from(attrs: OsuPerformanceAttributes) -> Self {
        Self::Attrs(attrs.difficulty)
    }
}
