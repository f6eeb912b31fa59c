use tracing::debug;

/// Aggregation for a score's current state.
///
/// Created through [`OsuScoreState::builder`] which validates the counts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OsuScoreState {
    /// Maximum combo that the score has had so far. **Not** the maximum
    /// possible combo of the map so far.
    pub max_combo: u32,
    /// Amount of current 300s.
    pub n300: u32,
    /// Amount of current 100s.
    pub n100: u32,
    /// Amount of current 50s.
    pub n50: u32,
    /// Amount of current misses.
    pub misses: u32,
}

impl OsuScoreState {
    /// Create a new empty score state.
    pub const fn new() -> Self {
        Self {
            max_combo: 0,
            n300: 0,
            n100: 0,
            n50: 0,
            misses: 0,
        }
    }

    /// Returns a builder to create a validated [`OsuScoreState`].
    pub const fn builder() -> OsuScoreStateBuilder {
        OsuScoreStateBuilder::new()
    }

    /// Return the total amount of hits by adding everything up.
    ///
    /// Saturates at `u32::MAX`.
    pub const fn total_hits(&self) -> u32 {
        self.n300
            .saturating_add(self.n100)
            .saturating_add(self.n50)
            .saturating_add(self.misses)
    }

    /// Calculate the accuracy between `0.0` and `1.0` for this state.
    pub fn accuracy(&self) -> f64 {
        let total_hits = self.total_hits();

        if total_hits == 0 {
            return 0.0;
        }

        let numerator = 300 * u64::from(self.n300) + 100 * u64::from(self.n100) + 50 * u64::from(self.n50);
        let denominator = 300 * u64::from(total_hits);

        numerator as f64 / denominator as f64
    }
}

/// Error when a score's values are inconsistent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScoreError {
    #[error("the score has no hits")]
    NoHits,
    #[error("the score has no combo")]
    NoCombo,
    #[error("the score has no accuracy")]
    NoAccuracy,
}

/// Builder for an [`OsuScoreState`].
///
/// Missing hit counts are derived from the accuracy if one is given,
/// otherwise missing 300s fill up the total amount of hits.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[must_use]
pub struct OsuScoreStateBuilder {
    n300: Option<u32>,
    n100: Option<u32>,
    n50: Option<u32>,
    misses: Option<u32>,
    total_hits: Option<u32>,
    max_combo: Option<u32>,
    acc: Option<f64>,
}

impl OsuScoreStateBuilder {
    /// Create a new builder with no values.
    pub const fn new() -> Self {
        Self {
            n300: None,
            n100: None,
            n50: None,
            misses: None,
            total_hits: None,
            max_combo: None,
            acc: None,
        }
    }

    /// Specify the amount of 300s.
    pub const fn n300(mut self, n300: u32) -> Self {
        self.n300 = Some(n300);

        self
    }

    /// Specify the amount of 100s.
    pub const fn n100(mut self, n100: u32) -> Self {
        self.n100 = Some(n100);

        self
    }

    /// Specify the amount of 50s.
    pub const fn n50(mut self, n50: u32) -> Self {
        self.n50 = Some(n50);

        self
    }

    /// Specify the amount of misses.
    pub const fn misses(mut self, misses: u32) -> Self {
        self.misses = Some(misses);

        self
    }

    /// Specify the total amount of hits.
    ///
    /// Only used to derive missing counts. If omitted, the sum of the given
    /// counts is used.
    pub const fn total_hits(mut self, total_hits: u32) -> Self {
        self.total_hits = Some(total_hits);

        self
    }

    /// Specify the maximum combo of the score.
    pub const fn max_combo(mut self, max_combo: u32) -> Self {
        self.max_combo = Some(max_combo);

        self
    }

    /// Specify the accuracy either as a fraction between `0.0` and `1.0` or
    /// as a percentage.
    pub fn accuracy(mut self, mut acc: f64) -> Self {
        while acc > 1.0 {
            acc /= 100.0;
        }

        self.acc = Some(acc);

        self
    }

    /// Validate the values and derive missing hit counts.
    pub fn build(self) -> Result<OsuScoreState, ScoreError> {
        let n50 = self.n50.unwrap_or(0);
        let misses = self.misses.unwrap_or(0);

        let total_hits = self.total_hits.unwrap_or_else(|| {
            self.n300
                .unwrap_or(0)
                .saturating_add(self.n100.unwrap_or(0))
                .saturating_add(n50)
                .saturating_add(misses)
        });

        if total_hits == 0 {
            debug!("Rejected score without hits");

            return Err(ScoreError::NoHits);
        }

        let max_combo = match self.max_combo {
            Some(max_combo) if max_combo > 0 => max_combo,
            _ => {
                debug!("Rejected score without combo");

                return Err(ScoreError::NoCombo);
            }
        };

        if self.acc.is_some_and(|acc| acc.is_nan() || acc <= 0.0) {
            debug!(acc = self.acc, "Rejected score without accuracy");

            return Err(ScoreError::NoAccuracy);
        }

        let remaining = total_hits.saturating_sub(n50.saturating_add(misses));

        let (n300, n100) = match (self.n300, self.n100, self.acc) {
            (Some(n300), Some(n100), _) if n300 > 0 && n100 > 0 => (n300, n100),
            (_, _, Some(acc)) => {
                let total = f64::from(total_hits);
                let n100 = ((total - acc * total) / 2.0 * 3.0).ceil().max(0.0) as u32;
                let n100 = n100.min(remaining);

                (remaining - n100, n100)
            }
            (_, n100, None) => {
                let n100 = n100.unwrap_or(0).min(remaining);

                (remaining - n100, n100)
            }
        };

        let state = OsuScoreState {
            max_combo,
            n300,
            n100,
            n50,
            misses,
        };

        let acc = state.accuracy();

        if acc.is_nan() || acc <= 0.0 {
            debug!(acc, "Rejected score without accuracy");

            return Err(ScoreError::NoAccuracy);
        }

        Ok(state)
    }
}
