use std::collections::HashMap;

use super::{fitts_law::hit_probability, movement::Movement};

/// Probability of hitting the movement's target with the given throughput
/// and cheese level.
///
/// Movements ending on sliders are cheesed more leniently.
pub fn cheese_hit_probability(movement: &Movement, throughput: f64, cheese_level: f64) -> f64 {
    let cheese_level = if movement.ends_on_slider {
        0.5 * cheese_level + 0.5
    } else {
        cheese_level
    };

    let cheese_movement_time = movement.movement_time * (1.0 + cheese_level * movement.cheesable_ratio);

    hit_probability(movement.distance, cheese_movement_time, throughput)
}

/// Expected time and full combo probability of a map section.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SkillData {
    pub expected_time: f64,
    pub fc_probability: f64,
}

/// A map split into equally sized sections whose evaluations are cached per
/// throughput.
///
/// The cache only lives as long as this struct so it never outlives a single
/// difficulty calculation.
pub struct HitProbabilities<'a> {
    sections: Vec<MapSectionCache<'a>>,
}

impl<'a> HitProbabilities<'a> {
    pub fn new(movements: &'a [Movement], cheese_level: f64, section_count: usize) -> Self {
        let len = movements.len();

        let sections = if len == 0 {
            Vec::new()
        } else {
            (0..section_count)
                .map(|i| {
                    let start = len * i / section_count;
                    let end = (len * (i + 1) / section_count).saturating_sub(1).max(start);

                    MapSectionCache::new(&movements[start..=end], cheese_level)
                })
                .collect()
        };

        Self { sections }
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Full combo probability of the whole map.
    pub fn fc_probability(&mut self, throughput: f64) -> f64 {
        self.sections
            .iter_mut()
            .map(|section| section.evaluate(throughput).fc_probability)
            .product()
    }

    /// The minimum over all windows of `section_count` consecutive sections
    /// of the expected time to full combo the window minus its length.
    pub fn min_expected_time_for_section_count(
        &mut self,
        throughput: f64,
        section_count: usize,
    ) -> f64 {
        let section_data: Vec<_> = self
            .sections
            .iter_mut()
            .map(|section| section.evaluate(throughput))
            .collect();

        let window_count = (self.sections.len() + 1).saturating_sub(section_count);

        (0..window_count)
            .map(|start| {
                Self::expected_fc_time(&section_data[start..start + section_count])
                    - self.length(start, section_count)
            })
            .fold(f64::INFINITY, f64::min)
    }

    fn length(&self, start: usize, section_count: usize) -> f64 {
        self.sections[start + section_count - 1].end_time - self.sections[start].start_time
    }

    fn expected_fc_time(section_data: &[SkillData]) -> f64 {
        section_data.iter().fold(15.0, |fc_time, data| {
            fc_time / data.fc_probability + data.expected_time
        })
    }
}

struct MapSectionCache<'a> {
    movements: &'a [Movement],
    cheese_level: f64,
    start_time: f64,
    end_time: f64,
    cache: HashMap<u64, SkillData>,
}

impl<'a> MapSectionCache<'a> {
    fn new(movements: &'a [Movement], cheese_level: f64) -> Self {
        let start_time = movements.first().map_or(0.0, |movement| movement.time);
        let end_time = movements.last().map_or(0.0, |movement| movement.time);

        Self {
            movements,
            cheese_level,
            start_time,
            end_time,
            cache: HashMap::new(),
        }
    }

    fn evaluate(&mut self, throughput: f64) -> SkillData {
        if self.movements.is_empty() {
            return SkillData {
                expected_time: 0.0,
                fc_probability: 1.0,
            };
        }

        let movements = self.movements;
        let cheese_level = self.cheese_level;

        *self.cache.entry(throughput.to_bits()).or_insert_with(|| {
            let mut result = SkillData {
                expected_time: 0.0,
                fc_probability: 1.0,
            };

            for movement in movements {
                let hit_prob = cheese_hit_probability(movement, throughput, cheese_level) + 1e-10;

                // * Nerf notes with high miss probability
                let hit_prob = 1.0 - ((1.0 - hit_prob + 0.25).sqrt() - 0.5);

                result.expected_time = (result.expected_time + movement.raw_movement_time) / hit_prob;
                result.fc_probability *= hit_prob;
            }

            result
        })
    }
}
