use tracing::{debug, warn};

use crate::{
    osu::{
        attributes::AimAttributes,
        difficulty::{
            hit_probabilities::{cheese_hit_probability, HitProbabilities},
            movement::Movement,
        },
    },
    util::{
        poisson_binomial::PoissonBinomial,
        root_finding::{
            bisection, brent, DEFAULT_ACCURACY, DEFAULT_EXPAND_FACTOR,
            DEFAULT_MAX_EXPAND_ITERATIONS,
        },
        special_functions::logistic,
    },
};

const PROB_THRESHOLD: f64 = 0.02;
const TIME_THRESHOLD: f64 = 1200.0;

const TP_MIN: f64 = 0.1;
const TP_MAX: f64 = 100.0;

const PROB_PRECISION: f64 = 1e-4;
const TIME_PRECISION: f64 = 0.6;

const MAX_ITERATIONS: usize = 100;

const DEFAULT_CHEESE_LEVEL: f64 = 0.4;
const CHEESE_LEVEL_COUNT: usize = 11;

const MISS_TP_COUNT: usize = 20;
const COMBO_TP_COUNT: usize = 50;

/// Aim attributes based on the movements of the regular map and those of the
/// map under hidden.
pub fn calculate_aim_attributes(movements: &[Movement], movements_hidden: &[Movement]) -> AimAttributes {
    let combo_section_count = COMBO_TP_COUNT.min(movements.len());
    let miss_section_count = MISS_TP_COUNT.min(movements.len());

    let mut map_hit_probs = HitProbabilities::new(movements, DEFAULT_CHEESE_LEVEL, combo_section_count);

    let fc_prob_throughput = find_fc_prob_throughput(movements, DEFAULT_CHEESE_LEVEL);
    let hidden_factor = find_fc_prob_throughput(movements_hidden, DEFAULT_CHEESE_LEVEL) / fc_prob_throughput;

    let combo_throughputs: Vec<_> = (1..=combo_section_count)
        .map(|section_count| find_fc_time_throughput(&mut map_hit_probs, section_count))
        .collect();

    let fc_time_throughput = combo_throughputs.last().copied().unwrap_or(TP_MIN);

    let (miss_throughputs, miss_counts) =
        miss_throughputs_and_counts(movements, fc_time_throughput, miss_section_count);

    let (cheese_levels, cheese_factors) = cheese_levels_and_factors(movements, fc_prob_throughput);
    let cheese_note_count = cheese_note_count(movements, fc_prob_throughput);

    debug!(
        fc_prob_throughput,
        fc_time_throughput, hidden_factor, cheese_note_count, "Calculated aim attributes"
    );

    AimAttributes {
        fc_prob_throughput,
        hidden_factor,
        combo_throughputs,
        miss_throughputs,
        miss_counts,
        cheese_note_count,
        cheese_levels,
        cheese_factors,
    }
}

/// Probability of hitting every movement.
pub fn fc_probability(movements: &[Movement], throughput: f64, cheese_level: f64) -> f64 {
    movements
        .iter()
        .map(|movement| cheese_hit_probability(movement, throughput, cheese_level))
        .product()
}

/// Throughput at which a full combo becomes as likely as the probability
/// threshold.
fn find_fc_prob_throughput(movements: &[Movement], cheese_level: f64) -> f64 {
    if fc_probability(movements, TP_MIN, cheese_level) >= PROB_THRESHOLD {
        return TP_MIN;
    }

    if fc_probability(movements, TP_MAX, cheese_level) <= PROB_THRESHOLD {
        return TP_MAX;
    }

    let fc_prob_minus_threshold =
        |tp| fc_probability(movements, tp, cheese_level) - PROB_THRESHOLD;

    brent::find_root(fc_prob_minus_threshold, TP_MIN, TP_MAX, PROB_PRECISION, MAX_ITERATIONS)
        .unwrap_or_else(|err| {
            warn!(%err, "Failed to find full combo probability throughput");

            TP_MIN
        })
}

/// Throughput at which the fastest window of `section_count` sections can be
/// full combo'd within the time threshold.
fn find_fc_time_throughput(hit_probs: &mut HitProbabilities<'_>, section_count: usize) -> f64 {
    if hit_probs.min_expected_time_for_section_count(TP_MIN, section_count) <= TIME_THRESHOLD {
        return TP_MIN;
    }

    if hit_probs.min_expected_time_for_section_count(TP_MAX, section_count) >= TIME_THRESHOLD {
        return TP_MAX;
    }

    let fc_time_minus_threshold =
        |tp| hit_probs.min_expected_time_for_section_count(tp, section_count) - TIME_THRESHOLD;

    bisection::find_root(fc_time_minus_threshold, TP_MIN, TP_MAX, TIME_PRECISION, MAX_ITERATIONS)
        .unwrap_or_else(|err| {
            warn!(%err, section_count, "Failed to find full combo time throughput");

            TP_MIN
        })
}

fn miss_throughputs_and_counts(
    movements: &[Movement],
    fc_time_throughput: f64,
    section_count: usize,
) -> (Vec<f64>, Vec<f64>) {
    let fc_prob = fc_probability(movements, fc_time_throughput, DEFAULT_CHEESE_LEVEL);

    (0..section_count)
        .map(|i| {
            let miss_tp = fc_time_throughput * (1.0 - (i as f64).powf(1.5) * 0.005);
            let miss_probs = miss_probabilities(movements, miss_tp);

            (miss_tp, miss_count(fc_prob, &miss_probs))
        })
        .unzip()
}

fn miss_probabilities(movements: &[Movement], throughput: f64) -> Vec<f64> {
    // * slider breaks should be a miss :( -- joz, 2019
    movements
        .iter()
        .map(|movement| 1.0 - cheese_hit_probability(movement, throughput, DEFAULT_CHEESE_LEVEL))
        .collect()
}

/// Amount of misses that occur with probability `p`.
fn miss_count(p: f64, miss_probs: &[f64]) -> f64 {
    if miss_probs.iter().sum::<f64>() == 0.0 {
        return 0.0;
    }

    let distribution = PoissonBinomial::new(miss_probs);
    let cdf_minus_prob = |miss_count| distribution.cdf(miss_count) - p;

    brent::find_root_expand(
        cdf_minus_prob,
        -100.0,
        1000.0,
        DEFAULT_ACCURACY,
        MAX_ITERATIONS,
        DEFAULT_EXPAND_FACTOR,
        DEFAULT_MAX_EXPAND_ITERATIONS,
    )
    .unwrap_or_else(|err| {
        warn!(%err, "Failed to find miss count");

        0.0
    })
}

fn cheese_levels_and_factors(movements: &[Movement], fc_prob_throughput: f64) -> (Vec<f64>, Vec<f64>) {
    let cheese_level = |i: usize| i as f64 / (CHEESE_LEVEL_COUNT - 1) as f64;
    let cheese_factor = |i: usize| find_fc_prob_throughput(movements, cheese_level(i)) / fc_prob_throughput;

    let cheese_levels = (0..CHEESE_LEVEL_COUNT).map(cheese_level).collect();

    #[cfg(feature = "rayon")]
    let cheese_factors = {
        use rayon::prelude::*;

        (0..CHEESE_LEVEL_COUNT).into_par_iter().map(cheese_factor).collect()
    };

    #[cfg(not(feature = "rayon"))]
    let cheese_factors = (0..CHEESE_LEVEL_COUNT).map(cheese_factor).collect();

    (cheese_levels, cheese_factors)
}

/// Expected amount of notes that can be cheesed by a player with the given
/// throughput.
fn cheese_note_count(movements: &[Movement], throughput: f64) -> f64 {
    movements
        .iter()
        .map(|movement| {
            logistic((movement.index_of_performance / throughput - 0.6) * 15.0) * movement.cheesability
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movement(distance: f64, movement_time: f64, time: f64) -> Movement {
        Movement {
            raw_movement_time: movement_time,
            distance,
            movement_time,
            index_of_performance: (distance + 1.0).log2() / movement_time,
            cheesability: 0.5,
            cheesable_ratio: 0.2,
            time,
            ends_on_slider: false,
        }
    }

    fn jumps(count: usize, distance: f64, movement_time: f64) -> Vec<Movement> {
        let mut movements = vec![Movement::empty(0.0)];

        movements.extend((1..count).map(|i| movement(distance, movement_time, i as f64 * movement_time)));

        movements
    }

    #[test]
    fn empty_movements_are_trivial() {
        assert_eq!(find_fc_prob_throughput(&[], DEFAULT_CHEESE_LEVEL), TP_MIN);
        assert_eq!(miss_count(0.5, &[0.0, 0.0]), 0.0);
    }

    #[test]
    fn miss_count_inverts_cdf() {
        // * symmetric distribution with mean 50 and no skew
        let count = miss_count(0.5, &[0.5; 100]);

        assert!((count - 49.5).abs() < 1e-6, "{count}");
    }

    #[test]
    fn miss_count_beyond_search_range() {
        assert_eq!(miss_count(0.5, &[0.9; 2000]), 0.0);

        let movements = jumps(3000, 4.0, 0.15);
        let throughput = 0.5;

        let expected_misses: f64 = miss_probabilities(&movements, throughput).iter().sum();
        assert!(expected_misses > 1000.0, "{expected_misses}");

        let (_, miss_counts) = miss_throughputs_and_counts(&movements, throughput, MISS_TP_COUNT);

        assert_eq!(miss_counts.len(), MISS_TP_COUNT);
        assert!(miss_counts.iter().all(|&count| count == 0.0), "{miss_counts:?}");
    }

    #[test]
    fn fc_prob_throughput_hits_threshold() {
        let movements = jumps(200, 4.0, 0.15);
        let tp = find_fc_prob_throughput(&movements, DEFAULT_CHEESE_LEVEL);

        assert!(tp > TP_MIN && tp < TP_MAX);

        let prob = fc_probability(&movements, tp, DEFAULT_CHEESE_LEVEL);
        assert!((prob - PROB_THRESHOLD).abs() < 1e-3);
    }

    #[test]
    fn bigger_jumps_need_more_throughput() {
        let small = find_fc_prob_throughput(&jumps(200, 2.0, 0.15), DEFAULT_CHEESE_LEVEL);
        let big = find_fc_prob_throughput(&jumps(200, 5.0, 0.15), DEFAULT_CHEESE_LEVEL);

        assert!(big > small);
    }

    #[test]
    fn attribute_shapes() {
        let movements = jumps(300, 4.0, 0.15);
        let attrs = calculate_aim_attributes(&movements, &movements);

        assert_eq!(attrs.combo_throughputs.len(), COMBO_TP_COUNT);
        assert_eq!(attrs.miss_throughputs.len(), MISS_TP_COUNT);
        assert_eq!(attrs.miss_counts.len(), MISS_TP_COUNT);
        assert_eq!(attrs.cheese_levels.len(), CHEESE_LEVEL_COUNT);
        assert_eq!(attrs.cheese_factors.len(), CHEESE_LEVEL_COUNT);
        assert!((attrs.hidden_factor - 1.0).abs() < 1e-12);

        assert!(attrs.miss_throughputs.windows(2).all(|w| w[0] >= w[1]));
        assert!(attrs.cheese_levels.windows(2).all(|w| w[0] < w[1]));
        assert!(attrs.cheese_factors.iter().all(|&factor| factor > 0.0));
        assert!(attrs.cheese_note_count >= 0.0);
    }

    #[test]
    fn few_movements_limit_sections() {
        let movements = jumps(5, 4.0, 0.15);
        let attrs = calculate_aim_attributes(&movements, &movements);

        assert_eq!(attrs.combo_throughputs.len(), 5);
        assert_eq!(attrs.miss_counts.len(), 5);
    }
}
