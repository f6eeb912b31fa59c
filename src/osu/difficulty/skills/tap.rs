use tracing::trace;

use crate::{
    model::hit_object::Pos,
    osu::{attributes::TapAttributes, object::OsuObject},
    util::{
        mean::{power_mean, weighted_sum},
        precision::{linear_spaced, trunc10},
        special_functions::logistic,
    },
};

const SPACED_BUFF_FACTOR: f64 = 0.1;
const TIMESCALE_COUNT: usize = 4;
const TIMESCALE_FACTORS: [f64; TIMESCALE_COUNT] = [1.02, 1.02, 1.05, 1.15];

/// Strain of each timescale.
pub type TimescaleStrains = [f64; TIMESCALE_COUNT];

/// Decay coefficients of the timescales, geometrically spaced from `e^2.3`
/// down to `e^-2.8`.
fn decay_coeffs() -> TimescaleStrains {
    let mut coeffs = [0.0; TIMESCALE_COUNT];

    for (coeff, exp) in coeffs
        .iter_mut()
        .zip(linear_spaced(TIMESCALE_COUNT, 2.3, -2.8))
    {
        *coeff = exp.exp();
    }

    coeffs
}

pub fn calculate_tap_attributes(
    hit_objects: &[OsuObject],
    clock_rate: f64,
    radius: f64,
) -> TapAttributes {
    let precise = TapStrain::calculate(hit_objects, 0.0, clock_rate, radius);

    let burst_strain = precise
        .strain_history
        .iter()
        .map(|strains| strains[0])
        .fold(f64::NEG_INFINITY, f64::max);

    let stream_note_count: f64 = streamness_mask(hit_objects, burst_strain, clock_rate)
        .iter()
        .sum();

    let mash = TapStrain::calculate(hit_objects, 1.0, clock_rate, radius);

    trace!(
        tap_difficulty = precise.difficulty,
        mash_tap_difficulty = mash.difficulty,
        stream_note_count,
        "Calculated tap attributes"
    );

    TapAttributes {
        tap_difficulty: precise.difficulty,
        stream_note_count,
        mash_tap_difficulty: mash.difficulty,
        strain_history: precise.strain_history,
    }
}

struct TapStrain {
    strain_history: Vec<TimescaleStrains>,
    difficulty: f64,
}

impl TapStrain {
    /// `mash_level` blends between precise tapping (`0.0`) and full mashing
    /// (`1.0`).
    fn calculate(hit_objects: &[OsuObject], mash_level: f64, clock_rate: f64, radius: f64) -> Self {
        let decay_coeffs = decay_coeffs();

        let mut strain_history = vec![[0.0; TIMESCALE_COUNT]; 2];
        strain_history.reserve(hit_objects.len().saturating_sub(2));

        let mut curr_strain = [0.0; TIMESCALE_COUNT];

        if let [first, second, ..] = hit_objects {
            let mut prev_prev_time = first.start_time / 1000.0;
            let mut prev_time = second.start_time / 1000.0;

            for (prev, curr) in hit_objects.iter().zip(hit_objects.iter().skip(1)).skip(1) {
                let curr_time = curr.start_time / 1000.0;

                for (strain, coeff) in curr_strain.iter_mut().zip(decay_coeffs) {
                    *strain *= (-coeff * (curr_time - prev_time) / clock_rate).exp();
                }

                strain_history.push(curr_strain.map(|strain| strain.powf(1.1 / 3.0) * 1.5));

                let distance = truncated_distance(prev.stacked_pos, curr.stacked_pos) / (2.0 * radius);
                let spaced_buff = spacedness(distance) * SPACED_BUFF_FACTOR;

                let delta_time = ((curr_time - prev_prev_time) / clock_rate).max(0.01);

                // * for 1/4 notes above 200 bpm the exponent is -2.7, otherwise it's -2
                let strain_addition = (delta_time.powf(-2.7) * 0.265).max(delta_time.powi(-2));

                let factor = strain_addition
                    * mash_nerf_factor(distance, mash_level).powi(3)
                    * (1.0 + spaced_buff).powi(3);

                for (strain, coeff) in curr_strain.iter_mut().zip(decay_coeffs) {
                    *strain += coeff * factor;
                }

                prev_prev_time = prev_time;
                prev_time = curr_time;
            }
        }

        let strain_results: Vec<_> = decay_coeffs
            .iter()
            .zip(TIMESCALE_FACTORS)
            .enumerate()
            .map(|(j, (coeff, timescale_factor))| {
                let mut single_strain_history: Vec<_> = strain_history
                    .iter()
                    .take(hit_objects.len())
                    .map(|strains| strains[j])
                    .collect();

                single_strain_history.sort_by(|a, b| b.total_cmp(a));

                let k = 1.0 - 0.04 * coeff.sqrt();

                weighted_sum(&single_strain_history, k) * (1.0 - k) * timescale_factor
            })
            .collect();

        Self {
            strain_history,
            difficulty: power_mean(&strain_results, 2.0),
        }
    }
}

/// Distance between two positions with single precision subtraction and
/// length, truncated to six and seven decimal places respectively.
fn truncated_distance(from: Pos, to: Pos) -> f64 {
    let dx = f64::from(to.x as f32 - from.x as f32);
    let dy = f64::from(to.y as f32 - from.y as f32);

    let sub = Pos::new(trunc10(dx, -6), trunc10(dy, -6));
    let len = f64::from(sub.length() as f32);

    trunc10(len, -7)
}

/// Soft mask of objects that are part of a stream, compared to the time
/// between notes a player of the given skill can stream.
fn streamness_mask(hit_objects: &[OsuObject], skill: f64, clock_rate: f64) -> Vec<f64> {
    if hit_objects.len() <= 1 {
        return Vec::new();
    }

    let stream_time_threshold = skill.powf(-2.7 / 3.2);

    let mut mask = Vec::with_capacity(hit_objects.len());
    mask.push(0.0);

    let streamness = hit_objects.windows(2).map(|window| {
        let t = (window[1].start_time - window[0].start_time) / 1000.0 / clock_rate;

        1.0 - logistic((t / stream_time_threshold - 1.0) * 15.0)
    });

    mask.extend(streamness);

    mask
}

fn mash_nerf_factor(relative_d: f64, mash_level: f64) -> f64 {
    let full_mash_factor = 0.73 + 0.27 * logistic(relative_d * 7.0 - 6.0);

    mash_level * full_mash_factor + (1.0 - mash_level)
}

fn spacedness(d: f64) -> f64 {
    logistic((d - 0.533) / 0.13) - logistic(-4.1)
}
