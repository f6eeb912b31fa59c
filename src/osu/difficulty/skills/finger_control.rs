use crate::{osu::object::OsuObject, util::mean::weighted_sum};

const MIN_STRAIN_TIME: f64 = 0.046875;
const DECAY_BASE: f64 = 0.9;
const STRAIN_MULTIPLIER: f64 = 0.1;
const REPEAT_THRESHOLD: f64 = 0.004;
const WEIGHT_DECAY: f64 = 0.95;
const DIFFICULTY_MULTIPLIER: f64 = 0.055;

/// Difficulty of keeping up with changing rhythms.
///
/// Repeating the same rhythm decays the strain while sliders halve it.
pub fn calculate_finger_control_difficulty(hit_objects: &[OsuObject], clock_rate: f64) -> f64 {
    if hit_objects.is_empty() {
        return 0.0;
    }

    let mut prev_time = hit_objects[0].start_time / 1000.0;
    let mut curr_strain: f64 = 0.0;
    let mut prev_strain_time = 0.0;
    let mut repeat_strain_count = 1_i32;

    let mut strain_history = Vec::with_capacity(hit_objects.len());
    strain_history.push(0.0);

    for h in hit_objects.iter().skip(1) {
        let curr_time = h.start_time / 1000.0;
        let delta_time = (curr_time - prev_time) / clock_rate;

        let strain_time = delta_time.max(MIN_STRAIN_TIME);
        let strain_decay_base = DECAY_BASE.powf(1.0 / strain_time.min(0.2));

        curr_strain *= strain_decay_base.powf(delta_time);
        strain_history.push(curr_strain);

        let mut strain = STRAIN_MULTIPLIER / strain_time;

        if (strain_time - prev_strain_time).abs() > REPEAT_THRESHOLD {
            repeat_strain_count = 1;
        } else {
            repeat_strain_count += 1;
        }

        if h.is_slider() {
            strain /= 2.0;
        }

        if repeat_strain_count % 2 == 0 {
            strain = 0.0;
        } else {
            strain /= 1.25_f64.powi(repeat_strain_count);
        }

        curr_strain += strain;

        prev_time = curr_time;
        prev_strain_time = strain_time;
    }

    strain_history.sort_by(|a, b| b.total_cmp(a));

    weighted_sum(&strain_history, WEIGHT_DECAY) * DIFFICULTY_MULTIPLIER
}
