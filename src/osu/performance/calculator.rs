use std::f64::consts::{PI, SQRT_2};

use crate::{
    model::mods::Mods,
    osu::{OsuDifficultyAttributes, OsuPerformanceAttributes, OsuScoreState},
    util::{
        interpolation::LinearSpline,
        mean::{power_mean, power_mean_2},
        precision::linear_spaced,
        special_functions::{erf_inv, logistic},
    },
};

// * This is being adjusted to keep the final pp value scaled around what it used to be when changing things.
pub const PERFORMANCE_BASE_MULTIPLIER: f64 = 2.14;

const TOTAL_VALUE_EXPONENT: f64 = 1.5;
const SKILL_TO_PP_EXPONENT: f64 = 2.7;
const MISS_COUNT_LENIENCY: f64 = 0.5;

pub(super) struct OsuPerformanceCalculator {
    attrs: OsuDifficultyAttributes,
    mods: u32,
    state: OsuScoreState,
    effective_miss_count: f64,
    great_window: f64,
}

impl OsuPerformanceCalculator {
    pub fn new(attrs: OsuDifficultyAttributes, mods: u32, state: OsuScoreState) -> Self {
        let effective_miss_count = calculate_effective_misses(&attrs, &state);
        let great_window = 79.5 - 6.0 * attrs.od;

        Self {
            attrs,
            mods,
            state,
            effective_miss_count,
            great_window,
        }
    }

    pub fn calculate(self) -> OsuPerformanceAttributes {
        let mut multiplier = PERFORMANCE_BASE_MULTIPLIER;

        if self.mods.nf() {
            multiplier *= 0.9;
        }

        if self.mods.so() {
            multiplier *= 0.95;
        }

        let aim_value = self.compute_aim_value();
        let tap_value = self.compute_tap_value();
        let acc_value = self.compute_accuracy_value();

        let pp = power_mean(&[aim_value, tap_value, acc_value], TOTAL_VALUE_EXPONENT) * multiplier;

        OsuPerformanceAttributes {
            difficulty: self.attrs,
            pp,
            pp_acc: acc_value,
            pp_aim: aim_value,
            pp_tap: tap_value,
            effective_miss_count: self.effective_miss_count,
        }
    }

    fn compute_aim_value(&self) -> f64 {
        if self.attrs.n_objects() <= 1 {
            return 0.0;
        }

        let aim = &self.attrs.aim;
        let total_hits = f64::from(self.state.total_hits());

        // * Get player's throughput according to combo
        let combo_tp_count = aim.combo_throughputs.len();
        let combo_percentages = linear_spaced(combo_tp_count, 1.0 / combo_tp_count as f64, 1.0);
        let score_combo_percentage = f64::from(self.state.max_combo) / f64::from(self.attrs.max_combo);

        let combo_tp = LinearSpline::interpolate_sorted(&combo_percentages, &aim.combo_throughputs)
            .interpolate(score_combo_percentage);

        // * Get player's throughput according to miss count
        let miss_tp = LinearSpline::interpolate_sorted(&aim.miss_counts, &aim.miss_throughputs)
            .interpolate(self.effective_miss_count)
            .max(0.0);

        // * Combine combo based throughput and miss count based throughput
        let mut tp = power_mean_2(combo_tp, miss_tp, 20.0);

        if self.mods.hd() {
            let ar = self.attrs.ar;

            // * the buff starts decreasing at AR9.75 and reaches 0 at AR10.75
            let hidden_factor = if ar > 10.75 {
                1.0
            } else if ar > 9.75 {
                1.0 + (1.0 - ((ar - 9.75) * PI / 2.0).sin().powi(2)) * (aim.hidden_factor - 1.0)
            } else {
                aim.hidden_factor
            };

            tp *= hidden_factor;
        }

        // * Account for cheesing
        let modified_acc = self.modified_accuracy();
        let acc_on_cheese_notes =
            1.0 - (1.0 - modified_acc) * (total_hits / aim.cheese_note_count).sqrt();

        // * accOnCheeseNotes can be negative. The formula below ensures a positive acc while
        // * preserving the value when accOnCheeseNotes is close to 1
        let acc_on_cheese_notes_positive = (acc_on_cheese_notes - 1.0).exp();
        let ur_on_cheese_notes = 10.0 * self.great_window / (SQRT_2 * erf_inv(acc_on_cheese_notes_positive));
        let cheese_level = logistic((ur_on_cheese_notes * aim.fc_prob_throughput - 3200.0) / 2000.0);

        let cheese_factor = LinearSpline::interpolate_sorted(&aim.cheese_levels, &aim.cheese_factors)
            .interpolate(cheese_level);

        if self.mods.td() {
            tp = tp.min(1.47 * tp.powf(0.8));
        }

        let mut aim_value = tp_to_pp(tp * cheese_factor);

        // * penalize misses
        aim_value *= 0.96_f64.powf((self.effective_miss_count - MISS_COUNT_LENIENCY).max(0.0));

        // * Buff long maps
        aim_value *= 1.0 + (logistic((total_hits - 2800.0) / 500.0) - logistic(-2800.0 / 500.0)) * 0.22;

        // * Buff very high AR and low AR
        let ar = self.attrs.ar;
        let mut ar_factor = 1.0;

        if ar > 10.0 {
            let length_factor = (PI * total_hits.min(1250.0) / 2500.0).sin().powf(1.7);
            ar_factor += (0.05 + 0.35 * length_factor) * (ar - 10.0).powi(2);
        } else if ar < 8.0 {
            ar_factor += 0.01 * (8.0 - ar);
        }

        aim_value *= ar_factor;

        if self.mods.fl() {
            aim_value *= flashlight_bonus(total_hits);
        }

        // * Scale the aim value down with accuracy
        let acc_leniency = self.great_window * aim.fc_prob_throughput / 300.0;
        let acc_penalty = (0.09 / (self.state.accuracy() - 1.3) + 0.3) * (acc_leniency + 1.5);

        aim_value * (-acc_penalty).exp()
    }

    fn compute_tap_value(&self) -> f64 {
        if self.attrs.n_objects() <= 1 {
            return 0.0;
        }

        let tap = &self.attrs.tap;
        let total_hits = f64::from(self.state.total_hits());
        let modified_acc = self.modified_accuracy();

        // * Assume SS for non-stream parts
        let acc_on_streams = 1.0 - (1.0 - modified_acc) * (total_hits / tap.stream_note_count).sqrt();

        // * accOnStreams can be negative. The formula below ensures a positive acc while
        // * preserving the value when accOnStreams is close to 1
        let acc_on_streams_positive = (acc_on_streams - 1.0).exp();
        let ur_on_streams = 10.0 * self.great_window / (SQRT_2 * erf_inv(acc_on_streams_positive));

        let mash_level = logistic((ur_on_streams * tap.tap_difficulty - 4000.0) / 1000.0);
        let tap_skill = mash_level * tap.mash_tap_difficulty + (1.0 - mash_level) * tap.tap_difficulty;

        let mut tap_value = tap_skill_to_pp(tap_skill);

        // * Buff very high acc on streams
        let acc_buff = ((acc_on_streams - 1.0) * 60.0).exp() * tap_value * 0.2;
        tap_value += acc_buff;

        // * Scale tap value down with accuracy
        let acc_factor = 0.5 + 0.5 * (logistic((self.state.accuracy() - 0.65) / 0.1) + logistic(-3.5));
        tap_value *= acc_factor;

        // * Penalize misses and 50s exponentially
        tap_value *= 0.93_f64.powf((self.effective_miss_count - MISS_COUNT_LENIENCY).max(0.0));

        let n50 = f64::from(self.state.n50);

        let n50_penalty = if n50 < total_hits / 500.0 {
            0.5 * n50
        } else {
            n50 - total_hits / 500.0 * 0.5
        };

        tap_value *= 0.98_f64.powf(n50_penalty);

        // * Buff very high AR
        let ar = self.attrs.ar;
        let mut ar_factor = 1.0;

        if ar > 10.33 {
            let ar11_len_buff = 0.8 * (logistic(total_hits / 500.0) - 0.5);
            ar_factor += ar11_len_buff * (ar - 10.33) / 0.67;
        }

        tap_value * ar_factor
    }

    fn compute_accuracy_value(&self) -> f64 {
        let modified_acc = self.modified_accuracy();

        // * technically accOnCircles = modifiedAcc
        // * -0.003 exists so that the difference between 99.5% and 100% is not too big
        let acc_on_circles = modified_acc - 0.003;

        // * accOnCircles can be negative. The formula below ensures a positive acc while
        // * preserving the value when accOnCircles is close to 1
        let acc_on_circles_positive = (acc_on_circles - 1.0).exp();

        // * add 20 to greatWindow to nerf high OD
        let deviation_on_circles =
            (self.great_window + 20.0) / (SQRT_2 * erf_inv(acc_on_circles_positive));

        let mut acc_value =
            deviation_on_circles.powf(-2.2) * self.attrs.finger_control.sqrt() * 46_000.0;

        // * scale acc pp with misses
        acc_value *= 0.96_f64.powf((self.effective_miss_count - MISS_COUNT_LENIENCY).max(0.0));

        // * nerf short maps
        let map_len = self.attrs.map_len;

        let len_factor = if map_len < 120.0 {
            logistic((map_len - 300.0) / 60.0) + logistic(2.5) - logistic(-2.5)
        } else {
            logistic(map_len / 60.0)
        };

        acc_value *= len_factor;

        if self.mods.hd() {
            acc_value *= 1.08;
        }

        if self.mods.fl() {
            acc_value *= 1.02;
        }

        acc_value
    }

    /// Accuracy on circles only where 100s count as 200s and 50s as 100s.
    ///
    /// Sliders and spinners are assumed to be 300s. Two extra circles in the
    /// denominator keep SS scores away from an accuracy of `1.0`.
    fn modified_accuracy(&self) -> f64 {
        let n_circles = f64::from(self.attrs.n_circles);
        let total_hits = f64::from(self.state.total_hits());

        let n300 = f64::from(self.state.n300) - (total_hits - n_circles);
        let n100 = f64::from(self.state.n100);
        let n50 = f64::from(self.state.n50);

        (n300 * 3.0 + n100 * 2.0 + n50) / ((n_circles + 2.0) * 3.0)
    }
}

fn tp_to_pp(tp: f64) -> f64 {
    tp.powf(SKILL_TO_PP_EXPONENT) * 0.118
}

fn tap_skill_to_pp(tap_skill: f64) -> f64 {
    tap_skill.powf(SKILL_TO_PP_EXPONENT) * 0.115
}

fn flashlight_bonus(total_hits: f64) -> f64 {
    let mut bonus = 1.0 + 0.35 * (total_hits / 200.0).min(1.0);

    if total_hits > 200.0 {
        bonus += 0.3 * ((total_hits - 200.0) / 300.0).min(1.0);

        if total_hits > 500.0 {
            bonus += (total_hits - 500.0) / 2000.0;
        }
    }

    bonus
}

/// Misses including an estimated amount of slider breaks based on combo.
pub(super) fn calculate_effective_misses(attrs: &OsuDifficultyAttributes, state: &OsuScoreState) -> f64 {
    let max_combo = f64::from(attrs.max_combo);
    let combo = f64::from(state.max_combo);

    // * guess the number of misses + slider breaks from combo
    let combo_based_miss_count = if attrs.n_sliders == 0 {
        if combo < max_combo {
            max_combo / combo
        } else {
            0.0
        }
    } else {
        let slider_leniency = 0.1 * f64::from(attrs.n_sliders);
        let full_combo_threshold = max_combo - slider_leniency;

        if combo < full_combo_threshold {
            full_combo_threshold / combo
        } else {
            ((max_combo - combo) / slider_leniency).powi(3)
        }
    };

    combo_based_miss_count.max(f64::from(state.misses))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(n_circles: u32, n_sliders: u32, max_combo: u32) -> OsuDifficultyAttributes {
        OsuDifficultyAttributes {
            n_circles,
            n_sliders,
            max_combo,
            ..Default::default()
        }
    }

    fn state(max_combo: u32, misses: u32) -> OsuScoreState {
        OsuScoreState {
            max_combo,
            n300: 100,
            misses,
            ..Default::default()
        }
    }

    #[test]
    fn effective_misses_without_sliders() {
        let attrs = attrs(100, 0, 100);

        assert_eq!(calculate_effective_misses(&attrs, &state(100, 0)), 0.0);
        assert!((calculate_effective_misses(&attrs, &state(25, 0)) - 4.0).abs() < 1e-12);
        assert_eq!(calculate_effective_misses(&attrs, &state(25, 7)), 7.0);
    }

    #[test]
    fn effective_misses_with_sliders() {
        let attrs = attrs(50, 50, 200);

        // * threshold = 200 - 5
        assert_eq!(calculate_effective_misses(&attrs, &state(200, 0)), 0.0);
        assert!((calculate_effective_misses(&attrs, &state(195, 0)) - 1.0).abs() < 1e-12);
        assert!((calculate_effective_misses(&attrs, &state(97, 0)) - 195.0 / 97.0).abs() < 1e-12);
    }

    #[test]
    fn flashlight_bonus_grows_with_length() {
        assert!((flashlight_bonus(100.0) - 1.175).abs() < 1e-12);
        assert!((flashlight_bonus(200.0) - 1.35).abs() < 1e-12);
        assert!((flashlight_bonus(500.0) - 1.65).abs() < 1e-12);
        assert!((flashlight_bonus(900.0) - 1.85).abs() < 1e-12);
    }

    #[test]
    fn modified_accuracy_ignores_sliders() {
        let attrs = attrs(80, 20, 140);

        let state = OsuScoreState {
            max_combo: 140,
            n300: 100,
            ..Default::default()
        };

        let calculator = OsuPerformanceCalculator::new(attrs, 0, state);

        assert!((calculator.modified_accuracy() - 80.0 / 82.0).abs() < 1e-12);
    }
}
