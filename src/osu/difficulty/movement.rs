use crate::{
    model::hit_object::Pos,
    osu::object::OsuObject,
    util::{
        mean::{power_mean, power_mean_2},
        precision::FloatExt,
        special_functions::logistic,
    },
};

use super::{angle_correction::AngleCorrection, fitts_law::index_of_performance};

const T_RATIO_THRESHOLD: f64 = 1.4;
const CORRECTION_NEG2_STILL: f64 = 0.0;

/// A movement from one object to the next.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Movement {
    /// Time between the two objects in seconds, adjusted by the clock rate.
    pub raw_movement_time: f64,
    /// Normalized distance after all corrections.
    pub distance: f64,
    pub movement_time: f64,
    pub index_of_performance: f64,
    pub cheesability: f64,
    pub cheesable_ratio: f64,
    /// Start time of the object moved to, in seconds.
    pub time: f64,
    pub ends_on_slider: bool,
}

impl Movement {
    /// A movement without difficulty, e.g. for slider ticks.
    pub const fn empty(time: f64) -> Self {
        Self {
            raw_movement_time: 0.0,
            distance: 0.0,
            movement_time: 1.0,
            index_of_performance: 0.0,
            cheesability: 0.0,
            cheesable_ratio: 0.0,
            time,
            ends_on_slider: false,
        }
    }
}

/// Extract the movements of all objects.
///
/// `densities` are only required for hidden, otherwise no hidden
/// correction is applied. Each object adds one movement plus an empty
/// movement per additional combo it is worth.
pub fn extract_movements(
    hit_objects: &[OsuObject],
    clock_rate: f64,
    radius: f64,
    strain_history: &[[f64; 4]],
    densities: Option<&[f64]>,
) -> Vec<Movement> {
    let Some(first) = hit_objects.first() else {
        return Vec::new();
    };

    let mut movements = Vec::with_capacity(hit_objects.len());

    let movement = Movement::empty(first.start_time / 1000.0);
    movements.push(movement);
    push_nested(&mut movements, first, movement.time);

    for i in 1..hit_objects.len() {
        let objects = MovementObjects {
            neg4: i.checked_sub(4).map(|idx| &hit_objects[idx]),
            neg2: i.checked_sub(2).map(|idx| &hit_objects[idx]),
            prev: &hit_objects[i - 1],
            curr: &hit_objects[i],
            next: hit_objects.get(i + 1),
        };

        let (hidden, note_density) = match densities {
            Some(densities) => (true, densities.get(i).copied().unwrap_or(0.0)),
            None => (false, 0.0),
        };

        let params = MovementParams {
            tap_strain: strain_history.get(i).copied(),
            clock_rate,
            radius,
            hidden,
            note_density,
        };

        let movement = extract(&objects, &params);
        movements.push(movement);

        if !(objects.curr.is_spinner() || objects.prev.is_spinner()) {
            push_nested(&mut movements, objects.curr, movement.time);
        }
    }

    movements
}

/// Zero difficulty movements for slider ticks, repeats, and ends so that
/// combo is reflected properly.
fn push_nested(movements: &mut Vec<Movement>, h: &OsuObject, time: f64) {
    let extra_nested = h.combo().saturating_sub(1) as usize;
    movements.resize(movements.len() + extra_nested, Movement::empty(time));
}

/// Objects surrounding a movement from `prev` to `curr`.
pub struct MovementObjects<'a> {
    pub neg4: Option<&'a OsuObject>,
    pub neg2: Option<&'a OsuObject>,
    pub prev: &'a OsuObject,
    pub curr: &'a OsuObject,
    pub next: Option<&'a OsuObject>,
}

pub struct MovementParams {
    /// Tap strain of each timescale at the current object.
    pub tap_strain: Option<[f64; 4]>,
    pub clock_rate: f64,
    pub radius: f64,
    pub hidden: bool,
    pub note_density: f64,
}

/// Normalized displacement, distance, and time between two objects.
#[derive(Copy, Clone, Default)]
struct Displacement {
    s: Pos,
    d: f64,
    t: f64,
}

impl Displacement {
    fn new(from: &OsuObject, to: &OsuObject, radius: f64, clock_rate: f64) -> Self {
        let s = (to.stacked_pos - from.stacked_pos) / (2.0 * radius);

        Self {
            s,
            d: s.length(),
            t: (to.start_time - from.start_time) / clock_rate / 1000.0,
        }
    }
}

fn normalized_distance(from: &OsuObject, to: &OsuObject, radius: f64) -> f64 {
    ((to.stacked_pos - from.stacked_pos) / (2.0 * radius)).length()
}

/// Extract the movement from `prev` to `curr`.
pub fn extract(objects: &MovementObjects<'_>, params: &MovementParams) -> Movement {
    let MovementObjects {
        neg4,
        neg2,
        prev,
        curr,
        next,
    } = *objects;

    let MovementParams {
        tap_strain,
        clock_rate,
        radius,
        hidden,
        note_density,
    } = *params;

    let t_prev_curr = (curr.start_time - prev.start_time) / clock_rate / 1000.0;
    let time = curr.start_time / 1000.0;

    if curr.is_spinner() || prev.is_spinner() {
        return Movement {
            raw_movement_time: t_prev_curr,
            ..Movement::empty(time)
        };
    }

    let neg2 = neg2.filter(|h| !h.is_spinner());
    let next = next.filter(|h| !h.is_spinner());

    let prev_curr = Displacement::new(prev, curr, radius, clock_rate);
    let Displacement {
        s: s_prev_curr,
        d: d_prev_curr,
        ..
    } = prev_curr;

    let ip_prev_curr = index_of_performance(d_prev_curr, t_prev_curr);

    let d_neg4_curr = neg4.map_or(0.0, |neg4| normalized_distance(neg4, curr, radius));

    let neg2_prev = neg2.map_or_else(Displacement::default, |neg2| {
        Displacement::new(neg2, prev, radius, clock_rate)
    });
    let d_neg2_curr = neg2.map_or(0.0, |neg2| normalized_distance(neg2, curr, radius));

    let curr_next = next.map_or_else(Displacement::default, |next| {
        Displacement::new(curr, next, radius, clock_rate)
    });

    let Displacement {
        s: s_neg2_prev,
        d: d_neg2_prev,
        t: t_neg2_prev,
    } = neg2_prev;

    let Displacement {
        s: s_curr_next,
        d: d_curr_next,
        t: t_curr_next,
    } = curr_next;

    let mut flowiness_neg2_prev_curr = 0.0;
    let mut flowiness_prev_curr_next = 0.0;
    let mut prev_temporally_in_the_middle = false;
    let mut curr_temporally_in_the_middle = false;

    // Correction #1 - The Previous Object
    // * Estimate how the object two before affects the difficulty of
    // * hitting the current object
    let mut correction_neg2 = 0.0;

    if neg2.is_some() && d_prev_curr.not_eq(0.0) {
        let t_ratio_neg2 = t_prev_curr / t_neg2_prev;
        let cos_neg2_prev_curr =
            (-s_neg2_prev.dot(s_prev_curr) / d_neg2_prev / d_prev_curr).clamp(-1.0, 1.0);

        if t_ratio_neg2 > T_RATIO_THRESHOLD {
            if d_neg2_prev.eq(0.0) {
                correction_neg2 = CORRECTION_NEG2_STILL;
            } else {
                let correction_neg2_moving = moving_correction(cos_neg2_prev_curr);
                let movingness = logistic(d_neg2_prev * 6.0 - 5.0) - logistic(-5.0);

                correction_neg2 = (movingness * correction_neg2_moving
                    + (1.0 - movingness) * CORRECTION_NEG2_STILL)
                    * 1.5;
            }
        } else if t_ratio_neg2 < T_RATIO_THRESHOLD.recip() {
            if d_neg2_prev.not_eq(0.0) {
                correction_neg2 = (1.0 - cos_neg2_prev_curr)
                    * logistic((d_neg2_prev * t_ratio_neg2 - 1.5) * 4.0)
                    * 0.3;
            }
        } else {
            prev_temporally_in_the_middle = true;

            let normalized_pos_neg2 = -s_neg2_prev / t_neg2_prev * t_prev_curr;
            let (x_neg2, y_neg2) = project(normalized_pos_neg2, s_prev_curr, d_prev_curr);

            let flow = AngleCorrection::FlowNeg2.evaluate(d_prev_curr, x_neg2, y_neg2);
            let snap = AngleCorrection::SnapNeg2.evaluate(d_prev_curr, x_neg2, y_neg2);
            let stop = logistic(10.0 * (x_neg2 * x_neg2 + y_neg2 * y_neg2 + 1.0).sqrt() - 12.0);

            flowiness_neg2_prev_curr = logistic((snap - flow - 0.05) * 20.0);
            correction_neg2 = power_mean(&[flow, snap, stop], -10.0) * 1.3;
        }
    }

    // Correction #2 - The Next Object
    // * Estimate how the next object affects the difficulty of hitting the
    // * current object
    let mut correction_next = 0.0;

    if next.is_some() && d_prev_curr.not_eq(0.0) {
        let t_ratio_next = t_prev_curr / t_curr_next;
        let cos_prev_curr_next =
            (-s_prev_curr.dot(s_curr_next) / d_prev_curr / d_curr_next).clamp(-1.0, 1.0);

        if t_ratio_next > T_RATIO_THRESHOLD {
            if d_curr_next.not_eq(0.0) {
                let correction_next_moving = moving_correction(cos_prev_curr_next);
                let movingness = logistic(d_curr_next * 6.0 - 5.0) - logistic(-5.0);

                correction_next = movingness * correction_next_moving * 0.5;
            }
        } else if t_ratio_next < T_RATIO_THRESHOLD.recip() {
            if d_curr_next.not_eq(0.0) {
                correction_next = (1.0 - cos_prev_curr_next)
                    * logistic((d_curr_next * t_ratio_next - 1.5) * 4.0)
                    * 0.15;
            }
        } else {
            curr_temporally_in_the_middle = true;

            let normalized_pos_next = s_curr_next / t_curr_next * t_prev_curr;
            let (x_next, y_next) = project(normalized_pos_next, s_prev_curr, d_prev_curr);

            let flow = AngleCorrection::FlowNext.evaluate(d_prev_curr, x_next, y_next);
            let snap = AngleCorrection::SnapNext.evaluate(d_prev_curr, x_next, y_next);

            flowiness_prev_curr_next = logistic((snap - flow - 0.05) * 20.0);
            correction_next = (power_mean_2(flow, snap, -10.0) - 0.1).max(0.0) * 0.5;
        }
    }

    // Correction #3 - 4-object pattern
    // * Only takes effect when the pattern is not so spaced i.e. no jumps
    let mut pattern_correction = 0.0;

    if prev_temporally_in_the_middle && curr_temporally_in_the_middle {
        let gap = (s_prev_curr - s_curr_next / 2.0 - s_neg2_prev / 2.0).length()
            / (d_prev_curr + 0.1);

        pattern_correction = (logistic((gap - 1.0) * 8.0) - logistic(-6.0))
            * logistic((d_neg2_prev - 0.7) * 10.0)
            * logistic((d_curr_next - 0.7) * 10.0)
            * power_mean_2(flowiness_neg2_prev_curr, flowiness_prev_curr_next, 2.0)
            * 0.6;
    }

    // Correction #4 - Tap Strain
    let mut tap_correction = 0.0;

    if let Some(tap_strain) = tap_strain.filter(|_| d_prev_curr > 0.0) {
        tap_correction =
            logistic((power_mean(&tap_strain, 2.0) / ip_prev_curr - 1.34) / 0.1) * 0.15;
    }

    // Correction #5 - Cheesing
    // * The player might make the movement easier by hitting the previous
    // * object early and the current object late
    let cheese = Cheese::new(
        (neg2.is_some(), d_neg2_prev, t_neg2_prev),
        (next.is_some(), d_curr_next, t_curr_next),
        t_prev_curr,
        ip_prev_curr,
        d_prev_curr,
    );

    // Correction #6 - High bpm jump buff (alt buff)
    let effective_bpm = 30.0 / (t_prev_curr + 1e-10);
    let high_bpm_jump_buff = logistic((effective_bpm - 354.0) / 16.0)
        * logistic((d_prev_curr - 1.9) / 0.15)
        * 0.23;

    // Correction #7 - Small circle bonus
    let small_circle_bonus = (logistic((55.0 - 2.0 * radius) / 3.0) * 0.3
        + (24.5 - radius.min(24.5)).powf(1.4) * 0.01315)
        * logistic((d_prev_curr - 0.5) / 0.1).max(0.25);

    // Correction #8 - Stacked notes nerf
    let d_prev_curr_stacked_nerf = d_prev_curr
        .min((1.2 * d_prev_curr - 0.185).min(1.4 * d_prev_curr - 0.32))
        .max(0.0);

    // Correction #9 - Slow small jump nerf
    let small_jump_nerf_factor = 1.0
        - 0.17
            * (-((d_prev_curr - 2.2) / 0.7).powi(2)).exp()
            * logistic((255.0 - effective_bpm) / 10.0);

    // Correction #10 - Slow big jump buff
    let big_jump_buff_factor = 1.0
        + 0.15 * logistic((d_prev_curr - 6.0) / 0.5) * logistic((210.0 - effective_bpm) / 8.0);

    // Correction #11 - Hidden Mod
    let correction_hidden = if hidden {
        0.05 + 0.008 * note_density
    } else {
        0.0
    };

    // Correction #12 - Stacked wiggle fix
    if let (Some(neg2), Some(next)) = (neg2, next) {
        let d_prev_next = normalized_distance(prev, next, radius);
        let d_neg2_next = normalized_distance(neg2, next, radius);

        let all_close = [
            d_neg2_prev,
            d_neg2_curr,
            d_neg2_next,
            d_prev_curr,
            d_prev_next,
            d_curr_next,
        ]
        .iter()
        .all(|&d| d < 1.0);

        if all_close {
            correction_neg2 = 0.0;
            correction_next = 0.0;
            pattern_correction = 0.0;
            tap_correction = 0.0;
        }
    }

    // Correction #13 - Repetitive jump nerf
    // * Nerf big jumps where the object two or four before is close to the
    // * current one
    let jump_overlap_correction = 1.0
        - ((0.15 - 0.1 * d_neg2_curr).max(0.0) + (0.1125 - 0.075 * d_neg4_curr).max(0.0))
            * logistic((d_prev_curr - 3.3) / 0.25);

    // Correction #14 - Sudden distance increase buff
    let distance_increase_buff = if neg2.is_some() {
        let d_neg2_prev_overlap_nerf = d_neg2_prev.powi(3).min(1.0);
        let time_ratio = (t_prev_curr / (t_neg2_prev + 1e-10)).max(t_neg2_prev / (t_prev_curr + 1e-10));
        let time_difference_nerf = (-4.0 * (1.0 - time_ratio).powi(2)).exp();
        let distance_ratio = d_prev_curr / d_neg2_prev.max(1.0);
        let bpm_scaling = (-16.0 * t_prev_curr + 3.4).max(1.0);

        1.0 + 0.225
            * bpm_scaling
            * time_difference_nerf
            * d_neg2_prev_overlap_nerf
            * (distance_ratio - 2.0).max(0.0)
    } else {
        1.0
    };

    let distance = d_prev_curr_stacked_nerf
        * (1.0 + small_circle_bonus)
        * (1.0 + correction_neg2 + correction_next + pattern_correction)
        * (1.0 + high_bpm_jump_buff)
        * (1.0 + tap_correction)
        * small_jump_nerf_factor
        * big_jump_buff_factor
        * (1.0 + correction_hidden)
        * jump_overlap_correction
        * distance_increase_buff;

    Movement {
        raw_movement_time: t_prev_curr,
        distance,
        movement_time: t_prev_curr,
        index_of_performance: ip_prev_curr,
        cheesability: cheese.early + cheese.late,
        cheesable_ratio: (cheese.time_early + cheese.time_late) / (t_prev_curr + 1e-10),
        time,
        ends_on_slider: curr.is_slider(),
    }
}

/// Linear from `1.1` at a cosine of `-1` down to `0` at a cosine of `1`.
fn moving_correction(cos: f64) -> f64 {
    0.55 * (1.0 - cos)
}

/// Split `pos` into its component along `direction` and the length of the
/// perpendicular rest.
fn project(pos: Pos, direction: Pos, direction_len: f64) -> (f64, f64) {
    let x = pos.dot(direction) / direction_len;
    let y = (pos - direction * (x / direction_len)).length();

    (x, y)
}

#[derive(Default)]
struct Cheese {
    early: f64,
    late: f64,
    time_early: f64,
    time_late: f64,
}

impl Cheese {
    /// Neighbouring movements are given as `(exists, distance, time)`.
    fn new(
        neg2_prev: (bool, f64, f64),
        curr_next: (bool, f64, f64),
        t_prev_curr: f64,
        ip_prev_curr: f64,
        d_prev_curr: f64,
    ) -> Self {
        if d_prev_curr <= 0.0 {
            return Self::default();
        }

        let side = |(exists, d, t): (bool, f64, f64)| {
            let (t_reciprocal, ip) = if exists {
                ((t + 1e-10).recip(), index_of_performance(d, t))
            } else {
                (0.0, 0.0)
            };

            let cheesability = logistic((ip / ip_prev_curr - 0.6) * -15.0) * 0.5;
            let time = cheesability * (1.0 / (1.0 / (t_prev_curr + 0.07) + t_reciprocal));

            (cheesability, time)
        };

        let (early, time_early) = side(neg2_prev);
        let (late, time_late) = side(curr_next);

        Self {
            early,
            late,
            time_early,
            time_late,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{
        model::hit_object::HitObject,
        osu::difficulty::scaling_factor::ScalingFactor,
    };

    use super::*;

    fn objects(hit_objects: &[HitObject]) -> Vec<OsuObject> {
        hit_objects.iter().map(OsuObject::new).collect()
    }

    fn radius() -> f64 {
        ScalingFactor::new(4.0).radius
    }

    #[test]
    fn first_object_and_nested() {
        let objects = objects(&[
            HitObject::slider(Pos::new(0.0, 0.0), 1000.0, 1500.0, Pos::new(100.0, 0.0), 3),
            HitObject::circle(Pos::new(200.0, 0.0), 2000.0),
        ]);

        let movements = extract_movements(&objects, 1.0, radius(), &[], None);

        assert_eq!(movements.len(), 4);
        assert_eq!(movements[0], Movement::empty(1.0));
        assert_eq!(movements[1], Movement::empty(1.0));
        assert_eq!(movements[2], Movement::empty(1.0));

        let jump = movements[3];
        assert!((jump.time - 2.0).abs() < 1e-12);
        assert!((jump.raw_movement_time - 1.0).abs() < 1e-12);
        assert!(jump.distance > 0.0);
        assert!(!jump.ends_on_slider);
    }

    #[test]
    fn spinners_break_the_chain() {
        let objects = objects(&[
            HitObject::circle(Pos::new(0.0, 0.0), 0.0),
            HitObject::spinner(Pos::new(256.0, 192.0), 500.0, 1500.0),
            HitObject::slider(Pos::new(100.0, 100.0), 2000.0, 2300.0, Pos::new(0.0, 0.0), 2),
        ]);

        let movements = extract_movements(&objects, 1.5, radius(), &[], None);

        // * no nested placeholders after a spinner
        assert_eq!(movements.len(), 3);

        for movement in &movements[1..] {
            assert_eq!(movement.distance, 0.0);
            assert_eq!(movement.movement_time, 1.0);
            assert_eq!(movement.index_of_performance, 0.0);
        }

        assert!((movements[1].raw_movement_time - 0.5 / 1.5).abs() < 1e-12);
    }

    #[test]
    fn slider_end_flag() {
        let objects = objects(&[
            HitObject::circle(Pos::new(0.0, 0.0), 0.0),
            HitObject::slider(Pos::new(300.0, 0.0), 300.0, 600.0, Pos::new(300.0, 100.0), 2),
        ]);

        let movements = extract_movements(&objects, 1.0, radius(), &[], None);

        assert_eq!(movements.len(), 3);
        assert!(movements[1].ends_on_slider);
        assert!(movements[1].cheesable_ratio >= 0.0);
        assert_eq!(movements[2], Movement::empty(0.3));
    }

    #[test]
    fn hidden_increases_distance() {
        let objects = objects(&[
            HitObject::circle(Pos::new(0.0, 0.0), 0.0),
            HitObject::circle(Pos::new(200.0, 0.0), 250.0),
            HitObject::circle(Pos::new(200.0, 200.0), 500.0),
        ]);

        let densities = [1.0, 2.0, 1.5];
        let plain = extract_movements(&objects, 1.0, radius(), &[], None);
        let hidden = extract_movements(&objects, 1.0, radius(), &[], Some(&densities));

        for (plain, hidden) in plain.iter().zip(hidden.iter()).skip(1) {
            assert!(hidden.distance > plain.distance);
        }
    }

    #[test]
    fn stacked_notes_have_no_distance() {
        let objects = objects(&[
            HitObject::circle(Pos::new(100.0, 100.0), 0.0),
            HitObject::circle(Pos::new(100.0, 100.0), 200.0),
        ]);

        let movements = extract_movements(&objects, 1.0, radius(), &[], None);

        assert_eq!(movements[1].distance, 0.0);
        assert_eq!(movements[1].cheesability, 0.0);
        assert_eq!(movements[1].index_of_performance, 0.0);
    }

    proptest! {
        #[test]
        fn non_negative_distances(
            notes in prop::collection::vec((0.0..512.0_f64, 0.0..384.0_f64, 20.0..600.0_f64), 2..40),
            clock_rate in 0.75..1.5_f64,
        ) {
            let mut time = 0.0;

            let hit_objects: Vec<_> = notes
                .iter()
                .map(|&(x, y, delta)| {
                    time += delta;

                    OsuObject::new(&HitObject::circle(Pos::new(x, y), time))
                })
                .collect();

            let densities = vec![1.0; hit_objects.len()];

            for densities in [None, Some(densities.as_slice())] {
                let movements = extract_movements(&hit_objects, clock_rate, radius(), &[], densities);

                prop_assert_eq!(movements.len(), hit_objects.len());

                for movement in movements {
                    prop_assert!(movement.distance >= 0.0);
                    prop_assert!(movement.movement_time > 0.0);
                    prop_assert!(movement.raw_movement_time >= 0.0);
                    prop_assert!((0.0..=1.0).contains(&movement.cheesability));
                }
            }
        }
    }
}
