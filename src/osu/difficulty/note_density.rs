use std::collections::VecDeque;

use crate::osu::object::OsuObject;

/// Note density at every object.
///
/// Each object within `preempt` milliseconds of the current object
/// contributes `1 - |Δt| / preempt`.
pub fn note_densities(hit_objects: &[OsuObject], preempt: f64) -> Vec<f64> {
    let mut densities = Vec::with_capacity(hit_objects.len());
    let mut window = VecDeque::new();
    let mut next = 0;

    for h in hit_objects {
        let time = h.start_time;

        while next < hit_objects.len() && hit_objects[next].start_time < time + preempt {
            window.push_back(hit_objects[next].start_time);
            next += 1;
        }

        while window.front().is_some_and(|&start| start < time - preempt) {
            window.pop_front();
        }

        let density: f64 = window
            .iter()
            .map(|start| 1.0 - (start - time).abs() / preempt)
            .sum();

        densities.push(density);
    }

    densities
}
