use crate::util::special_functions::{erf, exp2};

/// Index of performance of a movement, i.e. its difficulty.
pub fn index_of_performance(distance: f64, movement_time: f64) -> f64 {
    (distance + 1.0).log2() / (movement_time + 1e-10)
}

/// Probability that a target at normalized `distance` is hit within
/// `movement_time` seconds by a player of the given throughput.
pub fn hit_probability(distance: f64, movement_time: f64, throughput: f64) -> f64 {
    if distance == 0.0 || movement_time * throughput > 50.0 {
        return 1.0;
    }

    let movement_time = movement_time.max(0.03);

    erf(2.066 / distance * (exp2(movement_time * throughput) - 1.0) / std::f64::consts::SQRT_2)
}
