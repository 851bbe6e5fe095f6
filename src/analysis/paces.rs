use crate::config::Config;
use crate::models::Sport;

/// Split length in meters for partitioning a total distance into a pace
/// table. Fixed policy, not sport-specific.
pub fn appropriate_partition(distance_m: f64) -> f64 {
    if distance_m < 5_000.0 {
        400.0
    } else if distance_m < 20_000.0 {
        1_000.0
    } else if distance_m < 40_000.0 {
        2_000.0
    } else if distance_m < 100_000.0 {
        5_000.0
    } else {
        10_000.0
    }
}

/// Pace table of an activity: one entry per complete split, as
/// (cumulative distance threshold in meters, time in seconds per the
/// sport's pace reference distance). The final partial split is excluded.
///
/// Samples above the sport's velocity ceiling (and non-finite ones) are
/// masked out; unlike the fastest-segment window there is no reset across
/// gaps, the remaining samples are simply concatenated.
pub fn paces(
    sport: Sport,
    timestamps: &[f64],
    velocities: &[f64],
    config: &Config,
) -> Vec<(f64, f64)> {
    let n = timestamps.len().min(velocities.len());
    let max_velocity = config.max_velocity.for_sport(sport);
    let pace_distance = config.pace_distance.for_sport(sport);

    // Cumulative distance and elapsed time over the masked series. The
    // comparison is written so NaN velocities fail it as well.
    let mut cum_dist = Vec::new();
    let mut cum_time = Vec::new();
    let mut dist = 0.0;
    let mut time = 0.0;
    for t in 1..n {
        let v = velocities[t];
        if !(v <= max_velocity) {
            continue;
        }
        let dt = timestamps[t] - timestamps[t - 1];
        dist += v * dt;
        time += dt;
        cum_dist.push(dist);
        cum_time.push(time);
    }

    let total = match cum_dist.last() {
        Some(&total) => total,
        None => return Vec::new(),
    };

    let split = appropriate_partition(total);
    let mut table = Vec::new();
    let mut threshold = split;
    let mut last_time = 0.0;
    let mut idx = 0;
    while threshold < total {
        while cum_dist[idx] < threshold {
            idx += 1;
        }
        let split_time = cum_time[idx] - last_time;
        table.push((threshold, split_time / split * pace_distance));
        last_time = cum_time[idx];
        threshold += split;
    }
    table
}
