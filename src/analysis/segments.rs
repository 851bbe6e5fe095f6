use std::collections::VecDeque;

use crate::config::Config;
use crate::models::Sport;

/// Fastest time in seconds for covering `target_distance_m` anywhere in the
/// activity, +inf when no contiguous run reaches the distance.
///
/// Sliding window over a deque of per-step (distance, time) increments with
/// running sums: each sample enters and leaves the window at most once, so
/// the whole scan is amortized O(N). A non-finite velocity is a data gap
/// and resets the window (a segment never spans a gap); a velocity above
/// the sport's ceiling is a sensor glitch and is skipped without reset.
/// Velocity at index i covers travel since sample i-1; the first entry is
/// a sentinel and contributes nothing.
pub fn fastest_segment(
    sport: Sport,
    timestamps: &[f64],
    velocities: &[f64],
    target_distance_m: f64,
    config: &Config,
) -> f64 {
    let mut record = f64::INFINITY;
    let n = timestamps.len().min(velocities.len());
    if n < 2 {
        return record;
    }

    let max_velocity = config.max_velocity.for_sport(sport);
    let mut queue: VecDeque<(f64, f64)> = VecDeque::new();
    let mut queue_dist = 0.0;
    let mut queue_time = 0.0;

    for t in 1..n {
        let v = velocities[t];
        if !v.is_finite() {
            queue.clear();
            queue_dist = 0.0;
            queue_time = 0.0;
            continue;
        }
        if v > max_velocity {
            continue;
        }

        let dt = timestamps[t] - timestamps[t - 1];
        let dist = v * dt;
        queue.push_front((dist, dt));
        queue_dist += dist;
        queue_time += dt;

        // Shrink from the tail once the window covers the target; only a
        // strictly smaller time replaces the record (first minimum wins).
        while queue_dist > target_distance_m {
            if queue_time < record {
                record = queue_time;
            }
            match queue.pop_back() {
                Some((d, dt)) => {
                    queue_dist -= d;
                    queue_time -= dt;
                }
                None => break,
            }
        }
    }

    record
}
