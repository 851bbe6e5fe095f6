/// Overall elevation statistics of an activity: total gain, total loss,
/// and the average slope in percent (ignoring loss).
pub fn elevation_summary(altitudes: &[f64], total_distance_m: f64) -> (f64, f64, f64) {
    let mut gain = 0.0;
    let mut loss = 0.0;
    for pair in altitudes.windows(2) {
        let diff = pair[1] - pair[0];
        if diff > 0.0 {
            gain += diff;
        } else {
            loss -= diff;
        }
    }
    let slope_percent = 100.0 * gain / total_distance_m;
    (gain, loss, slope_percent)
}

/// Replace NaN runs with linear interpolation between the nearest finite
/// neighbors; leading and trailing runs are clamped to the nearest finite
/// value. Loader-side gap repair for heartrate and altitude channels.
pub fn interpolate_nan(values: &[f64]) -> Vec<f64> {
    let anchors: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .map(|(i, &v)| (i, v))
        .collect();
    if anchors.is_empty() {
        return values.to_vec();
    }

    let mut out = values.to_vec();
    for (i, value) in out.iter_mut().enumerate() {
        if !value.is_nan() {
            continue;
        }
        let next = anchors.partition_point(|&(idx, _)| idx < i);
        *value = if next == 0 {
            anchors[0].1
        } else if next == anchors.len() {
            anchors[next - 1].1
        } else {
            let (x0, y0) = anchors[next - 1];
            let (x1, y1) = anchors[next];
            y0 + (y1 - y0) * ((i - x0) as f64) / ((x1 - x0) as f64)
        };
    }
    out
}
