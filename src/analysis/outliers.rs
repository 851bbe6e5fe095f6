/// Parameters for the modified z-score outlier test.
#[derive(Debug, Clone)]
pub struct OutlierParams {
    /// Points whose modified z-score exceeds this are flagged.
    pub threshold: f64,
    /// Compatibility switch: compute median/MAD only over points with at
    /// least one non-zero component, as one lineage of the historical
    /// implementation did. All points are still scored against the
    /// statistic. Off by default.
    pub exclude_zeros: bool,
}

impl Default for OutlierParams {
    fn default() -> Self {
        Self {
            threshold: 3.5,
            exclude_zeros: false,
        }
    }
}

/// Flag statistical outliers in a scalar series.
///
/// Modified z-score after Iglewicz & Hoaglin: 0.6745 times the distance
/// from the median, divided by the median absolute deviation. When the MAD
/// is zero (all points identical) nothing is flagged.
pub fn is_outlier(points: &[f64], params: &OutlierParams) -> Vec<bool> {
    let pts: Vec<[f64; 1]> = points.iter().map(|&p| [p]).collect();
    outlier_mask(&pts, params)
}

/// Flag statistical outliers in a series of 2-D points, using the
/// Euclidean distance from the component-wise median.
pub fn is_outlier_pairs(points: &[[f64; 2]], params: &OutlierParams) -> Vec<bool> {
    outlier_mask(points, params)
}

fn outlier_mask<const D: usize>(points: &[[f64; D]], params: &OutlierParams) -> Vec<bool> {
    if points.is_empty() {
        return Vec::new();
    }

    let stat_indices: Vec<usize> = if params.exclude_zeros {
        points
            .iter()
            .enumerate()
            .filter(|(_, p)| p.iter().any(|&c| c != 0.0))
            .map(|(i, _)| i)
            .collect()
    } else {
        (0..points.len()).collect()
    };
    if stat_indices.is_empty() {
        return vec![false; points.len()];
    }

    let mut center = [0.0; D];
    for (d, c) in center.iter_mut().enumerate() {
        let mut column: Vec<f64> = stat_indices.iter().map(|&i| points[i][d]).collect();
        *c = median(&mut column);
    }

    let distances: Vec<f64> = points
        .iter()
        .map(|p| {
            p.iter()
                .zip(center.iter())
                .map(|(a, b)| (a - b) * (a - b))
                .sum::<f64>()
                .sqrt()
        })
        .collect();

    let mut stat_distances: Vec<f64> = stat_indices.iter().map(|&i| distances[i]).collect();
    let mad = median(&mut stat_distances);
    if mad == 0.0 {
        // All participating points are identical; nothing to flag.
        return vec![false; points.len()];
    }

    distances
        .iter()
        .map(|&d| 0.6745 * d / mad > params.threshold)
        .collect()
}

/// Median with midpoint interpolation for even-length input. Sorts the
/// slice in place.
fn median(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.total_cmp(b));
    let n = values.len();
    if n % 2 == 1 {
        values[n / 2]
    } else {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    }
}

/// Drop coordinate pairs with any non-finite component. Coarse pre-filter
/// applied before geometry or statistics, distinct from the z-score test.
pub fn finite_coords(coords: &[[f64; 2]]) -> Vec<[f64; 2]> {
    coords
        .iter()
        .copied()
        .filter(|c| (c[0] + c[1]).is_finite())
        .collect()
}
