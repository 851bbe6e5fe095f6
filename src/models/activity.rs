use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::segments::fastest_segment;
use crate::config::Config;
use crate::models::Record;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    Swimming,
    Running,
    Cycling,
    RaceCycling,
    Other,
}

impl Sport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sport::Swimming => "swimming",
            Sport::Running => "running",
            Sport::Cycling => "cycling",
            Sport::RaceCycling => "racecycling",
            Sport::Other => "other",
        }
    }

    pub fn from_str(value: &str) -> Result<Self> {
        match value {
            "swimming" => Ok(Sport::Swimming),
            "running" => Ok(Sport::Running),
            "cycling" => Ok(Sport::Cycling),
            "racecycling" => Ok(Sport::RaceCycling),
            "other" => Ok(Sport::Other),
            _ => bail!("unknown sport '{value}'"),
        }
    }
}

/// Time-ordered sample series of an activity.
///
/// All arrays share the same length and sample index. Units are fixed by
/// the loaders: seconds for timestamps, m/s for velocities, radians for
/// coordinates, meters for altitudes. Velocity at index i describes travel
/// between samples i-1 and i; the first entry is a sentinel that distance
/// accumulation skips. Non-finite values mark sensor dropouts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackSeries {
    pub timestamps: Vec<f64>,
    pub coords: Vec<[f64; 2]>,
    pub altitudes: Vec<f64>,
    pub heartrates: Vec<f64>,
    pub velocities: Vec<f64>,
}

impl TrackSeries {
    pub fn new(
        timestamps: Vec<f64>,
        coords: Vec<[f64; 2]>,
        altitudes: Vec<f64>,
        heartrates: Vec<f64>,
        velocities: Vec<f64>,
    ) -> Result<Self> {
        let n = timestamps.len();
        for (name, len) in [
            ("coords", coords.len()),
            ("altitudes", altitudes.len()),
            ("heartrates", heartrates.len()),
            ("velocities", velocities.len()),
        ] {
            if len != n {
                bail!("track series length mismatch: {name} has {len} samples, expected {n}");
            }
        }
        Ok(Self {
            timestamps,
            coords,
            altitudes,
            heartrates,
            velocities,
        })
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// One recorded exercise session. Metadata-only activities (manually
/// entered results) carry no series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub sport: Sport,
    pub start_time: DateTime<Utc>,
    pub distance_m: f64,
    pub duration_s: f64,
    pub calories: Option<f64>,
    pub heartrate_bpm: Option<f64>,
    pub filetype: String,
    pub series: Option<TrackSeries>,
}

impl Activity {
    pub fn new(sport: Sport, start_time: DateTime<Utc>, distance_m: f64, duration_s: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sport,
            start_time,
            distance_m,
            duration_s,
            calories: None,
            heartrate_bpm: None,
            filetype: "tcx".into(),
            series: None,
        }
    }

    pub fn with_series(mut self, series: TrackSeries) -> Self {
        self.series = Some(series);
        self
    }

    pub fn has_track(&self) -> bool {
        self.series.is_some()
    }

    /// Linear estimate of the time for `distance_m` from the scalar
    /// metadata alone. Only valid when the activity covered at least the
    /// requested distance; +inf otherwise.
    fn metadata_record_s(&self, distance_m: f64) -> f64 {
        if self.distance_m >= distance_m {
            let ratio = self.distance_m / distance_m;
            self.duration_s / ratio
        } else {
            f64::INFINITY
        }
    }

    /// Best known time of this activity for a canonical distance: the
    /// minimum of the metadata estimate and, when a series exists, the
    /// fastest contiguous segment.
    pub fn record_candidate(&self, config: &Config, distance_m: f64) -> Record {
        let mut time_s = self.metadata_record_s(distance_m);
        if let Some(series) = &self.series {
            let segment_s = fastest_segment(
                self.sport,
                &series.timestamps,
                &series.velocities,
                distance_m,
                config,
            );
            time_s = time_s.min(segment_s);
        }
        Record::for_activity(self.sport, distance_m, time_s, &self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_activity(distance_m: f64, duration_s: f64) -> Activity {
        Activity::new(Sport::Running, Utc::now(), distance_m, duration_s)
    }

    #[test]
    fn series_rejects_length_mismatch() {
        let err = TrackSeries::new(
            vec![0.0, 1.0],
            vec![[0.0, 0.0], [0.0, 0.0]],
            vec![0.0, 0.0],
            vec![0.0, 0.0],
            vec![0.0],
        )
        .unwrap_err();
        assert!(err.to_string().contains("velocities"));
    }

    #[test]
    fn metadata_estimate_scales_linearly() {
        let activity = base_activity(10000.0, 3000.0);
        let record = activity.record_candidate(&Config::default(), 5000.0);
        assert!((record.time_s - 1500.0).abs() < 1e-9);
    }

    #[test]
    fn metadata_estimate_is_infinite_for_longer_target() {
        let activity = base_activity(3000.0, 1000.0);
        let record = activity.record_candidate(&Config::default(), 5000.0);
        assert!(record.time_s.is_infinite());
    }

    #[test]
    fn series_beats_pessimistic_metadata() {
        // 600 s of metadata time for 1000 m, but the track shows a constant
        // 5 m/s, i.e. 200 s for the same distance.
        let n = 601;
        let timestamps: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let velocities = vec![5.0; n];
        let series = TrackSeries::new(
            timestamps,
            vec![[0.0, 0.0]; n],
            vec![0.0; n],
            vec![f64::NAN; n],
            velocities,
        )
        .unwrap();
        let activity = base_activity(3000.0, 1800.0).with_series(series);
        let record = activity.record_candidate(&Config::default(), 1000.0);
        assert!((record.time_s - 200.0).abs() < 1e-6);
    }
}
