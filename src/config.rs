use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::Sport;

/// Per-sport velocity ceilings in m/s. Samples above the ceiling are treated
/// as sensor glitches, not as a claim about humanly possible speeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VelocityLimits {
    pub swimming: f64,
    pub running: f64,
    pub cycling: f64,
    pub racecycling: f64,
    pub default: f64,
}

impl Default for VelocityLimits {
    fn default() -> Self {
        Self {
            swimming: 5.0,
            running: 18.0,
            cycling: 30.0,
            racecycling: 30.0,
            default: 50.0,
        }
    }
}

impl VelocityLimits {
    pub fn for_sport(&self, sport: Sport) -> f64 {
        match sport {
            Sport::Swimming => self.swimming,
            Sport::Running => self.running,
            Sport::Cycling => self.cycling,
            Sport::RaceCycling => self.racecycling,
            Sport::Other => self.default,
        }
    }
}

/// Reference distances in meters for pace display: swimming paces are
/// reported per 100 m, everything else per kilometer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaceDistances {
    pub swimming: f64,
    pub other: f64,
}

impl Default for PaceDistances {
    fn default() -> Self {
        Self {
            swimming: 100.0,
            other: 1000.0,
        }
    }
}

impl PaceDistances {
    pub fn for_sport(&self, sport: Sport) -> f64 {
        match sport {
            Sport::Swimming => self.swimming,
            _ => self.other,
        }
    }
}

/// Canonical distances in meters for which personal bests are tracked.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordDistances {
    pub running: Vec<f64>,
    pub swimming: Vec<f64>,
    pub racecycling: Vec<f64>,
}

impl Default for RecordDistances {
    fn default() -> Self {
        Self {
            running: vec![
                400.0, 800.0, 1000.0, 1500.0, 5000.0, 10000.0, 21097.5, 42195.0,
            ],
            swimming: vec![50.0, 100.0, 200.0, 400.0, 800.0, 1500.0],
            racecycling: vec![1000.0, 20000.0, 40000.0, 90000.0, 180000.0],
        }
    }
}

impl RecordDistances {
    /// Sports without canonical distances track no records.
    pub fn for_sport(&self, sport: Sport) -> &[f64] {
        match sport {
            Sport::Running => &self.running,
            Sport::Swimming => &self.swimming,
            Sport::RaceCycling => &self.racecycling,
            _ => &[],
        }
    }

    pub fn sports(&self) -> impl Iterator<Item = (Sport, &[f64])> {
        [
            (Sport::Running, self.running.as_slice()),
            (Sport::Swimming, self.swimming.as_slice()),
            (Sport::RaceCycling, self.racecycling.as_slice()),
        ]
        .into_iter()
    }
}

/// Configuration consumed by the analysis functions and the record ledger.
///
/// Passed explicitly into every core function so tests can override single
/// tables without ambient state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub max_velocity: VelocityLimits,
    pub pace_distance: PaceDistances,
    pub record_distances: RecordDistances,
}

impl Config {
    /// Load overrides from a JSON file, falling back to the defaults when
    /// the file does not exist. Unknown sports in the file are rejected by
    /// serde; missing fields keep their defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse config from {}", path.display()))
    }
}
