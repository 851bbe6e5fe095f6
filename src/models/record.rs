use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Sport;

/// One record row: the best time a single activity achieved for a canonical
/// distance. The current personal best per (sport, distance) is reduced at
/// read time over all valid rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub sport: Sport,
    pub distance_m: f64,
    pub time_s: f64,
    pub valid: bool,
    pub activity_id: Option<String>,
}

impl Record {
    /// Sentinel row seeded at database initialization so every configured
    /// (sport, distance) pair always reports a best, +inf until an activity
    /// lands.
    pub fn seed(sport: Sport, distance_m: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sport,
            distance_m,
            time_s: f64::INFINITY,
            valid: true,
            activity_id: None,
        }
    }

    pub fn for_activity(sport: Sport, distance_m: f64, time_s: f64, activity_id: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sport,
            distance_m,
            time_s,
            valid: true,
            activity_id: Some(activity_id.to_string()),
        }
    }
}

/// Read-time reduction of the record rows for one (sport, distance) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalBest {
    pub sport: Sport,
    pub distance_m: f64,
    pub time_s: f64,
    /// Activity that achieved the best, None while still at the seed
    /// sentinel.
    pub activity_id: Option<String>,
}
