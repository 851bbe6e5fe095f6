use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::info;

use crate::config::Config;
use crate::db::Database;
use crate::models::{Activity, PersonalBest, Record, Sport, TrackSeries};

/// Application service: owns the database and the sport configuration and
/// maintains the record ledger as activities come and go.
pub struct Service {
    db: Database,
    config: Config,
}

impl Service {
    /// Open (or create) the training log under `base_dir`. Reads sport
    /// configuration overrides from `config.json` next to the database and
    /// seeds the record sentinels on first use.
    pub async fn open(base_dir: &Path) -> Result<Self> {
        let config = Config::load_or_default(&base_dir.join("config.json"))?;
        Self::open_with_config(base_dir.join("stride.sqlite3"), config).await
    }

    pub async fn open_with_config(db_path: PathBuf, config: Config) -> Result<Self> {
        let db = Database::new(db_path)?;
        let seeds: Vec<Record> = config
            .record_distances
            .sports()
            .flat_map(|(sport, distances)| {
                distances
                    .iter()
                    .map(move |&distance_m| Record::seed(sport, distance_m))
            })
            .collect();
        db.seed_records(seeds).await?;
        Ok(Self { db, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    fn derive_records(&self, activity: &Activity) -> Vec<Record> {
        self.config
            .record_distances
            .for_sport(activity.sport)
            .iter()
            .map(|&distance_m| activity.record_candidate(&self.config, distance_m))
            .collect()
    }

    /// Ingest one activity: the activity, its trackpoints, and one record
    /// row per canonical distance of its sport land atomically.
    pub async fn add_activity(&self, activity: Activity) -> Result<String> {
        let activity_id = activity.id.clone();
        let records = self.derive_records(&activity);
        info!(
            "Ingesting {} activity {} ({:.0} m, {} record candidates)",
            activity.sport.as_str(),
            activity_id,
            activity.distance_m,
            records.len()
        );
        self.db.ingest_activity(activity, records).await?;
        Ok(activity_id)
    }

    /// Add an activity from manually entered metadata, without a track.
    pub async fn add_manual_activity(
        &self,
        sport: Sport,
        start_time: DateTime<Utc>,
        distance_m: f64,
        duration_s: f64,
    ) -> Result<String> {
        self.add_activity(Activity::new(sport, start_time, distance_m, duration_s))
            .await
    }

    /// Attach or replace an activity's track series and update its derived
    /// records.
    pub async fn set_activity_series(&self, activity_id: &str, series: TrackSeries) -> Result<()> {
        let activity = self
            .db
            .get_activity(activity_id)
            .await?
            .with_context(|| format!("no activity with id {activity_id}"))?;
        self.update_activity(activity.with_series(series)).await
    }

    /// Persist edited metadata and re-derive the activity's records.
    pub async fn update_activity(&self, activity: Activity) -> Result<()> {
        let records = self.derive_records(&activity);
        self.db.update_activity(activity, records).await
    }

    pub async fn get_activity(&self, activity_id: &str) -> Result<Option<Activity>> {
        self.db.get_activity(activity_id).await
    }

    pub async fn list_activities(&self) -> Result<Vec<Activity>> {
        self.db.list_activities().await
    }

    /// Activities starting within `[start, end)`.
    pub async fn activities_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Activity>> {
        self.db.activities_between(start, end).await
    }

    /// Delete an activity; its trackpoints and record rows go with it.
    pub async fn delete_activity(&self, activity_id: &str) -> Result<()> {
        info!("Deleting activity {activity_id}");
        self.db.delete_activity(activity_id).await
    }

    /// Current personal bests per (sport, canonical distance), +inf while
    /// no activity reached a distance.
    pub async fn list_records(&self) -> Result<Vec<PersonalBest>> {
        self.db.list_personal_bests().await
    }

    /// Best splits of one activity over its sport's canonical distances.
    pub async fn best_splits(&self, activity_id: &str) -> Result<Vec<Record>> {
        self.db.records_for_activity(activity_id).await
    }

    /// Soft-delete a record, e.g. one produced by a mislabeled activity,
    /// without deleting the activity itself.
    pub async fn invalidate_record(&self, record_id: &str) -> Result<()> {
        self.db.invalidate_record(record_id).await
    }
}
