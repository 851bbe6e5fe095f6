use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use super::connection::Database;
use super::helpers::{finite_or_null, null_as_nan, parse_datetime, parse_sport};
use super::records::insert_record;
use crate::models::{Activity, Record, TrackSeries};

fn insert_activity_row(conn: &Connection, activity: &Activity) -> Result<()> {
    conn.execute(
        "INSERT INTO activities (id, sport, start_time, distance_m, duration_s,
                                 calories, heartrate_bpm, filetype, has_track)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            activity.id,
            activity.sport.as_str(),
            activity.start_time.to_rfc3339(),
            activity.distance_m,
            activity.duration_s,
            activity.calories,
            activity.heartrate_bpm,
            activity.filetype,
            activity.has_track(),
        ],
    )
    .with_context(|| "failed to insert activity")?;
    Ok(())
}

fn insert_trackpoints(conn: &Connection, activity_id: &str, series: &TrackSeries) -> Result<()> {
    let mut stmt = conn.prepare(
        "INSERT INTO trackpoints (activity_id, seq, timestamp_s, latitude_rad,
                                  longitude_rad, altitude_m, heartrate_bpm, velocity_mps)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )?;
    for i in 0..series.len() {
        stmt.execute(params![
            activity_id,
            i as i64,
            series.timestamps[i],
            finite_or_null(series.coords[i][0]),
            finite_or_null(series.coords[i][1]),
            finite_or_null(series.altitudes[i]),
            finite_or_null(series.heartrates[i]),
            finite_or_null(series.velocities[i]),
        ])
        .with_context(|| format!("failed to insert trackpoint {i}"))?;
    }
    Ok(())
}

fn load_series(conn: &Connection, activity_id: &str) -> Result<TrackSeries> {
    let mut stmt = conn.prepare(
        "SELECT timestamp_s, latitude_rad, longitude_rad, altitude_m,
                heartrate_bpm, velocity_mps
         FROM trackpoints
         WHERE activity_id = ?1
         ORDER BY seq ASC",
    )?;

    let mut timestamps = Vec::new();
    let mut coords = Vec::new();
    let mut altitudes = Vec::new();
    let mut heartrates = Vec::new();
    let mut velocities = Vec::new();

    let mut rows = stmt.query(params![activity_id])?;
    while let Some(row) = rows.next()? {
        timestamps.push(row.get::<_, f64>(0)?);
        coords.push([
            null_as_nan(row.get(1)?),
            null_as_nan(row.get(2)?),
        ]);
        altitudes.push(null_as_nan(row.get(3)?));
        heartrates.push(null_as_nan(row.get(4)?));
        velocities.push(null_as_nan(row.get(5)?));
    }

    TrackSeries::new(timestamps, coords, altitudes, heartrates, velocities)
}

fn row_to_activity(
    conn: &Connection,
    row: &rusqlite::Row<'_>,
) -> Result<Activity> {
    let id: String = row.get(0)?;
    let has_track: bool = row.get(8)?;
    let series = if has_track {
        Some(load_series(conn, &id)?)
    } else {
        None
    };
    Ok(Activity {
        id,
        sport: parse_sport(&row.get::<_, String>(1)?)?,
        start_time: parse_datetime(&row.get::<_, String>(2)?, "start_time")?,
        distance_m: row.get(3)?,
        duration_s: row.get(4)?,
        calories: row.get(5)?,
        heartrate_bpm: row.get(6)?,
        filetype: row.get(7)?,
        series,
    })
}

const ACTIVITY_COLUMNS: &str = "id, sport, start_time, distance_m, duration_s,
                                calories, heartrate_bpm, filetype, has_track";

impl Database {
    /// Insert an activity, its trackpoints, and its derived record rows in
    /// a single transaction.
    pub async fn ingest_activity(&self, activity: Activity, records: Vec<Record>) -> Result<()> {
        self.execute(move |conn| {
            let tx = conn.transaction()?;
            insert_activity_row(&tx, &activity)?;
            if let Some(series) = &activity.series {
                insert_trackpoints(&tx, &activity.id, series)?;
            }
            for record in &records {
                insert_record(&tx, record)?;
            }
            tx.commit()?;
            Ok(())
        })
        .await
    }

    /// Replace an activity's metadata, series, and derived records.
    pub async fn update_activity(&self, activity: Activity, records: Vec<Record>) -> Result<()> {
        self.execute(move |conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "UPDATE activities
                 SET sport = ?1, start_time = ?2, distance_m = ?3, duration_s = ?4,
                     calories = ?5, heartrate_bpm = ?6, filetype = ?7, has_track = ?8
                 WHERE id = ?9",
                params![
                    activity.sport.as_str(),
                    activity.start_time.to_rfc3339(),
                    activity.distance_m,
                    activity.duration_s,
                    activity.calories,
                    activity.heartrate_bpm,
                    activity.filetype,
                    activity.has_track(),
                    activity.id,
                ],
            )
            .with_context(|| "failed to update activity")?;
            tx.execute(
                "DELETE FROM trackpoints WHERE activity_id = ?1",
                params![activity.id],
            )?;
            if let Some(series) = &activity.series {
                insert_trackpoints(&tx, &activity.id, series)?;
            }
            tx.execute(
                "DELETE FROM records WHERE activity_id = ?1",
                params![activity.id],
            )?;
            for record in &records {
                insert_record(&tx, record)?;
            }
            tx.commit()?;
            Ok(())
        })
        .await
    }

    pub async fn get_activity(&self, activity_id: &str) -> Result<Option<Activity>> {
        let activity_id = activity_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {ACTIVITY_COLUMNS} FROM activities WHERE id = ?1"
            ))?;
            let mut rows = stmt.query(params![activity_id])?;
            match rows.next()? {
                Some(row) => {
                    let activity = row_to_activity(conn, row)?;
                    Ok(Some(activity))
                }
                None => Ok(None),
            }
        })
        .await
    }

    /// All activities, most recent first, with their series loaded.
    pub async fn list_activities(&self) -> Result<Vec<Activity>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {ACTIVITY_COLUMNS} FROM activities ORDER BY start_time DESC"
            ))?;
            let mut rows = stmt.query([])?;
            let mut activities = Vec::new();
            while let Some(row) = rows.next()? {
                activities.push(row_to_activity(conn, row)?);
            }
            Ok(activities)
        })
        .await
    }

    /// Activities whose start time lies in `[start, end)`, ascending.
    pub async fn activities_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Activity>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {ACTIVITY_COLUMNS} FROM activities
                 WHERE start_time >= ?1 AND start_time < ?2
                 ORDER BY start_time ASC"
            ))?;
            let mut rows = stmt.query(params![start.to_rfc3339(), end.to_rfc3339()])?;
            let mut activities = Vec::new();
            while let Some(row) = rows.next()? {
                activities.push(row_to_activity(conn, row)?);
            }
            Ok(activities)
        })
        .await
    }

    /// Delete an activity; trackpoints and its record rows cascade.
    pub async fn delete_activity(&self, activity_id: &str) -> Result<()> {
        let activity_id = activity_id.to_string();
        self.execute(move |conn| {
            conn.execute("DELETE FROM activities WHERE id = ?1", params![activity_id])
                .with_context(|| "failed to delete activity")?;
            Ok(())
        })
        .await
    }
}
