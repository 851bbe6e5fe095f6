use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use super::connection::Database;
use super::helpers::parse_sport;
use crate::models::{PersonalBest, Record};

pub(super) fn insert_record(conn: &Connection, record: &Record) -> Result<()> {
    conn.execute(
        "INSERT INTO records (id, sport, distance_m, time_s, valid, activity_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            record.id,
            record.sport.as_str(),
            record.distance_m,
            record.time_s,
            record.valid,
            record.activity_id,
        ],
    )
    .with_context(|| "failed to insert record")?;
    Ok(())
}

impl Database {
    /// Seed the +inf sentinel rows for every configured (sport, distance)
    /// pair. Runs once against a fresh database; later calls are no-ops.
    pub async fn seed_records(&self, seeds: Vec<Record>) -> Result<()> {
        self.execute(move |conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?;
            if count > 0 {
                return Ok(());
            }
            let tx = conn.transaction()?;
            for record in &seeds {
                insert_record(&tx, record)?;
            }
            tx.commit()?;
            Ok(())
        })
        .await
    }

    /// Current personal bests: minimum valid time per (sport, distance).
    /// SQLite's bare-column rule makes the non-aggregated columns come from
    /// the row that achieved the minimum.
    pub async fn list_personal_bests(&self) -> Result<Vec<PersonalBest>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(
                "SELECT sport, distance_m, MIN(time_s), activity_id
                 FROM records
                 WHERE valid = 1
                 GROUP BY sport, distance_m
                 ORDER BY sport, distance_m",
            )?;
            let mut rows = stmt.query([])?;
            let mut bests = Vec::new();
            while let Some(row) = rows.next()? {
                bests.push(PersonalBest {
                    sport: parse_sport(&row.get::<_, String>(0)?)?,
                    distance_m: row.get(1)?,
                    time_s: row.get(2)?,
                    activity_id: row.get(3)?,
                });
            }
            Ok(bests)
        })
        .await
    }

    /// The record rows one activity produced, ordered by distance. These
    /// are the activity's best splits over the canonical distances.
    pub async fn records_for_activity(&self, activity_id: &str) -> Result<Vec<Record>> {
        let activity_id = activity_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, sport, distance_m, time_s, valid, activity_id
                 FROM records
                 WHERE activity_id = ?1
                 ORDER BY distance_m ASC",
            )?;
            let mut rows = stmt.query(params![activity_id])?;
            let mut records = Vec::new();
            while let Some(row) = rows.next()? {
                records.push(Record {
                    id: row.get(0)?,
                    sport: parse_sport(&row.get::<_, String>(1)?)?,
                    distance_m: row.get(2)?,
                    time_s: row.get(3)?,
                    valid: row.get(4)?,
                    activity_id: row.get(5)?,
                });
            }
            Ok(records)
        })
        .await
    }

    /// Soft-delete a record without touching the activity that produced it.
    pub async fn invalidate_record(&self, record_id: &str) -> Result<()> {
        let record_id = record_id.to_string();
        self.execute(move |conn| {
            conn.execute(
                "UPDATE records SET valid = 0 WHERE id = ?1",
                params![record_id],
            )
            .with_context(|| "failed to invalidate record")?;
            Ok(())
        })
        .await
    }
}
