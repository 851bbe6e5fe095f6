use chrono::{Duration, TimeZone, Utc};
use tempfile::TempDir;

use stride::config::Config;
use stride::models::{Activity, Sport, TrackSeries};
use stride::Service;

fn constant_series(n: usize, velocity_mps: f64) -> TrackSeries {
    let timestamps: Vec<f64> = (0..n).map(|t| t as f64).collect();
    TrackSeries::new(
        timestamps,
        vec![[0.9, 0.15]; n],
        vec![10.0; n],
        vec![140.0; n],
        vec![velocity_mps; n],
    )
    .unwrap()
}

async fn open_service(dir: &TempDir) -> Service {
    Service::open_with_config(dir.path().join("test.sqlite3"), Config::default())
        .await
        .unwrap()
}

#[tokio::test]
async fn fresh_database_reports_infinite_seeds() {
    let dir = TempDir::new().unwrap();
    let service = open_service(&dir).await;

    let bests = service.list_records().await.unwrap();
    // 8 running + 6 swimming + 5 race-cycling canonical distances.
    assert_eq!(bests.len(), 19);
    for best in &bests {
        assert!(best.time_s.is_infinite());
        assert!(best.activity_id.is_none());
    }
}

#[tokio::test]
async fn ingestion_derives_personal_bests() {
    let dir = TempDir::new().unwrap();
    let service = open_service(&dir).await;

    // One hour at 2.5 m/s covers 9 km; the metadata claims a slow 7200 s,
    // so the track decides the short-distance records.
    let start = Utc.with_ymd_and_hms(2024, 5, 4, 8, 0, 0).unwrap();
    let activity = Activity::new(Sport::Running, start, 9000.0, 7200.0)
        .with_series(constant_series(3601, 2.5));
    let id = service.add_activity(activity).await.unwrap();

    let bests = service.list_records().await.unwrap();
    let best_1k = bests
        .iter()
        .find(|b| b.sport == Sport::Running && b.distance_m == 1000.0)
        .unwrap();
    // Sliding window needs to strictly exceed 1000 m: 401 s at 1 Hz.
    assert!((best_1k.time_s - 401.0).abs() < 1e-9);
    assert_eq!(best_1k.activity_id.as_deref(), Some(id.as_str()));

    let marathon = bests
        .iter()
        .find(|b| b.sport == Sport::Running && b.distance_m == 42195.0)
        .unwrap();
    assert!(marathon.time_s.is_infinite());

    // Swimming records are untouched by a running activity.
    assert!(bests
        .iter()
        .filter(|b| b.sport == Sport::Swimming)
        .all(|b| b.time_s.is_infinite()));
}

#[tokio::test]
async fn metadata_only_activity_sets_estimates() {
    let dir = TempDir::new().unwrap();
    let service = open_service(&dir).await;

    let start = Utc.with_ymd_and_hms(2024, 5, 5, 9, 0, 0).unwrap();
    service
        .add_manual_activity(Sport::Running, start, 10_000.0, 2400.0)
        .await
        .unwrap();

    let bests = service.list_records().await.unwrap();
    let best_1k = bests
        .iter()
        .find(|b| b.sport == Sport::Running && b.distance_m == 1000.0)
        .unwrap();
    assert!((best_1k.time_s - 240.0).abs() < 1e-9);

    // Distances the activity never covered stay at the seed sentinel.
    let half = bests
        .iter()
        .find(|b| b.sport == Sport::Running && b.distance_m == 21097.5)
        .unwrap();
    assert!(half.time_s.is_infinite());
}

#[tokio::test]
async fn double_ingestion_is_idempotent_at_read_time() {
    let dir = TempDir::new().unwrap();
    let service = open_service(&dir).await;

    let start = Utc.with_ymd_and_hms(2024, 5, 6, 7, 0, 0).unwrap();
    for _ in 0..2 {
        let activity = Activity::new(Sport::Running, start, 9000.0, 3600.0)
            .with_series(constant_series(3601, 2.5));
        service.add_activity(activity).await.unwrap();
    }

    let bests = service.list_records().await.unwrap();
    let best_1k = bests
        .iter()
        .find(|b| b.sport == Sport::Running && b.distance_m == 1000.0)
        .unwrap();
    // Identical derived rows: the minimum is unchanged by the duplicate.
    assert!((best_1k.time_s - 400.0).abs() < 1e-9);
}

#[tokio::test]
async fn track_gaps_survive_a_round_trip() {
    let dir = TempDir::new().unwrap();
    let service = open_service(&dir).await;

    let mut series = constant_series(600, 2.5);
    series.velocities[300] = f64::NAN;
    series.heartrates[10] = f64::NAN;

    let start = Utc.with_ymd_and_hms(2024, 5, 7, 18, 30, 0).unwrap();
    let activity = Activity::new(Sport::Running, start, 1500.0, 600.0).with_series(series);
    let id = service.add_activity(activity).await.unwrap();

    let loaded = service.get_activity(&id).await.unwrap().unwrap();
    let series = loaded.series.expect("series should round-trip");
    assert_eq!(series.len(), 600);
    assert!(series.velocities[300].is_nan());
    assert!(series.heartrates[10].is_nan());
    assert_eq!(series.velocities[299], 2.5);
}

#[tokio::test]
async fn deleting_an_activity_restores_the_seed() {
    let dir = TempDir::new().unwrap();
    let service = open_service(&dir).await;

    let start = Utc.with_ymd_and_hms(2024, 5, 8, 6, 0, 0).unwrap();
    let id = service
        .add_manual_activity(Sport::Running, start, 10_000.0, 2400.0)
        .await
        .unwrap();

    service.delete_activity(&id).await.unwrap();

    assert!(service.get_activity(&id).await.unwrap().is_none());
    assert!(service.best_splits(&id).await.unwrap().is_empty());

    let bests = service.list_records().await.unwrap();
    let best_1k = bests
        .iter()
        .find(|b| b.sport == Sport::Running && b.distance_m == 1000.0)
        .unwrap();
    assert!(best_1k.time_s.is_infinite());
    assert!(best_1k.activity_id.is_none());
}

#[tokio::test]
async fn invalidated_record_keeps_the_activity() {
    let dir = TempDir::new().unwrap();
    let service = open_service(&dir).await;

    let start = Utc.with_ymd_and_hms(2024, 5, 9, 6, 0, 0).unwrap();
    let id = service
        .add_manual_activity(Sport::Running, start, 10_000.0, 2400.0)
        .await
        .unwrap();

    let splits = service.best_splits(&id).await.unwrap();
    let record_1k = splits.iter().find(|r| r.distance_m == 1000.0).unwrap();
    service.invalidate_record(&record_1k.id).await.unwrap();

    let bests = service.list_records().await.unwrap();
    let best_1k = bests
        .iter()
        .find(|b| b.sport == Sport::Running && b.distance_m == 1000.0)
        .unwrap();
    assert!(best_1k.time_s.is_infinite());

    // Other distances of the same activity are untouched.
    let best_5k = bests
        .iter()
        .find(|b| b.sport == Sport::Running && b.distance_m == 5000.0)
        .unwrap();
    assert!((best_5k.time_s - 1200.0).abs() < 1e-9);
    assert!(service.get_activity(&id).await.unwrap().is_some());
}

#[tokio::test]
async fn attaching_a_series_improves_the_record() {
    let dir = TempDir::new().unwrap();
    let service = open_service(&dir).await;

    let start = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
    let id = service
        .add_manual_activity(Sport::Running, start, 3000.0, 1800.0)
        .await
        .unwrap();

    // Metadata alone estimates 600 s for 1000 m.
    let splits = service.best_splits(&id).await.unwrap();
    let before = splits.iter().find(|r| r.distance_m == 1000.0).unwrap();
    assert!((before.time_s - 600.0).abs() < 1e-9);

    // The uploaded track shows 5 m/s, i.e. 201 s for a strict kilometer.
    service
        .set_activity_series(&id, constant_series(601, 5.0))
        .await
        .unwrap();

    let splits = service.best_splits(&id).await.unwrap();
    let after = splits.iter().find(|r| r.distance_m == 1000.0).unwrap();
    assert!((after.time_s - 201.0).abs() < 1e-9);
}

#[tokio::test]
async fn activities_between_filters_by_start_time() {
    let dir = TempDir::new().unwrap();
    let service = open_service(&dir).await;

    let monday = Utc.with_ymd_and_hms(2024, 5, 13, 8, 0, 0).unwrap();
    let wednesday = Utc.with_ymd_and_hms(2024, 5, 15, 8, 0, 0).unwrap();
    service
        .add_manual_activity(Sport::Running, monday, 5000.0, 1500.0)
        .await
        .unwrap();
    service
        .add_manual_activity(Sport::Cycling, wednesday, 20_000.0, 2400.0)
        .await
        .unwrap();

    let tuesday = monday + Duration::days(1);
    let in_range = service.activities_between(monday, tuesday).await.unwrap();
    assert_eq!(in_range.len(), 1);
    assert_eq!(in_range[0].sport, Sport::Running);

    let all = service.list_activities().await.unwrap();
    assert_eq!(all.len(), 2);
    // Most recent first.
    assert_eq!(all[0].sport, Sport::Cycling);
}
