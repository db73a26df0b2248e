use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use inmet_sync::error::Result;
use inmet_sync::models::{HourlyReading, Station};
use inmet_sync::processors::{planner, FixedClock, SyncEngine};
use inmet_sync::remote::StationDataClient;
use inmet_sync::storage::{MemoryStore, SqliteStore, SyncStore};
use std::sync::atomic::{AtomicUsize, Ordering};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn test_station() -> Station {
    Station::new(
        "A001".to_string(),
        "Brasilia".to_string(),
        "DF".to_string(),
        -15.789,
        -47.926,
        date(2020, 1, 1),
    )
}

fn fixture_reading(day: NaiveDate, hour: u32) -> HourlyReading {
    HourlyReading {
        station_code: "A001".to_string(),
        date: day,
        time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
        temp_min: Some(18.0 + hour as f64 * 0.1),
        temp_max: Some(22.0 + hour as f64 * 0.1),
        temp_inst: Some(20.0 + hour as f64 * 0.1),
        pressure_min: Some(884.0),
        pressure_max: Some(886.0),
        pressure_inst: Some(885.0),
        humidity_min: Some(40.0),
        humidity_max: Some(70.0),
        humidity_inst: Some(55.0),
        wind_speed: Some(2.0),
        wind_direction: Some(120.0),
        wind_gust: Some(6.0),
        radiation: if (6..18).contains(&hour) {
            Some(1200.0)
        } else {
            Some(-3.5)
        },
        dew_point_min: Some(12.0),
        dew_point_max: Some(14.0),
        dew_point_inst: Some(13.0),
        rain: Some(0.2),
    }
}

/// Serves a fixed two-day, 48-row fixture and counts how often it is asked.
struct FixtureClient {
    calls: AtomicUsize,
}

impl FixtureClient {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StationDataClient for FixtureClient {
    async fn fetch_window(
        &self,
        _station: &Station,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HourlyReading>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let mut readings = Vec::new();
        let mut day = start;
        while day <= end {
            for hour in 0..24 {
                readings.push(fixture_reading(day, hour));
            }
            day += chrono::Duration::days(1);
        }
        Ok(readings)
    }
}

#[test]
fn test_initial_backfill_plans_one_window() {
    let windows = planner::plan(date(2020, 1, 1), date(2020, 1, 2));
    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].start, date(2020, 1, 1));
    assert_eq!(windows[0].end, date(2020, 1, 2));
}

#[tokio::test]
async fn test_two_day_backfill_end_to_end() {
    let store = MemoryStore::new();
    let client = FixtureClient::new();
    let engine = SyncEngine::with_clock(client, &store, Box::new(FixedClock(date(2020, 1, 3))));

    let report = engine.sync_station(&test_station()).await.unwrap();

    assert_eq!(report.windows_planned, 1);
    assert_eq!(report.windows_fetched, 1);
    assert_eq!(report.hourly_written, 48);
    assert_eq!(report.daily_written, 2);

    assert_eq!(store.hourly_count(), 48);
    assert_eq!(store.daily_count(), 2);
    assert_eq!(store.max_daily_date("A001").unwrap(), Some(date(2020, 1, 2)));

    // Both days aggregated from complete 24-hour groups.
    let aggregates = store.daily_for("A001");
    for aggregate in &aggregates {
        assert!(aggregate.temp_min.is_some());
        assert!(aggregate.wind_speed_mean.is_some());
        // 12 daytime hours of 1200.0 each; negative readings are excluded.
        assert_eq!(aggregate.radiation_total, Some(14400.0));
        assert!((aggregate.rain_total.unwrap() - 4.8).abs() < 1e-9);
    }
}

#[tokio::test]
async fn test_rerun_is_idempotent() {
    let store = MemoryStore::new();
    let client = FixtureClient::new();
    let engine = SyncEngine::with_clock(&client, &store, Box::new(FixedClock(date(2020, 1, 3))));
    let station = test_station();

    engine.sync_station(&station).await.unwrap();
    let first_hourly = store.hourly_count();
    let first_daily = store.daily_count();

    let rerun = engine.sync_station(&station).await.unwrap();

    // Everything up to the target end is already covered, so the second run
    // plans nothing and never reaches the provider.
    assert_eq!(rerun.windows_planned, 0);
    assert_eq!(rerun.hourly_written, 0);
    assert_eq!(rerun.daily_written, 0);
    assert_eq!(store.hourly_count(), first_hourly);
    assert_eq!(store.daily_count(), first_daily);
    assert_eq!(client.call_count(), 1);
}

#[tokio::test]
async fn test_sync_into_sqlite_store() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.upsert_station(&test_station()).unwrap();

    let client = FixtureClient::new();
    let engine = SyncEngine::with_clock(client, &store, Box::new(FixedClock(date(2020, 1, 3))));

    let stations = store.list_stations().unwrap();
    let summary = engine.sync_all(&stations, None).await;

    assert!(!summary.has_failures());
    assert_eq!(summary.reports.len(), 1);

    let (hourly, daily) = store.counts("A001").unwrap();
    assert_eq!(hourly, 48);
    assert_eq!(daily, 2);
    assert_eq!(store.max_daily_date("A001").unwrap(), Some(date(2020, 1, 2)));
}
