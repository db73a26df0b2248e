use crate::error::Result;
use crate::models::{DailyAggregate, HourlyReading, Station};
use crate::storage::SyncStore;
use chrono::{NaiveDate, NaiveTime};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// In-memory store, keyed exactly like the SQLite adapter. Used by the test
/// suite and for dry runs.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    stations: BTreeMap<String, Station>,
    hourly: BTreeMap<(String, NaiveDate, NaiveTime), HourlyReading>,
    daily: BTreeMap<(String, NaiveDate), DailyAggregate>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hourly_count(&self) -> usize {
        self.inner.lock().unwrap().hourly.len()
    }

    pub fn daily_count(&self) -> usize {
        self.inner.lock().unwrap().daily.len()
    }

    pub fn daily_for(&self, station_code: &str) -> Vec<DailyAggregate> {
        self.inner
            .lock()
            .unwrap()
            .daily
            .values()
            .filter(|aggregate| aggregate.station_code == station_code)
            .cloned()
            .collect()
    }
}

impl SyncStore for MemoryStore {
    fn list_stations(&self) -> Result<Vec<Station>> {
        Ok(self.inner.lock().unwrap().stations.values().cloned().collect())
    }

    fn upsert_station(&self, station: &Station) -> Result<()> {
        self.inner
            .lock()
            .unwrap()
            .stations
            .insert(station.code.clone(), station.clone());
        Ok(())
    }

    fn max_daily_date(&self, station_code: &str) -> Result<Option<NaiveDate>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .daily
            .keys()
            .filter(|(code, _)| code == station_code)
            .map(|(_, date)| *date)
            .max())
    }

    fn upsert_hourly(&self, reading: &HourlyReading) -> Result<()> {
        self.inner.lock().unwrap().hourly.insert(
            (reading.station_code.clone(), reading.date, reading.time),
            reading.clone(),
        );
        Ok(())
    }

    fn upsert_daily(&self, aggregate: &DailyAggregate) -> Result<()> {
        self.inner.lock().unwrap().daily.insert(
            (aggregate.station_code.clone(), aggregate.date),
            aggregate.clone(),
        );
        Ok(())
    }
}
