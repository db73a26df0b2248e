pub mod memory;
pub mod sqlite;

use crate::error::Result;
use crate::models::{DailyAggregate, HourlyReading, Station};
use chrono::NaiveDate;

/// The persistence surface the sync engine depends on. Upserts are keyed by
/// each entity's natural uniqueness and overwrite on conflict.
pub trait SyncStore {
    fn list_stations(&self) -> Result<Vec<Station>>;

    fn upsert_station(&self, station: &Station) -> Result<()>;

    /// High-water mark: the latest date with a stored daily aggregate for the
    /// station, or `None` when nothing has been synced yet.
    fn max_daily_date(&self, station_code: &str) -> Result<Option<NaiveDate>>;

    fn upsert_hourly(&self, reading: &HourlyReading) -> Result<()>;

    fn upsert_daily(&self, aggregate: &DailyAggregate) -> Result<()>;
}

impl<T: SyncStore + ?Sized> SyncStore for &T {
    fn list_stations(&self) -> Result<Vec<Station>> {
        (**self).list_stations()
    }

    fn upsert_station(&self, station: &Station) -> Result<()> {
        (**self).upsert_station(station)
    }

    fn max_daily_date(&self, station_code: &str) -> Result<Option<NaiveDate>> {
        (**self).max_daily_date(station_code)
    }

    fn upsert_hourly(&self, reading: &HourlyReading) -> Result<()> {
        (**self).upsert_hourly(reading)
    }

    fn upsert_daily(&self, aggregate: &DailyAggregate) -> Result<()> {
        (**self).upsert_daily(aggregate)
    }
}

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
