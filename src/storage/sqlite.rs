use crate::error::Result;
use crate::models::{DailyAggregate, HourlyReading, Station};
use crate::storage::SyncStore;
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use std::path::Path;

/// SQLite-backed store. Rows are keyed by the entities' natural keys, so
/// re-writing a key overwrites in place and re-runs never duplicate.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::init(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(&conn)?;
        Ok(Self { conn })
    }

    fn init(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS stations (
                code       TEXT PRIMARY KEY,
                name       TEXT NOT NULL,
                state      TEXT NOT NULL,
                latitude   REAL NOT NULL,
                longitude  REAL NOT NULL,
                start_date TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS hourly_readings (
                station_code   TEXT NOT NULL,
                date           TEXT NOT NULL,
                time           TEXT NOT NULL,
                temp_min       REAL,
                temp_max       REAL,
                temp_inst      REAL,
                pressure_min   REAL,
                pressure_max   REAL,
                pressure_inst  REAL,
                humidity_min   REAL,
                humidity_max   REAL,
                humidity_inst  REAL,
                wind_speed     REAL,
                wind_direction REAL,
                wind_gust      REAL,
                radiation      REAL,
                dew_point_min  REAL,
                dew_point_max  REAL,
                dew_point_inst REAL,
                rain           REAL,
                PRIMARY KEY (station_code, date, time)
            );

            CREATE TABLE IF NOT EXISTS daily_aggregates (
                station_code        TEXT NOT NULL,
                date                TEXT NOT NULL,
                temp_min            REAL,
                temp_max            REAL,
                pressure_min        REAL,
                pressure_max        REAL,
                humidity_min        REAL,
                humidity_max       REAL,
                wind_speed_mean     REAL,
                wind_direction_mean REAL,
                radiation_total     REAL,
                dew_point_min       REAL,
                dew_point_max       REAL,
                rain_total          REAL,
                PRIMARY KEY (station_code, date)
            );",
        )?;
        Ok(())
    }

    /// Stored row counts for one station: `(hourly, daily)`.
    pub fn counts(&self, station_code: &str) -> Result<(i64, i64)> {
        let hourly = self.conn.query_row(
            "SELECT COUNT(*) FROM hourly_readings WHERE station_code = ?1",
            [station_code],
            |row| row.get(0),
        )?;
        let daily = self.conn.query_row(
            "SELECT COUNT(*) FROM daily_aggregates WHERE station_code = ?1",
            [station_code],
            |row| row.get(0),
        )?;
        Ok((hourly, daily))
    }
}

impl SyncStore for SqliteStore {
    fn list_stations(&self) -> Result<Vec<Station>> {
        let mut stmt = self.conn.prepare(
            "SELECT code, name, state, latitude, longitude, start_date
             FROM stations ORDER BY code",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Station {
                code: row.get(0)?,
                name: row.get(1)?,
                state: row.get(2)?,
                latitude: row.get(3)?,
                longitude: row.get(4)?,
                start_date: row.get(5)?,
            })
        })?;

        let mut stations = Vec::new();
        for station in rows {
            stations.push(station?);
        }
        Ok(stations)
    }

    fn upsert_station(&self, station: &Station) -> Result<()> {
        self.conn.execute(
            "INSERT INTO stations (code, name, state, latitude, longitude, start_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT (code) DO UPDATE SET
                name = excluded.name,
                state = excluded.state,
                latitude = excluded.latitude,
                longitude = excluded.longitude,
                start_date = excluded.start_date",
            params![
                station.code,
                station.name,
                station.state,
                station.latitude,
                station.longitude,
                station.start_date,
            ],
        )?;
        Ok(())
    }

    fn max_daily_date(&self, station_code: &str) -> Result<Option<NaiveDate>> {
        let max = self.conn.query_row(
            "SELECT MAX(date) FROM daily_aggregates WHERE station_code = ?1",
            [station_code],
            |row| row.get(0),
        )?;
        Ok(max)
    }

    fn upsert_hourly(&self, reading: &HourlyReading) -> Result<()> {
        self.conn.execute(
            "INSERT INTO hourly_readings (
                station_code, date, time,
                temp_min, temp_max, temp_inst,
                pressure_min, pressure_max, pressure_inst,
                humidity_min, humidity_max, humidity_inst,
                wind_speed, wind_direction, wind_gust,
                radiation,
                dew_point_min, dew_point_max, dew_point_inst,
                rain
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10,
                       ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20)
             ON CONFLICT (station_code, date, time) DO UPDATE SET
                temp_min = excluded.temp_min,
                temp_max = excluded.temp_max,
                temp_inst = excluded.temp_inst,
                pressure_min = excluded.pressure_min,
                pressure_max = excluded.pressure_max,
                pressure_inst = excluded.pressure_inst,
                humidity_min = excluded.humidity_min,
                humidity_max = excluded.humidity_max,
                humidity_inst = excluded.humidity_inst,
                wind_speed = excluded.wind_speed,
                wind_direction = excluded.wind_direction,
                wind_gust = excluded.wind_gust,
                radiation = excluded.radiation,
                dew_point_min = excluded.dew_point_min,
                dew_point_max = excluded.dew_point_max,
                dew_point_inst = excluded.dew_point_inst,
                rain = excluded.rain",
            params![
                reading.station_code,
                reading.date,
                reading.time,
                reading.temp_min,
                reading.temp_max,
                reading.temp_inst,
                reading.pressure_min,
                reading.pressure_max,
                reading.pressure_inst,
                reading.humidity_min,
                reading.humidity_max,
                reading.humidity_inst,
                reading.wind_speed,
                reading.wind_direction,
                reading.wind_gust,
                reading.radiation,
                reading.dew_point_min,
                reading.dew_point_max,
                reading.dew_point_inst,
                reading.rain,
            ],
        )?;
        Ok(())
    }

    fn upsert_daily(&self, aggregate: &DailyAggregate) -> Result<()> {
        self.conn.execute(
            "INSERT INTO daily_aggregates (
                station_code, date,
                temp_min, temp_max,
                pressure_min, pressure_max,
                humidity_min, humidity_max,
                wind_speed_mean, wind_direction_mean,
                radiation_total,
                dew_point_min, dew_point_max,
                rain_total
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
             ON CONFLICT (station_code, date) DO UPDATE SET
                temp_min = excluded.temp_min,
                temp_max = excluded.temp_max,
                pressure_min = excluded.pressure_min,
                pressure_max = excluded.pressure_max,
                humidity_min = excluded.humidity_min,
                humidity_max = excluded.humidity_max,
                wind_speed_mean = excluded.wind_speed_mean,
                wind_direction_mean = excluded.wind_direction_mean,
                radiation_total = excluded.radiation_total,
                dew_point_min = excluded.dew_point_min,
                dew_point_max = excluded.dew_point_max,
                rain_total = excluded.rain_total",
            params![
                aggregate.station_code,
                aggregate.date,
                aggregate.temp_min,
                aggregate.temp_max,
                aggregate.pressure_min,
                aggregate.pressure_max,
                aggregate.humidity_min,
                aggregate.humidity_max,
                aggregate.wind_speed_mean,
                aggregate.wind_direction_mean,
                aggregate.radiation_total,
                aggregate.dew_point_min,
                aggregate.dew_point_max,
                aggregate.rain_total,
            ],
        )?;
        Ok(())
    }
}
