use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// One hour of measurements for one station. Any measurement column may be
/// absent; `None` is the missing-value marker, never zero.
///
/// Uniqueness is `(station_code, date, time)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyReading {
    pub station_code: String,
    pub date: NaiveDate,
    pub time: NaiveTime,

    // Temperature (°C)
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub temp_inst: Option<f64>,

    // Station pressure (mB)
    pub pressure_min: Option<f64>,
    pub pressure_max: Option<f64>,
    pub pressure_inst: Option<f64>,

    // Relative humidity (%)
    pub humidity_min: Option<f64>,
    pub humidity_max: Option<f64>,
    pub humidity_inst: Option<f64>,

    // Wind (m/s, degrees, m/s)
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
    pub wind_gust: Option<f64>,

    // Global radiation (kJ/m²)
    pub radiation: Option<f64>,

    // Dew point (°C)
    pub dew_point_min: Option<f64>,
    pub dew_point_max: Option<f64>,
    pub dew_point_inst: Option<f64>,

    // Accumulated rain (mm)
    pub rain: Option<f64>,
}
