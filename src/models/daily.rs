use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of statistics derived from a station's hourly readings. Recomputed
/// whenever the source hours are refetched, never hand-edited. A `None` field
/// means the completeness gate rejected that column for the day.
///
/// Uniqueness is `(station_code, date)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAggregate {
    pub station_code: String,
    pub date: NaiveDate,

    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,

    pub pressure_min: Option<f64>,
    pub pressure_max: Option<f64>,

    pub humidity_min: Option<f64>,
    pub humidity_max: Option<f64>,

    pub wind_speed_mean: Option<f64>,
    pub wind_direction_mean: Option<f64>,

    /// Sum of the strictly positive radiation readings for the day.
    pub radiation_total: Option<f64>,

    pub dew_point_min: Option<f64>,
    pub dew_point_max: Option<f64>,

    pub rain_total: Option<f64>,
}
