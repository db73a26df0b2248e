use crate::models::HourlyReading;
use crate::utils::constants::WIRE_HOUR_FORMAT;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer};

/// One hourly record as the provider serializes it: short Portuguese field
/// codes, numeric values as numbers, numeric strings, or null. The wire
/// format carries no station identity beyond the requested code, so readings
/// are tagged after decoding.
#[derive(Debug, Clone, Deserialize)]
pub struct WireReading {
    #[serde(rename = "DT_MEDICAO")]
    pub date: NaiveDate,

    #[serde(rename = "HR_MEDICAO", deserialize_with = "hour")]
    pub time: NaiveTime,

    #[serde(rename = "TEM_MIN", deserialize_with = "numeric", default)]
    pub temp_min: Option<f64>,
    #[serde(rename = "TEM_MAX", deserialize_with = "numeric", default)]
    pub temp_max: Option<f64>,
    #[serde(rename = "TEM_INS", deserialize_with = "numeric", default)]
    pub temp_inst: Option<f64>,

    #[serde(rename = "PRE_MIN", deserialize_with = "numeric", default)]
    pub pressure_min: Option<f64>,
    #[serde(rename = "PRE_MAX", deserialize_with = "numeric", default)]
    pub pressure_max: Option<f64>,
    #[serde(rename = "PRE_INS", deserialize_with = "numeric", default)]
    pub pressure_inst: Option<f64>,

    #[serde(rename = "UMD_MIN", deserialize_with = "numeric", default)]
    pub humidity_min: Option<f64>,
    #[serde(rename = "UMD_MAX", deserialize_with = "numeric", default)]
    pub humidity_max: Option<f64>,
    #[serde(rename = "UMD_INS", deserialize_with = "numeric", default)]
    pub humidity_inst: Option<f64>,

    #[serde(rename = "VEN_VEL", deserialize_with = "numeric", default)]
    pub wind_speed: Option<f64>,
    #[serde(rename = "VEN_DIR", deserialize_with = "numeric", default)]
    pub wind_direction: Option<f64>,
    #[serde(rename = "VEN_RAJ", deserialize_with = "numeric", default)]
    pub wind_gust: Option<f64>,

    #[serde(rename = "RAD_GLO", deserialize_with = "numeric", default)]
    pub radiation: Option<f64>,

    #[serde(rename = "PTO_MIN", deserialize_with = "numeric", default)]
    pub dew_point_min: Option<f64>,
    #[serde(rename = "PTO_MAX", deserialize_with = "numeric", default)]
    pub dew_point_max: Option<f64>,
    #[serde(rename = "PTO_INS", deserialize_with = "numeric", default)]
    pub dew_point_inst: Option<f64>,

    #[serde(rename = "CHUVA", deserialize_with = "numeric", default)]
    pub rain: Option<f64>,
}

impl WireReading {
    pub fn into_reading(self, station_code: &str) -> HourlyReading {
        HourlyReading {
            station_code: station_code.to_string(),
            date: self.date,
            time: self.time,
            temp_min: self.temp_min,
            temp_max: self.temp_max,
            temp_inst: self.temp_inst,
            pressure_min: self.pressure_min,
            pressure_max: self.pressure_max,
            pressure_inst: self.pressure_inst,
            humidity_min: self.humidity_min,
            humidity_max: self.humidity_max,
            humidity_inst: self.humidity_inst,
            wind_speed: self.wind_speed,
            wind_direction: self.wind_direction,
            wind_gust: self.wind_gust,
            radiation: self.radiation,
            dew_point_min: self.dew_point_min,
            dew_point_max: self.dew_point_max,
            dew_point_inst: self.dew_point_inst,
            rain: self.rain,
        }
    }
}

/// Measurement hours arrive as `HHMM`, sometimes with a `:` separator or a
/// trailing ` UTC`.
fn hour<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    NaiveTime::parse_from_str(&format!("{digits:0>4}"), WIRE_HOUR_FORMAT)
        .map_err(serde::de::Error::custom)
}

/// Null, a JSON number, or a numeric string all decode to the same column
/// type; anything unparseable is treated as missing rather than failing the
/// whole window.
fn numeric<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}
