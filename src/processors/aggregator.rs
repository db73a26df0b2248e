use crate::models::{DailyAggregate, HourlyReading};
use crate::utils::constants::MAX_MISSING_PER_DAY;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Reduce hourly readings to one aggregate per station and calendar date.
///
/// Grouping is by exact date; time of day never matters. Every reduction is
/// order-independent, so the result depends only on the input multiset.
/// Output is sorted by station code, then date.
pub fn reduce(readings: &[HourlyReading]) -> Vec<DailyAggregate> {
    let mut groups: BTreeMap<(String, NaiveDate), Vec<&HourlyReading>> = BTreeMap::new();
    for reading in readings {
        groups
            .entry((reading.station_code.clone(), reading.date))
            .or_default()
            .push(reading);
    }

    groups
        .into_iter()
        .map(|((station_code, date), hours)| reduce_day(station_code, date, &hours))
        .collect()
}

fn reduce_day(station_code: String, date: NaiveDate, hours: &[&HourlyReading]) -> DailyAggregate {
    let column =
        |field: fn(&HourlyReading) -> Option<f64>| hours.iter().map(|r| field(r)).collect::<Vec<_>>();

    DailyAggregate {
        station_code,
        date,
        temp_min: gated(&column(|r| r.temp_min), minimum),
        temp_max: gated(&column(|r| r.temp_max), maximum),
        pressure_min: gated(&column(|r| r.pressure_min), minimum),
        pressure_max: gated(&column(|r| r.pressure_max), maximum),
        humidity_min: gated(&column(|r| r.humidity_min), minimum),
        humidity_max: gated(&column(|r| r.humidity_max), maximum),
        wind_speed_mean: gated(&column(|r| r.wind_speed), mean),
        wind_direction_mean: gated(&column(|r| r.wind_direction), mean),
        radiation_total: positive_total(&column(|r| r.radiation)),
        dew_point_min: gated(&column(|r| r.dew_point_min), minimum),
        dew_point_max: gated(&column(|r| r.dew_point_max), maximum),
        rain_total: gated(&column(|r| r.rain), total),
    }
}

/// Apply the completeness gate, then a reduction over the surviving values.
///
/// A column with more than `MAX_MISSING_PER_DAY` missing samples yields no
/// statistic at all; computing over the remainder would misrepresent the day.
fn gated(column: &[Option<f64>], reduce: fn(&[f64]) -> Option<f64>) -> Option<f64> {
    let missing = column.iter().filter(|value| value.is_none()).count();
    if missing > MAX_MISSING_PER_DAY {
        return None;
    }
    let values: Vec<f64> = column.iter().flatten().copied().collect();
    if values.is_empty() {
        return None;
    }
    reduce(&values)
}

fn minimum(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

fn maximum(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

fn mean(values: &[f64]) -> Option<f64> {
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn total(values: &[f64]) -> Option<f64> {
    Some(values.iter().sum())
}

/// Radiation is summed over strictly positive readings only. Non-positive
/// values are nighttime or sensor noise: excluded from the sum, but never
/// counted as missing, so this column carries no completeness gate.
fn positive_total(column: &[Option<f64>]) -> Option<f64> {
    let values: Vec<f64> = column.iter().flatten().copied().collect();
    if values.is_empty() {
        return None;
    }
    Some(values.iter().filter(|value| **value > 0.0).sum())
}
