use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Reference data for one automatic weather station. Loaded externally and
/// never mutated by the sync engine, which only uses `code` and `start_date`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Station {
    #[validate(length(min = 1))]
    pub code: String,

    #[validate(length(min = 1))]
    pub name: String,

    pub state: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    pub start_date: NaiveDate,
}

impl Station {
    pub fn new(
        code: String,
        name: String,
        state: String,
        latitude: f64,
        longitude: f64,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            code,
            name,
            state,
            latitude,
            longitude,
            start_date,
        }
    }
}
