use crate::config::Settings;
use crate::error::{Result, SyncError};
use crate::models::{HourlyReading, Station};
use crate::remote::wire::WireReading;
use crate::utils::constants::WIRE_DATE_FORMAT;
use async_trait::async_trait;
use chrono::NaiveDate;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, warn};

/// Source of hourly readings for a station and date window.
#[async_trait]
pub trait StationDataClient: Send + Sync {
    async fn fetch_window(
        &self,
        station: &Station,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HourlyReading>>;
}

#[async_trait]
impl<T: StationDataClient + ?Sized> StationDataClient for &T {
    async fn fetch_window(
        &self,
        station: &Station,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HourlyReading>> {
        (**self).fetch_window(station, start, end).await
    }
}

/// HTTP client for the INMET station API.
///
/// Requests are throttled with a randomized delay before every attempt, and
/// transient failures are retried up to the configured attempt budget. An
/// empty response is authoritative and never retried.
pub struct InmetClient {
    http: reqwest::Client,
    base_url: String,
    max_attempts: u32,
    throttle: Duration,
}

impl InmetClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            max_attempts: settings.max_attempts.max(1),
            throttle: Duration::from_millis(settings.throttle_ms),
        })
    }

    fn window_url(&self, station_code: &str, start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "{}/{}/{}/{}",
            self.base_url,
            start.format(WIRE_DATE_FORMAT),
            end.format(WIRE_DATE_FORMAT),
            station_code
        )
    }

    /// Cooperative throttle: a bounded random pause so backfills do not
    /// hammer the provider.
    async fn pause(&self) {
        if self.throttle.is_zero() {
            return;
        }
        let cap = self.throttle.as_millis() as u64;
        let delay = rand::rng().random_range(0..=cap);
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    async fn attempt(
        &self,
        station: &Station,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HourlyReading>> {
        let url = self.window_url(&station.code, start, end);
        debug!(url = %url, "Requesting window");

        let body = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        // An absent body or an empty array both mean the provider has no
        // rows for this window.
        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "[]" || trimmed == "null" {
            return Err(SyncError::EmptyWindow {
                station: station.code.clone(),
                start,
                end,
            });
        }

        let records: Vec<WireReading> = serde_json::from_str(trimmed)?;
        if records.is_empty() {
            return Err(SyncError::EmptyWindow {
                station: station.code.clone(),
                start,
                end,
            });
        }

        Ok(records
            .into_iter()
            .map(|record| record.into_reading(&station.code))
            .collect())
    }
}

#[async_trait]
impl StationDataClient for InmetClient {
    async fn fetch_window(
        &self,
        station: &Station,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HourlyReading>> {
        let mut causes = Vec::new();

        for attempt in 1..=self.max_attempts {
            self.pause().await;

            match self.attempt(station, start, end).await {
                Ok(readings) => {
                    if attempt > 1 {
                        debug!(
                            station = %station.code,
                            attempt,
                            "Window fetch succeeded after retries"
                        );
                    }
                    return Ok(readings);
                }
                Err(err) if err.is_transient() => {
                    warn!(
                        station = %station.code,
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %err,
                        "Window fetch attempt failed"
                    );
                    causes.push(err.to_string());
                }
                Err(err) => return Err(err),
            }
        }

        Err(SyncError::AttemptsExhausted {
            station: station.code.clone(),
            start,
            end,
            attempts: self.max_attempts,
            causes,
        })
    }
}
