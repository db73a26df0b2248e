use crate::error::Result;
use crate::models::Station;
use crate::processors::{aggregator, planner};
use crate::remote::StationDataClient;
use crate::storage::SyncStore;
use crate::utils::progress::ProgressReporter;
use chrono::{Duration, NaiveDate};
use tracing::{debug, warn};

/// Source of "today", injected so backfill boundaries are testable.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Fixed-date clock for tests and replays.
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct StationReport {
    pub station_code: String,
    pub windows_planned: usize,
    pub windows_fetched: usize,
    pub hourly_written: usize,
    pub daily_written: usize,
    /// Set when a failed window ended the station's run early.
    pub stopped_early: Option<String>,
}

#[derive(Debug, Default)]
pub struct SyncSummary {
    pub reports: Vec<StationReport>,
    pub failures: Vec<(String, String)>,
}

impl SyncSummary {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn generate_summary(&self) -> String {
        let hourly: usize = self.reports.iter().map(|r| r.hourly_written).sum();
        let daily: usize = self.reports.iter().map(|r| r.daily_written).sum();

        let mut summary = String::new();
        summary.push_str("=== Sync Report ===\n");
        summary.push_str(&format!(
            "Stations attempted: {}\n",
            self.reports.len() + self.failures.len()
        ));
        summary.push_str(&format!("Hourly readings written: {}\n", hourly));
        summary.push_str(&format!("Daily aggregates written: {}\n", daily));

        for report in &self.reports {
            let note = report
                .stopped_early
                .as_ref()
                .map(|reason| format!(" (stopped: {})", reason))
                .unwrap_or_default();
            summary.push_str(&format!(
                "  {}: {}/{} windows, {} hourly, {} daily{}\n",
                report.station_code,
                report.windows_fetched,
                report.windows_planned,
                report.hourly_written,
                report.daily_written,
                note
            ));
        }

        if !self.failures.is_empty() {
            summary.push_str("Failed stations:\n");
            for (code, error) in &self.failures {
                summary.push_str(&format!("  {}: {}\n", code, error));
            }
        }

        summary
    }
}

/// Drives the per-station fetch/aggregate/store loop. All collaborators are
/// constructed by the caller; the engine holds no global state.
pub struct SyncEngine<C, S> {
    client: C,
    store: S,
    clock: Box<dyn Clock>,
}

impl<C: StationDataClient, S: SyncStore> SyncEngine<C, S> {
    pub fn new(client: C, store: S) -> Self {
        Self::with_clock(client, store, Box::new(SystemClock))
    }

    pub fn with_clock(client: C, store: S, clock: Box<dyn Clock>) -> Self {
        Self {
            client,
            store,
            clock,
        }
    }

    /// Synchronize one station from its high-water mark up to yesterday.
    ///
    /// The cursor is derived from storage once, at the start: a run that dies
    /// mid-way resumes correctly next time because nothing is carried in
    /// memory. A window that yields no data ends this station's run early
    /// without failing it; later windows would only be emptier.
    pub async fn sync_station(&self, station: &Station) -> Result<StationReport> {
        let cursor = self.store.max_daily_date(&station.code)?;
        let origin = match cursor {
            Some(latest) => latest + Duration::days(1),
            None => station.start_date,
        };
        // The current day is still accumulating readings; never fetch it.
        let target_end = self.clock.today() - Duration::days(1);

        let windows = planner::plan(origin, target_end);
        debug!(
            station = %station.code,
            ?cursor,
            windows = windows.len(),
            "Planned station sync"
        );

        let mut report = StationReport {
            station_code: station.code.clone(),
            windows_planned: windows.len(),
            ..Default::default()
        };

        for window in windows {
            let readings = match self
                .client
                .fetch_window(station, window.start, window.end)
                .await
            {
                Ok(readings) => readings,
                Err(err) if err.is_fetch_failure() => {
                    warn!(
                        station = %station.code,
                        %window,
                        error = %err,
                        "Window yielded no data, stopping station"
                    );
                    report.stopped_early = Some(err.to_string());
                    break;
                }
                Err(err) => return Err(err),
            };
            report.windows_fetched += 1;

            let aggregates = aggregator::reduce(&readings);

            for reading in readings.iter().filter(|r| is_after(cursor, r.date)) {
                self.store.upsert_hourly(reading)?;
                report.hourly_written += 1;
            }
            for aggregate in aggregates.iter().filter(|a| is_after(cursor, a.date)) {
                self.store.upsert_daily(aggregate)?;
                report.daily_written += 1;
            }
        }

        Ok(report)
    }

    /// Synchronize every given station in turn. One station's failure is
    /// recorded and the run moves on to the next.
    pub async fn sync_all(
        &self,
        stations: &[Station],
        progress: Option<&ProgressReporter>,
    ) -> SyncSummary {
        let mut summary = SyncSummary::default();

        for station in stations {
            if let Some(progress) = progress {
                progress.set_message(&format!("Syncing {} ({})", station.code, station.name));
            }

            match self.sync_station(station).await {
                Ok(report) => {
                    if let Some(progress) = progress {
                        let note = report
                            .stopped_early
                            .as_deref()
                            .map(|reason| format!(" (stopped: {})", reason))
                            .unwrap_or_default();
                        progress.println(&format!(
                            "{}: {} hourly, {} daily{}",
                            report.station_code, report.hourly_written, report.daily_written, note
                        ));
                    }
                    summary.reports.push(report);
                }
                Err(err) => {
                    warn!(station = %station.code, error = %err, "Station sync failed");
                    if let Some(progress) = progress {
                        progress.println(&format!("{}: failed: {}", station.code, err));
                    }
                    summary.failures.push((station.code.clone(), err.to_string()));
                }
            }

            if let Some(progress) = progress {
                progress.increment(1);
            }
        }

        summary
    }
}

/// A `None` cursor means nothing is synced yet, so every date qualifies.
fn is_after(cursor: Option<NaiveDate>, date: NaiveDate) -> bool {
    cursor.map_or(true, |latest| date > latest)
}
