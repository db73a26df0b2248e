use crate::cli::args::{Cli, Commands};
use crate::config::Settings;
use crate::error::{Result, SyncError};
use crate::processors::{planner, SyncEngine};
use crate::readers::StationReader;
use crate::remote::InmetClient;
use crate::storage::{SqliteStore, SyncStore};
use crate::utils::progress::ProgressReporter;

pub async fn run(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("inmet_sync=debug")),
            )
            .init();
    }

    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Sync {
            stations_file,
            station,
            database,
            silent,
        } => {
            let database = database.unwrap_or_else(|| settings.database.clone());
            let store = SqliteStore::open(&database)?;

            if let Some(path) = stations_file {
                let stations = StationReader::new().read_stations(&path)?;
                for station in &stations {
                    store.upsert_station(station)?;
                }
                println!("Imported {} stations from {}", stations.len(), path.display());
            }

            let mut stations = store.list_stations()?;
            if let Some(code) = station {
                stations.retain(|s| s.code == code);
                if stations.is_empty() {
                    return Err(SyncError::StationNotFound { code });
                }
            }

            if stations.is_empty() {
                println!("No known stations; import a seed file with --stations-file");
                return Ok(());
            }

            println!("Syncing {} stations into {}", stations.len(), database.display());

            let client = InmetClient::new(&settings)?;
            let engine = SyncEngine::new(client, &store);
            let progress =
                ProgressReporter::new(stations.len() as u64, "Syncing stations...", silent);

            let summary = engine.sync_all(&stations, Some(&progress)).await;
            progress.finish_with_message("Sync complete");

            println!("\n{}", summary.generate_summary());

            if summary.has_failures() {
                println!("⚠️  {} station(s) failed this run", summary.failures.len());
            } else {
                println!("✅ All stations synchronized");
            }
        }

        Commands::Plan { start, end } => {
            let windows = planner::plan(start, end);

            if windows.is_empty() {
                println!("Nothing to fetch: {} is after {}", start, end);
                return Ok(());
            }

            for (index, window) in windows.iter().enumerate() {
                println!("{:>4}. {} ({} days)", index + 1, window, window.days());
            }
            println!("{} windows covering {}..{}", windows.len(), start, end);
        }

        Commands::Info { database } => {
            let database = database.unwrap_or_else(|| settings.database.clone());
            let store = SqliteStore::open(&database)?;

            let stations = store.list_stations()?;
            if stations.is_empty() {
                println!("No stations in {}", database.display());
                return Ok(());
            }

            println!("{} known stations in {}\n", stations.len(), database.display());
            for station in stations {
                let (hourly, daily) = store.counts(&station.code)?;
                let synced_through = store
                    .max_daily_date(&station.code)?
                    .map(|date| date.to_string())
                    .unwrap_or_else(|| "never".to_string());

                println!(
                    "{} {} ({}): {} hourly, {} daily, synced through {}",
                    station.code, station.name, station.state, hourly, daily, synced_through
                );
            }
        }
    }

    Ok(())
}
