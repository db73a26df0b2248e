use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inmet-sync")]
#[command(about = "Incremental synchronizer for INMET weather-station data")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Configuration file path")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Backfill and update hourly readings and daily aggregates
    Sync {
        #[arg(
            short = 'f',
            long,
            help = "Station seed file (JSON array) to import before syncing"
        )]
        stations_file: Option<PathBuf>,

        #[arg(short, long, help = "Restrict the run to one station code")]
        station: Option<String>,

        #[arg(long, help = "Database file path [default: from configuration]")]
        database: Option<PathBuf>,

        #[arg(long, default_value = "false")]
        silent: bool,
    },

    /// Show the request windows a backfill range would produce
    Plan {
        #[arg(short, long, help = "First date to cover (yyyy-mm-dd)")]
        start: NaiveDate,

        #[arg(short, long, help = "Last date to cover (yyyy-mm-dd)")]
        end: NaiveDate,
    },

    /// Display stored per-station coverage
    Info {
        #[arg(long, help = "Database file path [default: from configuration]")]
        database: Option<PathBuf>,
    },
}
