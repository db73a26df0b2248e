use chrono::NaiveDate;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SyncError>;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Response decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Date parsing error: {0}")]
    DateParse(#[from] chrono::ParseError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Station {code} not found")]
    StationNotFound { code: String },

    #[error("No data for station {station} between {start} and {end}")]
    EmptyWindow {
        station: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error(
        "Giving up on station {station} window {start}..{end} after {attempts} attempts: {}",
        .causes.join("; ")
    )]
    AttemptsExhausted {
        station: String,
        start: NaiveDate,
        end: NaiveDate,
        attempts: u32,
        causes: Vec<String>,
    },

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

impl SyncError {
    /// Transient failures are worth another fetch attempt; everything else is
    /// either authoritative (the provider answered) or local.
    pub fn is_transient(&self) -> bool {
        matches!(self, SyncError::Http(_) | SyncError::Decode(_))
    }

    /// True when a fetch produced no usable readings for a window, whether
    /// because the provider had none or because the attempt budget ran out.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            SyncError::EmptyWindow { .. } | SyncError::AttemptsExhausted { .. }
        )
    }
}
