/// Remote provider defaults
pub const DEFAULT_BASE_URL: &str = "https://apitempo.inmet.gov.br/estacao";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fetch policy defaults
pub const DEFAULT_MAX_ATTEMPTS: u32 = 6;
pub const DEFAULT_THROTTLE_MS: u64 = 2000;

/// Storage defaults
pub const DEFAULT_DATABASE: &str = "inmet-weather.db";

/// Wire date/time formats
pub const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";
pub const WIRE_HOUR_FORMAT: &str = "%H%M";

/// A daily statistic is only computed when at most this many hourly samples
/// are missing from the column (a typical day has 24 samples).
pub const MAX_MISSING_PER_DAY: usize = 12;

/// Request window bound, in months
pub const WINDOW_MONTHS: u32 = 12;
