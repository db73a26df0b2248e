use crate::error::Result;
use crate::models::Station;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Loads the known-station list from a JSON seed file: an array of station
/// objects. Every entry is validated before it is handed to storage.
pub struct StationReader;

impl StationReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read_stations(&self, path: &Path) -> Result<Vec<Station>> {
        let file = File::open(path)?;
        let stations: Vec<Station> = serde_json::from_reader(BufReader::new(file))?;

        for station in &stations {
            validator::Validate::validate(station)?;
        }

        Ok(stations)
    }
}

impl Default for StationReader {
    fn default() -> Self {
        Self::new()
    }
}
