pub mod client;
pub mod wire;

pub use client::{InmetClient, StationDataClient};
pub use wire::WireReading;
