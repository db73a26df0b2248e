pub mod daily;
pub mod hourly;
pub mod period;
pub mod station;

pub use daily::DailyAggregate;
pub use hourly::HourlyReading;
pub use period::Period;
pub use station::Station;
