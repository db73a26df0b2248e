use crate::models::Period;
use crate::utils::constants::WINDOW_MONTHS;
use chrono::{Duration, Months, NaiveDate};

/// Split `[start, end]` into an ordered run of request windows, each bounded
/// to roughly one year. The provider caps how much history one call may
/// request; chunking also bounds the blast radius of a failed request.
///
/// Windows are contiguous (each starts the day after the previous one ends),
/// never overlap, and the final window always ends exactly at `end`. When
/// `start > end` there is no work and the plan is empty.
pub fn plan(start: NaiveDate, end: NaiveDate) -> Vec<Period> {
    let mut windows = Vec::new();
    let mut cursor = start;

    while cursor <= end {
        let candidate = cursor + Months::new(WINDOW_MONTHS);
        let window_end = candidate.min(end);
        windows.push(Period::new(cursor, window_end));
        // Advance past the unclamped candidate so the next window starts the
        // day after this one ends.
        cursor = candidate + Duration::days(1);
    }

    windows
}
