//! Display and wire formatting for dates and times.
//!
//! Record fields use the unpadded Brazilian display forms; the consultation
//! API uses zero-padded `YYYY-MM-DD HH:MM:SS`. Stored timestamps stay
//! ISO-8601 via chrono's serde support.

use chrono::{DateTime, Local};

/// `D/M/YYYY`, day and month unpadded.
pub fn short_date(t: DateTime<Local>) -> String {
    t.format("%-d/%-m/%Y").to_string()
}

/// `H:MM`, hour unpadded, minute zero-padded.
pub fn clock_time(t: DateTime<Local>) -> String {
    t.format("%-H:%M").to_string()
}

/// `D/M/YYYY H:MM`.
pub fn date_time(t: DateTime<Local>) -> String {
    format!("{} {}", short_date(t), clock_time(t))
}

/// `YYYY-MM-DD HH:MM:SS`, zero-padded, local time, as the consultation API
/// expects.
pub fn api_timestamp(t: DateTime<Local>) -> String {
    t.format("%Y-%m-%d %H:%M:%S").to_string()
}
