//! Local timestamp display for the "last updated" badge.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::America::El_Salvador;

/// Renders a UTC timestamp in the business's local time zone.
///
/// Returns a placeholder when the document was never saved.
#[must_use]
pub fn format_local_timestamp(at: Option<DateTime<Utc>>) -> String {
    match at {
        Some(at) => at
            .with_timezone(&El_Salvador)
            .format("%d/%m/%Y, %H:%M:%S")
            .to_string(),
        None => "Not saved yet".to_string(),
    }
}

/// Today's calendar date in the business's local time zone.
#[must_use]
pub fn local_today() -> NaiveDate {
    Utc::now().with_timezone(&El_Salvador).date_naive()
}
