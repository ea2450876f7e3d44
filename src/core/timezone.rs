use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::core::{AppError, Result};

/// Builds the platform's fixed UTC offset from whole hours.
///
/// All timestamps are stored as UTC; the offset only decides where local
/// days, months and years begin.
pub fn platform_offset(hours: i32) -> Result<FixedOffset> {
    if !(-12..=14).contains(&hours) {
        return Err(AppError::Configuration(format!(
            "UTC offset must be between -12 and +14 hours, got {}",
            hours
        )));
    }

    FixedOffset::east_opt(hours * 3600)
        .ok_or_else(|| AppError::Configuration(format!("Invalid UTC offset: {}", hours)))
}

/// Convert a UTC timestamp to platform local time
pub fn to_platform_time(utc_time: DateTime<Utc>, offset: FixedOffset) -> DateTime<FixedOffset> {
    utc_time.with_timezone(&offset)
}

/// UTC instant of local midnight at the start of `date`
pub fn local_midnight(date: NaiveDate, offset: FixedOffset) -> DateTime<Utc> {
    Utc.from_utc_datetime(&(date.and_time(NaiveTime::MIN) - offset))
}

/// Format timestamp as ISO 8601 UTC for API responses
pub fn format_iso8601(utc_time: DateTime<Utc>) -> String {
    utc_time.to_rfc3339()
}
