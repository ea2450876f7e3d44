use chrono::{DateTime, Datelike, Duration, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::timezone::{local_midnight, to_platform_time};
use crate::core::{AppError, Result};

/// Symbolic reporting window selected on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Today,
    Week,
    Month,
    Year,
    All,
}

/// Concrete settlement window; `start = None` means unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start.map_or(true, |start| instant >= start) && instant <= self.end
    }
}

impl Period {
    pub const ALL: [Period; 5] = [
        Period::Today,
        Period::Week,
        Period::Month,
        Period::Year,
        Period::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Today => "today",
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
            Period::All => "all",
        }
    }

    /// Resolve to a range ending at `now`; calendar boundaries use `offset`
    pub fn resolve_range(&self, now: DateTime<Utc>, offset: FixedOffset) -> DateRange {
        let today = to_platform_time(now, offset).date_naive();

        let start = match self {
            Period::Today => Some(local_midnight(today, offset)),
            Period::Week => Some(now - Duration::days(7)),
            Period::Month => {
                let first_of_month = today - Duration::days(i64::from(today.day0()));
                Some(local_midnight(first_of_month, offset))
            }
            Period::Year => {
                let first_of_year = today - Duration::days(i64::from(today.ordinal0()));
                Some(local_midnight(first_of_year, offset))
            }
            Period::All => None,
        };

        DateRange { start, end: now }
    }
}

impl Default for Period {
    fn default() -> Self {
        Period::Month
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "today" => Ok(Period::Today),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            "all" => Ok(Period::All),
            _ => Err(AppError::InvalidPeriod(s.to_string())),
        }
    }
}

impl Period {
    /// Parse an optional query value; a missing selector means the current month
    pub fn from_query(value: Option<&str>) -> Result<Self> {
        match value {
            None => Ok(Period::default()),
            Some(raw) => raw.parse(),
        }
    }
}

/// Resolves periods against the wall clock in the platform's UTC offset
#[derive(Debug, Clone, Copy)]
pub struct PeriodFilter {
    offset: FixedOffset,
}

impl PeriodFilter {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn resolve(&self, period: Period) -> DateRange {
        period.resolve_range(Utc::now(), self.offset)
    }
}
