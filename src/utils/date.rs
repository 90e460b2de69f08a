//! Clock handling. The CLI reads "now" once per command and threads it
//! through; `--now` pins it for reproducible runs.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, FixedOffset, Local, NaiveDate, Utc};

#[derive(Debug, Clone, Copy)]
pub enum Clock {
    System,
    Fixed(DateTime<FixedOffset>),
}

impl Clock {
    /// Build from the optional `--now` value: RFC 3339, or `YYYY-MM-DD HH:MM` in UTC.
    pub fn from_override(raw: Option<&str>) -> AppResult<Self> {
        match raw {
            None => Ok(Clock::System),
            Some(s) => parse_instant(s).map(Clock::Fixed),
        }
    }

    pub fn utc_now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(dt) => dt.with_timezone(&Utc),
        }
    }

    /// Calendar date as seen by the user.
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System => Local::now().date_naive(),
            Clock::Fixed(dt) => dt.date_naive(),
        }
    }
}

pub fn parse_instant(s: &str) -> AppResult<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s.trim()) {
        return Ok(dt);
    }

    chrono::NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%d %H:%M")
        .map(|naive| naive.and_utc().fixed_offset())
        .map_err(|_| AppError::InvalidTimestamp(s.to_string()))
}

/// Render an instant for humans, e.g. `Wed 15 Oct 2025, 10:00`.
pub fn human<Tz: chrono::TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.format("%a %d %b %Y, %H:%M").to_string()
}
