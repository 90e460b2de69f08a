use serde::Serialize;

pub const MS_PER_SECOND: i64 = 1_000;
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Time left before an event starts, calendar-agnostic (no months/years).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Countdown {
    /// Decompose a positive millisecond difference. `None` once the event has started.
    pub fn from_millis(diff: i64) -> Option<Self> {
        if diff <= 0 {
            return None;
        }

        Some(Self {
            days: diff / MS_PER_DAY,
            hours: (diff % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (diff % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (diff % MS_PER_MINUTE) / MS_PER_SECOND,
        })
    }

    /// e.g. `01d 02h 03m 04s`
    pub fn compact(&self) -> String {
        format!(
            "{:02}d {:02}h {:02}m {:02}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}
