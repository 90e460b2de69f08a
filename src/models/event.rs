use serde::{Deserialize, Serialize};

/// Community event as entered by the organiser.
/// `date` and `time` are display labels ("Oct 15", "10:00 AM"), not ISO values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub description: String,
    pub attendees: i64,
}

impl Event {
    /// Hour part of the time label ("7:00 PM" → "7:00").
    pub fn short_time(&self) -> &str {
        self.time.split_whitespace().next().unwrap_or("")
    }
}
