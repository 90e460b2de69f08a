use crate::errors::{AppError, AppResult};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PrayerCategory {
    Health,
    Family,
    Spiritual,
    General,
}

impl PrayerCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrayerCategory::Health => "Health",
            PrayerCategory::Family => "Family",
            PrayerCategory::Spiritual => "Spiritual",
            PrayerCategory::General => "General",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Health" => Some(PrayerCategory::Health),
            "Family" => Some(PrayerCategory::Family),
            "Spiritual" => Some(PrayerCategory::Spiritual),
            "General" => Some(PrayerCategory::General),
            _ => None,
        }
    }

    /// Case-insensitive CLI parsing.
    pub fn parse(s: &str) -> AppResult<Self> {
        let lower = s.to_lowercase();
        let mut chars = lower.chars();
        let normalized = match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        };
        Self::from_db_str(&normalized).ok_or_else(|| AppError::InvalidCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PrayerRequest {
    pub id: String,
    pub user_id: String,
    pub content: String,
    pub is_anonymous: bool,
    pub prayer_count: i64,
    pub created_at: String,
    pub category: PrayerCategory,
}
