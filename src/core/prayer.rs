use crate::db::log::ttlog_soft;
use crate::db::queries::{free_prayer_id, increment_prayer_count, insert_prayer};
use crate::errors::{AppError, AppResult};
use crate::models::prayer::{PrayerCategory, PrayerRequest};
use crate::models::user::User;
use crate::services::text::{TextService, normalize_encouragement};
use chrono::{DateTime, Utc};
use rusqlite::Connection;

pub struct PrayerLogic;

impl PrayerLogic {
    /// "I prayed": bump the counter and return the new value.
    pub fn pray(conn: &Connection, prayer_id: &str) -> AppResult<i64> {
        let count = increment_prayer_count(conn, prayer_id)?;
        ttlog_soft(conn, "pray", prayer_id, &format!("Prayer count now {}", count));
        Ok(count)
    }

    /// Post a new request and return it with an encouragement sentence.
    pub fn submit(
        conn: &Connection,
        author: &User,
        content: &str,
        category: PrayerCategory,
        anonymous: bool,
        encourager: &dyn TextService,
        now: DateTime<Utc>,
    ) -> AppResult<(PrayerRequest, String)> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::EmptyContent);
        }

        let encouragement =
            normalize_encouragement(Some(encourager.prayer_encouragement(category.as_str())));

        let request = PrayerRequest {
            id: free_prayer_id(conn, now.timestamp_millis())?,
            user_id: author.id.clone(),
            content: content.to_string(),
            is_anonymous: anonymous,
            prayer_count: 0,
            created_at: now.to_rfc3339(),
            category,
        };
        insert_prayer(conn, &request)?;
        ttlog_soft(conn, "prayer_request", &request.id, category.as_str());

        Ok((request, encouragement))
    }
}
