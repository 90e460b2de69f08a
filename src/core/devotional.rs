use crate::db::queries::{kv_get, kv_set};
use crate::errors::AppResult;
use crate::models::devotional::Devotional;
use crate::services::text::{TextService, parse_devotional};
use chrono::NaiveDate;
use rusqlite::Connection;

pub const DEVOTIONAL_DATE_KEY: &str = "devotional_date";
pub const DEVOTIONAL_DATA_KEY: &str = "devotional_data";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevotionalSource {
    Cached,
    Generated,
    Fallback,
}

pub struct DevotionalLogic;

impl DevotionalLogic {
    /// Devotional of the day. A cached entry for `today` wins unless `refresh`
    /// is set; freshly generated ones are cached, the built-in fallback is not.
    pub fn today(
        conn: &Connection,
        service: &dyn TextService,
        today: NaiveDate,
        refresh: bool,
    ) -> AppResult<(Devotional, DevotionalSource)> {
        let today_key = today.format("%Y-%m-%d").to_string();

        if !refresh
            && kv_get(conn, DEVOTIONAL_DATE_KEY)?.as_deref() == Some(today_key.as_str())
            && let Some(d) = kv_get(conn, DEVOTIONAL_DATA_KEY)?.and_then(|raw| parse_devotional(&raw))
        {
            return Ok((d, DevotionalSource::Cached));
        }

        match service.generate_devotional() {
            Some(d) => {
                kv_set(conn, DEVOTIONAL_DATE_KEY, &today_key)?;
                kv_set(conn, DEVOTIONAL_DATA_KEY, &serde_json::to_string(&d)?)?;
                Ok((d, DevotionalSource::Generated))
            }
            None => Ok((Devotional::fallback(), DevotionalSource::Fallback)),
        }
    }
}
