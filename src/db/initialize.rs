use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use chrono::{DateTime, Utc};
use rusqlite::Connection;

/// Initialize the database.
/// Delegates all schema creation and demo seeding to the migration engine;
/// `now` anchors the seeded join dates.
pub fn init_db(conn: &Connection, now: DateTime<Utc>) -> AppResult<()> {
    run_pending_migrations(conn, now)?;
    Ok(())
}
