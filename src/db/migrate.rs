use crate::db::seed;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. Migrations record themselves there.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

const CREATE_COMMUNITY_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id            TEXT PRIMARY KEY,
        name          TEXT NOT NULL,
        role          TEXT NOT NULL CHECK(role IN ('member','pastor','admin','elder','clerk')),
        church        TEXT NOT NULL DEFAULT '',
        bio           TEXT NOT NULL DEFAULT '',
        interests     TEXT NOT NULL DEFAULT '[]',
        phone_number  TEXT,
        email         TEXT,
        status        TEXT CHECK(status IS NULL OR status IN ('active','inactive','pending')),
        joined_at     TEXT NOT NULL,
        is_subscribed INTEGER NOT NULL DEFAULT 0
    );

    CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email ON users(lower(email));

    CREATE TABLE IF NOT EXISTS events (
        id          TEXT PRIMARY KEY,
        title       TEXT NOT NULL,
        date        TEXT NOT NULL,
        time        TEXT NOT NULL,
        location    TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL DEFAULT '',
        attendees   INTEGER NOT NULL DEFAULT 0
    );

    CREATE TABLE IF NOT EXISTS rsvps (
        user_id  TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        event_id TEXT NOT NULL REFERENCES events(id) ON DELETE CASCADE,
        PRIMARY KEY (user_id, event_id)
    );

    CREATE TABLE IF NOT EXISTS posts (
        id         TEXT PRIMARY KEY,
        user_id    TEXT NOT NULL,
        content    TEXT NOT NULL,
        likes      INTEGER NOT NULL DEFAULT 0,
        comments   INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        kind       TEXT NOT NULL DEFAULT 'text'
    );

    CREATE TABLE IF NOT EXISTS likes (
        user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        post_id TEXT NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
        PRIMARY KEY (user_id, post_id)
    );

    CREATE TABLE IF NOT EXISTS prayers (
        id           TEXT PRIMARY KEY,
        user_id      TEXT NOT NULL,
        content      TEXT NOT NULL,
        is_anonymous INTEGER NOT NULL DEFAULT 0,
        prayer_count INTEGER NOT NULL DEFAULT 0,
        created_at   TEXT NOT NULL,
        category     TEXT NOT NULL CHECK(category IN ('Health','Family','Spiritual','General'))
    );

    CREATE TABLE IF NOT EXISTS kv (
        key   TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );
"#;

/// A named, one-shot schema or data step.
struct Migration {
    version: &'static str,
    description: &'static str,
    apply: fn(&Connection, DateTime<Utc>) -> AppResult<()>,
}

fn create_schema(conn: &Connection, _now: DateTime<Utc>) -> AppResult<()> {
    conn.execute_batch(CREATE_COMMUNITY_SCHEMA)?;
    Ok(())
}

fn seed_demo(conn: &Connection, now: DateTime<Utc>) -> AppResult<()> {
    seed::seed_demo_community(conn, now)
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20251001_0001_community_schema",
        description: "Created users, events, rsvps, posts, likes, prayers and kv tables",
        apply: create_schema,
    },
    Migration {
        version: "20251001_0002_seed_demo_community",
        description: "Seeded demo users, events, posts and prayer requests",
        apply: seed_demo,
    },
];

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Public entry point: run all pending migrations.
///
/// Each migration runs inside its own transaction together with the log row
/// that marks it as applied.
pub fn run_pending_migrations(conn: &Connection, now: DateTime<Utc>) -> AppResult<()> {
    ensure_log_table(conn)?;

    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }

        conn.execute_batch("BEGIN;")?;

        let outcome = (m.apply)(conn, now).and_then(|_| {
            conn.execute(
                "INSERT INTO log (date, operation, target, message)
                 VALUES (?1, 'migration_applied', ?2, ?3)",
                [now.to_rfc3339().as_str(), m.version, m.description],
            )?;
            Ok(())
        });

        match outcome {
            Ok(()) => {
                conn.execute_batch("COMMIT;")?;
                success(format!("Migration applied: {}", m.version));
            }
            Err(e) => {
                conn.execute_batch("ROLLBACK;")?;
                return Err(AppError::Migration(format!("{}: {}", m.version, e)));
            }
        }
    }

    Ok(())
}

/// Versions recorded as applied, oldest first.
pub fn applied_versions(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
