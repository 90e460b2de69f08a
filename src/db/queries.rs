use crate::errors::{AppError, AppResult};
use crate::models::event::Event;
use crate::models::post::Post;
use crate::models::prayer::{PrayerCategory, PrayerRequest};
use crate::models::role::{AccountStatus, Role};
use crate::models::user::User;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};
use std::collections::HashSet;

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, rusqlite::types::Type::Text, Box::new(err))
}

// ---------------------------
// Users
// ---------------------------

pub fn map_user(row: &Row) -> Result<User> {
    let role_str: String = row.get("role")?;
    let role = Role::from_db_str(&role_str)
        .ok_or_else(|| conversion_error(2, AppError::InvalidRole(role_str.clone())))?;

    let status = match row.get::<_, Option<String>>("status")? {
        Some(s) => Some(
            AccountStatus::from_db_str(&s)
                .ok_or_else(|| conversion_error(8, AppError::InvalidStatus(s.clone())))?,
        ),
        None => None,
    };

    let joined_raw: String = row.get("joined_at")?;
    let joined_at = User::parse_joined_at(&joined_raw).map_err(|e| conversion_error(9, e))?;

    let id: String = row.get("id")?;
    let name: String = row.get("name")?;
    let is_subscribed = row.get::<_, i32>("is_subscribed")? == 1;

    let mut user =
        User::new(&id, &name, role, joined_at, is_subscribed).map_err(|e| conversion_error(9, e))?;

    let interests_raw: String = row.get("interests")?;
    user.interests = serde_json::from_str(&interests_raw).unwrap_or_default();
    user.church = row.get("church")?;
    user.bio = row.get("bio")?;
    user.phone_number = row.get("phone_number")?;
    user.email = row.get("email")?;
    user.status = status;

    Ok(user)
}

pub fn insert_user(conn: &Connection, u: &User) -> AppResult<()> {
    conn.execute(
        "INSERT INTO users (id, name, role, church, bio, interests, phone_number, email, status, joined_at, is_subscribed)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            u.id,
            u.name,
            u.role.to_db_str(),
            u.church,
            u.bio,
            serde_json::to_string(&u.interests)?,
            u.phone_number,
            u.email,
            u.status.map(|s| s.to_db_str()),
            u.joined_at().to_rfc3339(),
            if u.is_subscribed() { 1 } else { 0 },
        ],
    )?;
    Ok(())
}

/// Persist mutable profile fields and the subscription flag.
/// `joined_at` and `role` are never rewritten.
pub fn update_user(conn: &Connection, u: &User) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE users
            SET name = ?2, church = ?3, bio = ?4, interests = ?5, phone_number = ?6,
                is_subscribed = ?7
          WHERE id = ?1",
        params![
            u.id,
            u.name,
            u.church,
            u.bio,
            serde_json::to_string(&u.interests)?,
            u.phone_number,
            if u.is_subscribed() { 1 } else { 0 },
        ],
    )?;

    if changed == 0 {
        return Err(AppError::UserNotFound(u.id.clone()));
    }
    Ok(())
}

pub fn find_user_by_id(conn: &Connection, id: &str) -> AppResult<Option<User>> {
    let user = conn
        .query_row("SELECT * FROM users WHERE id = ?1", [id], map_user)
        .optional()?;
    Ok(user)
}

pub fn find_user_by_email(conn: &Connection, email: &str) -> AppResult<Option<User>> {
    let user = conn
        .query_row(
            "SELECT * FROM users WHERE lower(email) = lower(?1)",
            [email],
            map_user,
        )
        .optional()?;
    Ok(user)
}

pub fn set_user_status(conn: &Connection, id: &str, status: AccountStatus) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE users SET status = ?2 WHERE id = ?1",
        params![id, status.to_db_str()],
    )?;
    if changed == 0 {
        return Err(AppError::UserNotFound(id.to_string()));
    }
    Ok(())
}

/// Remove a user. RSVPs and likes go with it through the foreign keys.
pub fn delete_user(conn: &Connection, id: &str) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM users WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::UserNotFound(id.to_string()));
    }
    Ok(())
}

pub fn load_users_with_status(conn: &Connection, status: AccountStatus) -> AppResult<Vec<User>> {
    let mut stmt = conn.prepare("SELECT * FROM users WHERE status = ?1 ORDER BY rowid ASC")?;
    let rows = stmt.query_map([status.to_db_str()], map_user)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_users(conn: &Connection) -> AppResult<Vec<User>> {
    let mut stmt = conn.prepare("SELECT * FROM users ORDER BY rowid ASC")?;
    let rows = stmt.query_map([], map_user)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------
// Events & RSVPs
// ---------------------------

pub fn map_event(row: &Row) -> Result<Event> {
    Ok(Event {
        id: row.get("id")?,
        title: row.get("title")?,
        date: row.get("date")?,
        time: row.get("time")?,
        location: row.get("location")?,
        description: row.get("description")?,
        attendees: row.get("attendees")?,
    })
}

pub fn insert_event(conn: &Connection, ev: &Event) -> AppResult<()> {
    conn.execute(
        "INSERT INTO events (id, title, date, time, location, description, attendees)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            ev.id,
            ev.title,
            ev.date,
            ev.time,
            ev.location,
            ev.description,
            ev.attendees,
        ],
    )?;
    Ok(())
}

/// Events in insertion order.
pub fn load_events(conn: &Connection) -> AppResult<Vec<Event>> {
    let mut stmt = conn.prepare("SELECT * FROM events ORDER BY rowid ASC")?;
    let rows = stmt.query_map([], map_event)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_event(conn: &Connection, id: &str) -> AppResult<Option<Event>> {
    let ev = conn
        .query_row("SELECT * FROM events WHERE id = ?1", [id], map_event)
        .optional()?;
    Ok(ev)
}

pub fn adjust_attendees(conn: &Connection, event_id: &str, delta: i64) -> AppResult<()> {
    conn.execute(
        "UPDATE events SET attendees = MAX(0, attendees + ?2) WHERE id = ?1",
        params![event_id, delta],
    )?;
    Ok(())
}

pub fn load_rsvps(conn: &Connection, user_id: &str) -> AppResult<HashSet<String>> {
    load_id_set(
        conn,
        "SELECT event_id FROM rsvps WHERE user_id = ?1",
        user_id,
    )
}

pub fn add_rsvp(conn: &Connection, user_id: &str, event_id: &str) -> AppResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO rsvps (user_id, event_id) VALUES (?1, ?2)",
        params![user_id, event_id],
    )?;
    Ok(())
}

pub fn remove_rsvp(conn: &Connection, user_id: &str, event_id: &str) -> AppResult<()> {
    conn.execute(
        "DELETE FROM rsvps WHERE user_id = ?1 AND event_id = ?2",
        params![user_id, event_id],
    )?;
    Ok(())
}

// ---------------------------
// Posts & likes
// ---------------------------

pub fn map_post(row: &Row) -> Result<Post> {
    Ok(Post {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        content: row.get("content")?,
        likes: row.get("likes")?,
        comments: row.get("comments")?,
        created_at: row.get("created_at")?,
        kind: row.get("kind")?,
    })
}

pub fn insert_post(conn: &Connection, p: &Post) -> AppResult<()> {
    conn.execute(
        "INSERT INTO posts (id, user_id, content, likes, comments, created_at, kind)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            p.id,
            p.user_id,
            p.content,
            p.likes,
            p.comments,
            p.created_at,
            p.kind,
        ],
    )?;
    Ok(())
}

/// Newest first.
pub fn load_posts(conn: &Connection) -> AppResult<Vec<Post>> {
    let mut stmt = conn.prepare("SELECT * FROM posts ORDER BY created_at DESC")?;
    let rows = stmt.query_map([], map_post)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_post(conn: &Connection, id: &str) -> AppResult<Option<Post>> {
    let p = conn
        .query_row("SELECT * FROM posts WHERE id = ?1", [id], map_post)
        .optional()?;
    Ok(p)
}

pub fn adjust_likes(conn: &Connection, post_id: &str, delta: i64) -> AppResult<()> {
    conn.execute(
        "UPDATE posts SET likes = MAX(0, likes + ?2) WHERE id = ?1",
        params![post_id, delta],
    )?;
    Ok(())
}

pub fn load_likes(conn: &Connection, user_id: &str) -> AppResult<HashSet<String>> {
    load_id_set(conn, "SELECT post_id FROM likes WHERE user_id = ?1", user_id)
}

pub fn add_like(conn: &Connection, user_id: &str, post_id: &str) -> AppResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO likes (user_id, post_id) VALUES (?1, ?2)",
        params![user_id, post_id],
    )?;
    Ok(())
}

pub fn remove_like(conn: &Connection, user_id: &str, post_id: &str) -> AppResult<()> {
    conn.execute(
        "DELETE FROM likes WHERE user_id = ?1 AND post_id = ?2",
        params![user_id, post_id],
    )?;
    Ok(())
}

// ---------------------------
// Prayer wall
// ---------------------------

pub fn map_prayer(row: &Row) -> Result<PrayerRequest> {
    let cat_str: String = row.get("category")?;
    let category = PrayerCategory::from_db_str(&cat_str)
        .ok_or_else(|| conversion_error(6, AppError::InvalidCategory(cat_str.clone())))?;

    Ok(PrayerRequest {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        content: row.get("content")?,
        is_anonymous: row.get::<_, i32>("is_anonymous")? == 1,
        prayer_count: row.get("prayer_count")?,
        created_at: row.get("created_at")?,
        category,
    })
}

pub fn insert_prayer(conn: &Connection, p: &PrayerRequest) -> AppResult<()> {
    conn.execute(
        "INSERT INTO prayers (id, user_id, content, is_anonymous, prayer_count, created_at, category)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            p.id,
            p.user_id,
            p.content,
            if p.is_anonymous { 1 } else { 0 },
            p.prayer_count,
            p.created_at,
            p.category.as_str(),
        ],
    )?;
    Ok(())
}

/// Newest first, optionally filtered by category.
pub fn load_prayers(
    conn: &Connection,
    category: Option<PrayerCategory>,
) -> AppResult<Vec<PrayerRequest>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM prayers
         WHERE ?1 IS NULL OR category = ?1
         ORDER BY created_at DESC",
    )?;
    let rows = stmt.query_map([category.map(|c| c.as_str())], map_prayer)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn increment_prayer_count(conn: &Connection, id: &str) -> AppResult<i64> {
    let changed = conn.execute(
        "UPDATE prayers SET prayer_count = prayer_count + 1 WHERE id = ?1",
        [id],
    )?;
    if changed == 0 {
        return Err(AppError::PrayerNotFound(id.to_string()));
    }

    let count = conn.query_row(
        "SELECT prayer_count FROM prayers WHERE id = ?1",
        [id],
        |row| row.get(0),
    )?;
    Ok(count)
}

// ---------------------------
// Key/value blobs
// ---------------------------

pub fn kv_get(conn: &Connection, key: &str) -> AppResult<Option<String>> {
    let v = conn
        .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
        .optional()?;
    Ok(v)
}

pub fn kv_set(conn: &Connection, key: &str, value: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO kv (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn kv_remove(conn: &Connection, key: &str) -> AppResult<()> {
    conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
    Ok(())
}

// ---------------------------
// Id allocation
// ---------------------------

fn id_taken(conn: &Connection, sql: &str, id: &str) -> AppResult<bool> {
    let hit = conn
        .query_row(sql, [id], |_| Ok(()))
        .optional()?
        .is_some();
    Ok(hit)
}

/// First unused numeric id at or after `base`.
fn free_numeric_id(conn: &Connection, sql: &str, base: i64) -> AppResult<String> {
    let mut candidate = base;
    while id_taken(conn, sql, &candidate.to_string())? {
        candidate += 1;
    }
    Ok(candidate.to_string())
}

pub fn free_post_id(conn: &Connection, base: i64) -> AppResult<String> {
    free_numeric_id(conn, "SELECT 1 FROM posts WHERE id = ?1", base)
}

pub fn free_prayer_id(conn: &Connection, base: i64) -> AppResult<String> {
    free_numeric_id(conn, "SELECT 1 FROM prayers WHERE id = ?1", base)
}

fn load_id_set(conn: &Connection, sql: &str, owner: &str) -> AppResult<HashSet<String>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([owner], |row| row.get::<_, String>(0))?;

    let mut out = HashSet::new();
    for r in rows {
        out.insert(r?);
    }
    Ok(out)
}
