#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, TimeZone, Utc};
use rfellowship::db::initialize::init_db;
use rfellowship::db::pool::DbPool;
use rfellowship::models::event::Event;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Instant used to initialize every seeded test database.
pub const SEED_NOW: &str = "2025-10-01T09:00:00Z";

pub fn rfs() -> Command {
    cargo_bin_cmd!("rfellowship")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rfellowship.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Initialize a seeded DB through the CLI with the clock pinned at SEED_NOW.
pub fn init_seeded(db_path: &str) {
    rfs()
        .args(["--db", db_path, "--test", "--now", SEED_NOW, "init"])
        .assert()
        .success();
}

pub fn login(db_path: &str, who: &str) {
    rfs()
        .args(["--db", db_path, "--now", SEED_NOW, "login", who])
        .assert()
        .success();
}

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
}

pub fn seed_now() -> DateTime<Utc> {
    utc(2025, 10, 1, 9, 0, 0)
}

/// In-memory store seeded at `seed_now()`.
pub fn seeded_pool() -> DbPool {
    let pool = DbPool::in_memory().expect("open in-memory db");
    init_db(&pool.conn, seed_now()).expect("init db");
    pool
}

pub fn event(id: &str, date: &str, time: &str) -> Event {
    Event {
        id: id.to_string(),
        title: format!("Event {}", id),
        date: date.to_string(),
        time: time.to_string(),
        location: "Main Hall".to_string(),
        description: String::new(),
        attendees: 0,
    }
}
