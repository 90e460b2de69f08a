//! Unified application error type.
//! All modules (db, core, cli, services) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Invalid account status: {0}")]
    InvalidStatus(String),

    #[error("Invalid prayer category: {0}")]
    InvalidCategory(String),

    // ---------------------------
    // Session & access
    // ---------------------------
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("This account is pending approval or inactive: {0}")]
    AccountInactive(String),

    #[error("No active session. Run `rfellowship login <email>` first")]
    NoSession,

    #[error("Not allowed: {0}")]
    Forbidden(String),

    #[error("Payment failed: {0}")]
    Payment(String),

    // ---------------------------
    // Lookup errors
    // ---------------------------
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Post not found: {0}")]
    PostNotFound(String),

    #[error("Prayer request not found: {0}")]
    PrayerNotFound(String),

    // ---------------------------
    // Content
    // ---------------------------
    #[error("This content does not align with our community guidelines. Please revise.")]
    UnsafeContent,

    #[error("Content is empty")]
    EmptyContent,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;
