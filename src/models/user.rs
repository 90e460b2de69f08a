use super::role::{AccountStatus, Role};
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Session-holder record.
///
/// `joined_at` is fixed at construction and `is_subscribed` can only go
/// from `false` to `true` (see [`User::subscribe`]).
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub church: String,
    pub bio: String,
    pub interests: Vec<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub status: Option<AccountStatus>, // None ⇔ legacy record, treated as active
    joined_at: DateTime<Utc>,
    is_subscribed: bool,
}

impl User {
    /// Build a user record. A join timestamp before the Unix epoch is a
    /// configuration error and is rejected here, never at access time.
    pub fn new(
        id: &str,
        name: &str,
        role: Role,
        joined_at: DateTime<Utc>,
        is_subscribed: bool,
    ) -> AppResult<Self> {
        if joined_at.timestamp_millis() < 0 {
            return Err(AppError::InvalidTimestamp(joined_at.to_rfc3339()));
        }

        Ok(Self {
            id: id.to_string(),
            name: name.to_string(),
            role,
            church: String::new(),
            bio: String::new(),
            interests: Vec::new(),
            phone_number: None,
            email: None,
            status: None,
            joined_at,
            is_subscribed,
        })
    }

    /// Parse an RFC 3339 join timestamp as stored in the database.
    pub fn parse_joined_at(raw: &str) -> AppResult<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| AppError::InvalidTimestamp(raw.to_string()))
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }

    pub fn with_status(mut self, status: AccountStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_church(mut self, church: &str) -> Self {
        self.church = church.to_string();
        self
    }

    pub fn with_bio(mut self, bio: &str) -> Self {
        self.bio = bio.to_string();
        self
    }

    pub fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }

    pub fn is_subscribed(&self) -> bool {
        self.is_subscribed
    }

    /// Flip the subscription flag on. There is no way back.
    pub fn subscribe(&mut self) {
        self.is_subscribed = true;
    }

    /// Accounts without an explicit status are considered active.
    pub fn can_sign_in(&self) -> bool {
        matches!(self.status, None | Some(AccountStatus::Active))
    }

    pub fn display_email(&self) -> &str {
        self.email.as_deref().unwrap_or("-")
    }
}

/// Partial profile update. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub church: Option<String>,
    pub phone_number: Option<String>,
    pub interests: Option<Vec<String>>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.bio.is_none()
            && self.church.is_none()
            && self.phone_number.is_none()
            && self.interests.is_none()
    }

    pub fn apply(self, user: &mut User) {
        if let Some(v) = self.name {
            user.name = v;
        }
        if let Some(v) = self.bio {
            user.bio = v;
        }
        if let Some(v) = self.church {
            user.church = v;
        }
        if let Some(v) = self.phone_number {
            user.phone_number = Some(v);
        }
        if let Some(v) = self.interests {
            user.interests = v;
        }
    }
}
