use super::user::User;
use crate::errors::{AppError, AppResult};

/// Explicit session context handed to every operation that needs the
/// current session-holder. Holds no derived access data.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub user: Option<User>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn signed_in(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn require_user(&self) -> AppResult<&User> {
        self.user.as_ref().ok_or(AppError::NoSession)
    }

    pub fn require_user_mut(&mut self) -> AppResult<&mut User> {
        self.user.as_mut().ok_or(AppError::NoSession)
    }
}
