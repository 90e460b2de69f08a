use serde::Serialize;

/// Derived access state for the current session-holder. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccessState {
    pub has_access: bool,
    pub days_remaining: i64,
}

impl AccessState {
    pub fn denied() -> Self {
        Self {
            has_access: false,
            days_remaining: 0,
        }
    }
}
