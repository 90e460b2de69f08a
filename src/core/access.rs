//! Trial and subscription gating for interactive actions.
//!
//! Access is a pure function of the session-holder snapshot and an injected
//! clock. Nothing here re-evaluates on its own: callers recompute whenever the
//! session-holder changes.

use crate::errors::AppResult;
use crate::models::access::AccessState;
use crate::models::countdown::MS_PER_DAY;
use crate::models::session::Session;
use crate::models::user::User;
use crate::services::payment::PaymentReceipt;
use chrono::{DateTime, Utc};

/// Days of trial, counting the joining day as day 1.
/// The product copy advertises a "7-Day Free Trial".
pub const TRIAL_WINDOW_DAYS: i64 = 8;

/// Reported as `days_remaining` for subscribed or exempt session-holders.
pub const UNLIMITED_DAYS: i64 = 999;

/// Derive access with the default trial window.
pub fn derive_access(user: Option<&User>, now: DateTime<Utc>) -> AccessState {
    derive_access_with_window(user, now, TRIAL_WINDOW_DAYS)
}

pub fn derive_access_with_window(
    user: Option<&User>,
    now: DateTime<Utc>,
    trial_window_days: i64,
) -> AccessState {
    let Some(user) = user else {
        return AccessState::denied();
    };

    if user.is_subscribed() || user.role.is_trial_exempt() {
        return AccessState {
            has_access: true,
            days_remaining: UNLIMITED_DAYS,
        };
    }

    let days_left = trial_window_days - elapsed_days(user.joined_at(), now);

    AccessState {
        has_access: days_left > 0,
        days_remaining: days_left.max(0),
    }
}

/// Whole days since joining, rounded up. The joining day itself is day 1.
pub fn elapsed_days(joined_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let ms = (now - joined_at).num_milliseconds().abs();
    let days = (ms + MS_PER_DAY - 1) / MS_PER_DAY;
    days.max(1)
}

/// Guards interactive actions (posting, messaging, RSVPing, reacting).
///
/// Holds the access snapshot it was built from plus the "show upsell" flag
/// a view turns into a prompt. A blocked action is dropped, never queued.
#[derive(Debug, Clone)]
pub struct AccessGate {
    state: AccessState,
    trial_window_days: i64,
    upsell_requested: bool,
}

impl AccessGate {
    pub fn new(state: AccessState) -> Self {
        Self {
            state,
            trial_window_days: TRIAL_WINDOW_DAYS,
            upsell_requested: false,
        }
    }

    pub fn for_session(session: &Session, now: DateTime<Utc>, trial_window_days: i64) -> Self {
        Self {
            state: derive_access_with_window(session.user(), now, trial_window_days),
            trial_window_days,
            upsell_requested: false,
        }
    }

    pub fn state(&self) -> AccessState {
        self.state
    }

    pub fn has_access(&self) -> bool {
        self.state.has_access
    }

    pub fn upsell_requested(&self) -> bool {
        self.upsell_requested
    }

    pub fn dismiss_upsell(&mut self) {
        self.upsell_requested = false;
    }

    /// Run `action` exactly once when access is granted and hand back its
    /// result. Async callers pass a closure returning a future and await the
    /// returned value. When access is denied `action` is not called, the
    /// upsell flag is raised and `None` is returned.
    pub fn guard<T, F>(&mut self, action: F) -> Option<T>
    where
        F: FnOnce() -> T,
    {
        if self.state.has_access {
            Some(action())
        } else {
            self.upsell_requested = true;
            None
        }
    }

    /// Recompute after the session-holder changed.
    pub fn refresh(&mut self, session: &Session, now: DateTime<Utc>) -> AccessState {
        self.state = derive_access_with_window(session.user(), now, self.trial_window_days);
        self.state
    }

    /// Flip the session-holder to subscribed once the payment collaborator
    /// has reported success, then re-derive access.
    pub fn upgrade(
        &mut self,
        session: &mut Session,
        _receipt: &PaymentReceipt,
        now: DateTime<Utc>,
    ) -> AppResult<AccessState> {
        session.require_user_mut()?.subscribe();
        self.upsell_requested = false;
        Ok(self.refresh(session, now))
    }
}
