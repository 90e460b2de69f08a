use crate::core::access::AccessGate;
use crate::db::log::ttlog_soft;
use crate::db::queries::{
    find_user_by_email, find_user_by_id, kv_get, kv_remove, kv_set, update_user,
};
use crate::errors::{AppError, AppResult};
use crate::models::access::AccessState;
use crate::models::session::Session;
use crate::models::user::{ProfileChanges, User};
use crate::services::payment::{PaymentProcessor, PaymentReceipt, PaymentRequest};
use chrono::{DateTime, Utc};
use rusqlite::Connection;

/// Key under which the signed-in user id is kept.
pub const SESSION_KEY: &str = "auth_user_id";

/// Sign-in, sign-out and session-holder updates against the local store.
pub struct AuthLogic;

impl AuthLogic {
    fn lookup(conn: &Connection, identifier: &str) -> AppResult<Option<User>> {
        if let Some(u) = find_user_by_email(conn, identifier)? {
            return Ok(Some(u));
        }
        if let Some(u) = find_user_by_id(conn, identifier)? {
            return Ok(Some(u));
        }

        // Back-office shortcuts
        match identifier {
            "admin" => find_user_by_id(conn, "admin1"),
            "clerk" => find_user_by_id(conn, "c1"),
            _ => Ok(None),
        }
    }

    /// Sign in by email (case-insensitive) or user id.
    /// Unknown identifiers get a generic error; pending or inactive accounts are refused.
    pub fn login(conn: &Connection, identifier: &str) -> AppResult<User> {
        let user = Self::lookup(conn, identifier.trim())?.ok_or(AppError::InvalidCredentials)?;

        if !user.can_sign_in() {
            ttlog_soft(conn, "login_refused", &user.id, "Account pending or inactive");
            return Err(AppError::AccountInactive(user.display_email().to_string()));
        }

        kv_set(conn, SESSION_KEY, &user.id)?;
        ttlog_soft(conn, "login", &user.id, &format!("{} signed in", user.name));

        Ok(user)
    }

    /// Clear the stored session. Returns the id that was signed in, if any.
    pub fn logout(conn: &Connection) -> AppResult<Option<String>> {
        let previous = kv_get(conn, SESSION_KEY)?;
        kv_remove(conn, SESSION_KEY)?;

        if let Some(id) = &previous {
            ttlog_soft(conn, "logout", id, "Signed out");
        }
        Ok(previous)
    }

    /// Restore the session from the store. A stored id that no longer matches
    /// a user, or whose account was deactivated since, is dropped and yields
    /// an anonymous session.
    pub fn current_session(conn: &Connection) -> AppResult<Session> {
        let Some(id) = kv_get(conn, SESSION_KEY)? else {
            return Ok(Session::anonymous());
        };

        match find_user_by_id(conn, &id)? {
            Some(user) if user.can_sign_in() => Ok(Session::signed_in(user)),
            _ => {
                kv_remove(conn, SESSION_KEY)?;
                Ok(Session::anonymous())
            }
        }
    }

    pub fn update_profile(
        conn: &Connection,
        session: &mut Session,
        changes: ProfileChanges,
    ) -> AppResult<User> {
        let user = session.require_user_mut()?;
        changes.apply(user);
        update_user(conn, user)?;
        ttlog_soft(conn, "profile", &user.id, "Profile updated");
        Ok(user.clone())
    }

    /// Run the (simulated) payment, then flip the session-holder to subscribed
    /// and persist it. Nothing changes if the payment is rejected.
    pub fn upgrade(
        conn: &Connection,
        session: &mut Session,
        gate: &mut AccessGate,
        processor: &dyn PaymentProcessor,
        request: &PaymentRequest,
        now: DateTime<Utc>,
    ) -> AppResult<(PaymentReceipt, AccessState)> {
        session.require_user()?;

        let receipt = processor.process(request, now)?;
        let state = gate.upgrade(session, &receipt, now)?;

        let user = session.require_user()?;
        update_user(conn, user)?;
        ttlog_soft(
            conn,
            "upgrade",
            &user.id,
            &format!("Subscribed with plan {} ({})", receipt.amount, receipt.reference),
        );

        Ok((receipt, state))
    }
}
