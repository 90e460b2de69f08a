//! Back-office membership management for clerks and admins.

use crate::db::log::ttlog_soft;
use crate::db::queries::{
    delete_user, find_user_by_id, load_users, load_users_with_status, set_user_status,
};
use crate::errors::{AppError, AppResult};
use crate::models::role::AccountStatus;
use crate::models::user::User;
use rusqlite::Connection;

pub struct MembersLogic;

impl MembersLogic {
    fn require_manager(actor: &User) -> AppResult<()> {
        if actor.role.can_manage_members() {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "{} accounts cannot manage members",
                actor.role.label()
            )))
        }
    }

    /// Load `id` and check that `actor` may change it.
    fn target(conn: &Connection, actor: &User, id: &str) -> AppResult<User> {
        Self::require_manager(actor)?;

        let user = find_user_by_id(conn, id)?.ok_or_else(|| AppError::UserNotFound(id.to_string()))?;
        if user.id == actor.id {
            return Err(AppError::Forbidden("you cannot change your own account".into()));
        }
        if !actor.role.can_manage(user.role) {
            return Err(AppError::Forbidden(format!(
                "a {} cannot manage {} accounts",
                actor.role.label(),
                user.role.label()
            )));
        }
        Ok(user)
    }

    pub fn list(conn: &Connection, actor: &User) -> AppResult<Vec<User>> {
        Self::require_manager(actor)?;
        load_users(conn)
    }

    /// Applications waiting for approval that `actor` is allowed to decide on.
    pub fn pending(conn: &Connection, actor: &User) -> AppResult<Vec<User>> {
        Self::require_manager(actor)?;
        Ok(load_users_with_status(conn, AccountStatus::Pending)?
            .into_iter()
            .filter(|u| actor.role.can_manage(u.role))
            .collect())
    }

    pub fn approve(conn: &Connection, actor: &User, id: &str) -> AppResult<User> {
        let mut user = Self::target(conn, actor, id)?;
        if user.status != Some(AccountStatus::Pending) {
            return Err(AppError::InvalidStatus(format!("{} is not pending approval", id)));
        }

        set_user_status(conn, id, AccountStatus::Active)?;
        user.status = Some(AccountStatus::Active);
        ttlog_soft(conn, "approve", id, &format!("Approved by {}", actor.id));
        Ok(user)
    }

    /// Drop a pending application entirely.
    pub fn reject(conn: &Connection, actor: &User, id: &str) -> AppResult<User> {
        let user = Self::target(conn, actor, id)?;
        if user.status != Some(AccountStatus::Pending) {
            return Err(AppError::InvalidStatus(format!("{} is not pending approval", id)));
        }

        delete_user(conn, id)?;
        ttlog_soft(conn, "reject", id, &format!("Rejected by {}", actor.id));
        Ok(user)
    }

    /// Active (or legacy, status-less) accounts become inactive; anything else becomes active.
    pub fn toggle_active(conn: &Connection, actor: &User, id: &str) -> AppResult<User> {
        let mut user = Self::target(conn, actor, id)?;
        let next = if user.can_sign_in() {
            AccountStatus::Inactive
        } else {
            AccountStatus::Active
        };

        set_user_status(conn, id, next)?;
        user.status = Some(next);
        ttlog_soft(
            conn,
            "member_status",
            id,
            &format!("Set {} by {}", next.to_db_str(), actor.id),
        );
        Ok(user)
    }
}
