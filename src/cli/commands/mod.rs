pub mod config;
pub mod devotional;
pub mod events;
pub mod feed;
pub mod init;
pub mod log;
pub mod login;
pub mod logout;
pub mod members;
pub mod pray;
pub mod profile;
pub mod status;
pub mod upgrade;

use crate::config::Config;
use crate::core::access::AccessGate;
use crate::core::auth::AuthLogic;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::session::Session;
use crate::ui::upsell;
use crate::utils::date::Clock;

/// Open the configured database, applying any pending migrations.
pub fn open_db(cfg: &Config, clock: &Clock) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn, clock.utc_now())?;
    Ok(pool)
}

/// Restore the session and build its access gate.
pub fn session_with_gate(
    pool: &DbPool,
    cfg: &Config,
    clock: &Clock,
) -> AppResult<(Session, AccessGate)> {
    let session = AuthLogic::current_session(&pool.conn)?;
    let gate = AccessGate::for_session(&session, clock.utc_now(), cfg.trial_window_days);
    Ok((session, gate))
}

/// Run `action` behind the gate. A refusal shows the subscription prompt
/// and yields `Ok(None)`; the action is not retried later.
pub fn guarded<T>(
    gate: &mut AccessGate,
    action: impl FnOnce() -> AppResult<T>,
) -> AppResult<Option<T>> {
    match gate.guard(action) {
        Some(result) => result.map(Some),
        None => {
            if gate.upsell_requested() {
                upsell::show(&gate.state());
                gate.dismiss_upsell();
            }
            Ok(None)
        }
    }
}
