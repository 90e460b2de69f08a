use crate::config::Config;
use crate::core::auth::AuthLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::date::Clock;

pub fn handle(cfg: &Config, clock: &Clock) -> AppResult<()> {
    let pool = super::open_db(cfg, clock)?;

    match AuthLogic::logout(&pool.conn)? {
        Some(id) => success(format!("Signed out ({})", id)),
        None => info("No active session"),
    }

    Ok(())
}
