use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::access::derive_access_with_window;
use crate::core::auth::AuthLogic;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::date::Clock;
use crate::utils::formatting::days_label;

pub fn handle(cmd: &Commands, cfg: &Config, clock: &Clock) -> AppResult<()> {
    if let Commands::Login { identifier } = cmd {
        let pool = super::open_db(cfg, clock)?;
        let user = AuthLogic::login(&pool.conn, identifier)?;

        success(format!("Welcome, {} ({})", user.name, user.role.label()));

        let state = derive_access_with_window(Some(&user), clock.utc_now(), cfg.trial_window_days);
        if !user.is_subscribed() && !user.role.is_trial_exempt() {
            if state.has_access {
                warning(format!(
                    "7-Day Free Trial Active: {} remaining. Subscribe to keep access.",
                    days_label(state.days_remaining)
                ));
            } else {
                warning("Free Trial Expired. Run `rfellowship upgrade` to unlock access.");
            }
        }
    }

    Ok(())
}
