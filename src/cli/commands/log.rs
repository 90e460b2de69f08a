use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::errors::AppResult;
use crate::utils::date::Clock;

pub fn handle(cmd: &Commands, cfg: &Config, clock: &Clock) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let mut pool = super::open_db(cfg, clock)?;
        LogLogic::print_log(&mut pool)?;
    }

    Ok(())
}
