use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::devotional::{DevotionalLogic, DevotionalSource};
use crate::errors::AppResult;
use crate::services::text::OfflineTextService;
use crate::ui::messages::header;
use crate::utils::date::Clock;
use crate::utils::formatting::{bold, italic, wrap_indented};

pub fn handle(cmd: &Commands, cfg: &Config, clock: &Clock) -> AppResult<()> {
    if let Commands::Devotional { refresh } = cmd {
        let pool = super::open_db(cfg, clock)?;
        let (devotional, source) =
            DevotionalLogic::today(&pool.conn, &OfflineTextService, clock.today(), *refresh)?;

        header("Daily Devotional");
        println!("{}", bold(&devotional.title));
        println!("{}\n", italic(&devotional.verse));
        println!("{}", wrap_indented(&devotional.content, 72, ""));

        if source == DevotionalSource::Cached {
            println!("\n(saved earlier today)");
        }
    }

    Ok(())
}
