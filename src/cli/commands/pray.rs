use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::prayer::PrayerLogic;
use crate::db::queries::{load_prayers, load_users};
use crate::errors::AppResult;
use crate::models::prayer::PrayerCategory;
use crate::services::text::OfflineTextService;
use crate::ui::messages::{header, info, success};
use crate::utils::date::Clock;
use crate::utils::formatting::{bold, wrap_indented};
use std::collections::HashMap;

pub fn handle(cmd: &Commands, cfg: &Config, clock: &Clock) -> AppResult<()> {
    if let Commands::Pray {
        id,
        request,
        category,
        anonymous,
        filter,
    } = cmd
    {
        let pool = super::open_db(cfg, clock)?;
        let (session, mut gate) = super::session_with_gate(&pool, cfg, clock)?;

        if let Some(prayer_id) = id {
            session.require_user()?;
            if let Some(count) = super::guarded(&mut gate, || PrayerLogic::pray(&pool.conn, prayer_id))? {
                success(format!("🙏 Praying with {} others", count - 1));
            }
            return Ok(());
        }

        if let Some(content) = request {
            let user = session.require_user()?;
            let category = PrayerCategory::parse(category)?;
            let encourager = OfflineTextService;
            if let Some((req, encouragement)) = super::guarded(&mut gate, || {
                PrayerLogic::submit(
                    &pool.conn,
                    user,
                    content,
                    category,
                    *anonymous,
                    &encourager,
                    clock.utc_now(),
                )
            })? {
                success(format!("Prayer request {} shared", req.id));
                println!("✨ {}", encouragement);
            }
            return Ok(());
        }

        let filter = filter.as_deref().map(PrayerCategory::parse).transpose()?;
        let prayers = load_prayers(&pool.conn, filter)?;
        if prayers.is_empty() {
            info("No prayer requests yet.");
            return Ok(());
        }

        let names: HashMap<String, String> = load_users(&pool.conn)?
            .into_iter()
            .map(|u| (u.id, u.name))
            .collect();

        header("Community Prayer Wall");
        for p in prayers {
            let author = if p.is_anonymous {
                "Anonymous"
            } else {
                names.get(&p.user_id).map(String::as_str).unwrap_or("Unknown")
            };
            println!("{} · [{}] · {}", bold(author), p.category.as_str(), p.id);
            println!("{}", wrap_indented(&p.content, 72, "  "));
            println!("  🙏 {} praying\n", p.prayer_count);
        }
    }

    Ok(())
}
