use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::feed::FeedLogic;
use crate::db::queries::{load_likes, load_posts, load_users};
use crate::errors::AppResult;
use crate::services::text::OfflineTextService;
use crate::ui::messages::{header, info, success};
use crate::utils::colors::colorize_count;
use crate::utils::date::Clock;
use crate::utils::formatting::{bold, wrap_indented};
use std::collections::{HashMap, HashSet};

pub fn handle(cmd: &Commands, cfg: &Config, clock: &Clock) -> AppResult<()> {
    if let Commands::Feed { like, post } = cmd {
        let pool = super::open_db(cfg, clock)?;
        let (session, mut gate) = super::session_with_gate(&pool, cfg, clock)?;

        if let Some(post_id) = like {
            let user = session.require_user()?;
            if let Some((p, liked)) = super::guarded(&mut gate, || {
                FeedLogic::toggle_like(&pool.conn, &user.id, post_id)
            })? {
                let verb = if liked { "Liked" } else { "Unliked" };
                success(format!("{} post {} ({} likes)", verb, p.id, p.likes));
            }
            return Ok(());
        }

        if let Some(content) = post {
            let user = session.require_user()?;
            let moderator = OfflineTextService;
            if let Some(p) = super::guarded(&mut gate, || {
                FeedLogic::publish(&pool.conn, user, content, &moderator, clock.utc_now())
            })? {
                success(format!("Post {} published", p.id));
            }
            return Ok(());
        }

        let posts = load_posts(&pool.conn)?;
        if posts.is_empty() {
            info("The feed is empty.");
            return Ok(());
        }

        let names: HashMap<String, String> = load_users(&pool.conn)?
            .into_iter()
            .map(|u| (u.id, u.name))
            .collect();
        let liked = match session.user() {
            Some(u) => load_likes(&pool.conn, &u.id)?,
            None => HashSet::new(),
        };

        header("Community Feed");
        for p in posts {
            let author = names.get(&p.user_id).map(String::as_str).unwrap_or("Unknown");
            let heart = if liked.contains(&p.id) { "♥" } else { "♡" };
            println!("{} · {} · {}", bold(author), p.kind, p.id);
            println!("{}", wrap_indented(&p.content, 72, "  "));
            println!(
                "  {} {}   💬 {}\n",
                heart,
                colorize_count(p.likes),
                colorize_count(p.comments)
            );
        }
    }

    Ok(())
}
