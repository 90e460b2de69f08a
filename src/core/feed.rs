use crate::db::log::ttlog_soft;
use crate::db::queries::{
    add_like, adjust_likes, find_post, free_post_id, insert_post, load_likes, remove_like,
};
use crate::errors::{AppError, AppResult};
use crate::models::post::Post;
use crate::models::user::User;
use crate::services::text::TextService;
use chrono::{DateTime, Utc};
use rusqlite::Connection;

pub struct FeedLogic;

impl FeedLogic {
    /// Like or unlike a post. The counter never drops below zero.
    pub fn toggle_like(conn: &Connection, user_id: &str, post_id: &str) -> AppResult<(Post, bool)> {
        find_post(conn, post_id)?.ok_or_else(|| AppError::PostNotFound(post_id.to_string()))?;

        let liked_before = load_likes(conn, user_id)?.contains(post_id);

        // like set and counter change together or not at all
        let tx = conn.unchecked_transaction()?;
        if liked_before {
            remove_like(&tx, user_id, post_id)?;
            adjust_likes(&tx, post_id, -1)?;
        } else {
            add_like(&tx, user_id, post_id)?;
            adjust_likes(&tx, post_id, 1)?;
        }
        tx.commit()?;

        let post =
            find_post(conn, post_id)?.ok_or_else(|| AppError::PostNotFound(post_id.to_string()))?;
        ttlog_soft(conn, "like", post_id, if liked_before { "Unliked" } else { "Liked" });

        Ok((post, !liked_before))
    }

    /// Moderate and publish a text post.
    pub fn publish(
        conn: &Connection,
        author: &User,
        content: &str,
        moderator: &dyn TextService,
        now: DateTime<Utc>,
    ) -> AppResult<Post> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::EmptyContent);
        }
        if !moderator.is_content_safe(content) {
            ttlog_soft(conn, "post_rejected", &author.id, "Content failed moderation");
            return Err(AppError::UnsafeContent);
        }

        let post = Post {
            id: free_post_id(conn, now.timestamp_millis())?,
            user_id: author.id.clone(),
            content: content.to_string(),
            likes: 0,
            comments: 0,
            created_at: now.to_rfc3339(),
            kind: "text".to_string(),
        };
        insert_post(conn, &post)?;
        ttlog_soft(conn, "post", &post.id, "Post published");

        Ok(post)
    }
}
