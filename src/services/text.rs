//! Contract with the generative text service (devotionals, moderation,
//! prayer encouragement). Access and time decisions never depend on it.

use crate::models::devotional::Devotional;

pub const DEFAULT_ENCOURAGEMENT: &str = "May God bless you and keep you.";
pub const EMPTY_ENCOURAGEMENT: &str = "God is listening.";

pub trait TextService {
    /// A short devotional, or `None` when the service cannot provide one.
    fn generate_devotional(&self) -> Option<Devotional>;

    /// `true` when `content` is fit for the community. Implementations fail open.
    fn is_content_safe(&self, content: &str) -> bool;

    /// One encouraging sentence for a prayer request in `category`.
    fn prayer_encouragement(&self, category: &str) -> String;
}

/// Behaviour of the service when no API key is configured.
#[derive(Debug, Default, Clone)]
pub struct OfflineTextService;

impl TextService for OfflineTextService {
    fn generate_devotional(&self) -> Option<Devotional> {
        None
    }

    fn is_content_safe(&self, _content: &str) -> bool {
        true
    }

    fn prayer_encouragement(&self, _category: &str) -> String {
        DEFAULT_ENCOURAGEMENT.to_string()
    }
}

/// Replace an empty encouragement with the stock sentence.
pub fn normalize_encouragement(raw: Option<String>) -> String {
    match raw {
        Some(text) if !text.trim().is_empty() => text.trim().to_string(),
        _ => EMPTY_ENCOURAGEMENT.to_string(),
    }
}

/// Parse a devotional stored or returned as a JSON object `{title, verse, content}`.
pub fn parse_devotional(raw: &str) -> Option<Devotional> {
    serde_json::from_str(raw.trim()).ok()
}
