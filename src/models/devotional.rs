use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Devotional {
    pub title: String,
    pub verse: String,
    pub content: String,
}

impl Devotional {
    /// Shown when the text service has nothing to offer. Not cached.
    pub fn fallback() -> Self {
        Self {
            title: "The Peace of Sabbath".to_string(),
            verse: "Exodus 20:8 - Remember the sabbath day, to keep it holy.".to_string(),
            content: "Rest is not just the absence of work; it is the presence of God. Today, let us find true restoration in His promises.".to_string(),
        }
    }
}
