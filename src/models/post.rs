use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: String,
    pub user_id: String,
    pub content: String,
    pub likes: i64,
    pub comments: i64,
    pub created_at: String,
    pub kind: String, // text | image | video | verse | testimony
}
