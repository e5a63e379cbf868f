use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: Option<i32>, // None before persistence
    pub anime_id: i32,
    pub rating: i32,
    pub comment: String,
    pub username: String,
}

impl Review {
    /// An absent comment is stored as the empty string, never null.
    pub fn new(username: String, anime_id: i32, rating: i32, comment: Option<String>) -> Self {
        Self {
            id: None,
            anime_id,
            rating,
            comment: comment.unwrap_or_default(),
            username,
        }
    }

    pub fn with_id(id: i32, username: String, anime_id: i32, rating: i32, comment: String) -> Self {
        Self {
            id: Some(id),
            anime_id,
            rating,
            comment,
            username,
        }
    }
}
