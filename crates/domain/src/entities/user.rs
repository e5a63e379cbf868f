use serde::{Deserialize, Serialize};

/// Core User entity - represents the business domain
///
/// The list fields are held decoded; the delimited storage form only exists
/// in the persistence layer (see [`crate::list_encoding`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password: String, // bcrypt hash, never the plaintext
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub liked_genres: Vec<i32>,
    pub liked_va: Vec<String>,
    pub bookmarks: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookmarkChange {
    Added,
    Removed,
}

impl User {
    pub fn favorite_genres(&self) -> &[i32] {
        &self.liked_genres
    }

    pub fn favorite_voice_actors(&self) -> &[String] {
        &self.liked_va
    }

    pub fn bookmarked_anime(&self) -> &[String] {
        &self.bookmarks
    }

    pub fn has_bookmark(&self, anime_id: &str) -> bool {
        self.bookmarks.iter().any(|b| b == anime_id)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Computes the bookmark list after toggling `anime_id`. Removal drops
    /// every occurrence; addition appends at the end.
    pub fn toggled_bookmarks(&self, anime_id: &str) -> (Vec<String>, BookmarkChange) {
        if self.has_bookmark(anime_id) {
            let remaining = self
                .bookmarks
                .iter()
                .filter(|b| b.as_str() != anime_id)
                .cloned()
                .collect();
            (remaining, BookmarkChange::Removed)
        } else {
            let mut extended = self.bookmarks.clone();
            extended.push(anime_id.to_string());
            (extended, BookmarkChange::Added)
        }
    }
}

/// A user ready to be persisted: input already validated, password already hashed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub liked_genres: Vec<i32>,
}

/// Whitelisted profile changes. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
    }
}
