//! Validated input for every user-facing operation.
//!
//! Forms are deserialized straight from request bodies or query strings and
//! must pass `validate` before anything reaches a repository. Repositories
//! assume their input has been through here and do not check it again.

use crate::entities::UserChanges;
use crate::errors::DomainError;
use crate::list_encoding;
use garde::Validate;
use serde::{Deserialize, Serialize};

fn invalid(message: impl Into<String>) -> DomainError {
    DomainError::ValidationError(message.into())
}

fn check_username(username: &str) -> Result<(), DomainError> {
    if username.chars().any(char::is_whitespace) {
        return Err(invalid("Username cannot contain whitespace"));
    }
    Ok(())
}

fn trimmed(value: String) -> String {
    value.trim().to_string()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(trimmed).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupForm {
    #[garde(length(chars, min = 1, max = 64))]
    pub username: String,
    #[garde(length(chars, min = 6))]
    pub password: String,
    #[garde(email)]
    pub email: String,
    #[garde(length(chars, min = 1, max = 64))]
    pub first_name: String,
    #[garde(length(chars, min = 1, max = 64))]
    pub last_name: String,
    #[serde(default)]
    #[garde(length(min = 1))]
    pub liked_genres: Vec<i32>,
}

impl SignupForm {
    /// Trims the text fields and checks every rule. The password is taken as typed.
    pub fn into_valid(self) -> Result<Self, DomainError> {
        let form = Self {
            username: trimmed(self.username),
            email: trimmed(self.email),
            first_name: trimmed(self.first_name),
            last_name: trimmed(self.last_name),
            ..self
        };

        form.validate()?;
        check_username(&form.username)?;
        Ok(form)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginForm {
    #[garde(length(min = 1))]
    pub username: String,
    #[garde(length(chars, min = 6))]
    pub password: String,
}

impl LoginForm {
    pub fn into_valid(self) -> Result<Self, DomainError> {
        let form = Self {
            username: trimmed(self.username),
            ..self
        };
        form.validate()?;
        Ok(form)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReviewForm {
    #[garde(range(min = 1, max = 10))]
    pub rating: i32,
    #[serde(default)]
    #[garde(length(chars, max = 200))]
    pub comment: Option<String>,
}

impl ReviewForm {
    pub fn check(&self) -> Result<(), DomainError> {
        Ok(self.validate()?)
    }
}

/// Profile edit. Blank fields mean "keep the current value"; there is no
/// way to clear a field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProfileEditForm {
    #[serde(default)]
    #[garde(length(chars, max = 64))]
    pub username: Option<String>,
    #[serde(default)]
    #[garde(email)]
    pub email: Option<String>,
    #[serde(default)]
    #[garde(length(chars, max = 64))]
    pub first_name: Option<String>,
    #[serde(default)]
    #[garde(length(chars, max = 64))]
    pub last_name: Option<String>,
}

impl ProfileEditForm {
    pub fn into_changes(self) -> Result<UserChanges, DomainError> {
        let form = Self {
            username: non_blank(self.username),
            email: non_blank(self.email),
            first_name: non_blank(self.first_name),
            last_name: non_blank(self.last_name),
        };

        form.validate()?;
        if let Some(username) = &form.username {
            check_username(username)?;
        }

        Ok(UserChanges {
            username: form.username,
            email: form.email,
            first_name: form.first_name,
            last_name: form.last_name,
        })
    }
}

/// Query-string input for the anime search. `genres` is a comma-separated
/// list of genre ids, as the upstream takes it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SearchForm {
    #[serde(default)]
    #[garde(skip)]
    pub q: Option<String>,
    #[serde(default)]
    #[garde(skip)]
    pub genres: Option<String>,
    #[serde(default)]
    #[garde(range(min = 1))]
    pub page: Option<u32>,
}

fn parse_genre_ids(raw: &str) -> Result<Vec<i32>, DomainError> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            id.parse::<i32>()
                .map_err(|_| invalid(format!("'{}' is not a genre id", id)))
        })
        .collect()
}

impl SearchForm {
    pub fn into_params(self) -> Result<SearchParams, DomainError> {
        self.validate()?;

        let genres = match self.genres.as_deref() {
            Some(raw) => parse_genre_ids(raw)?,
            None => Vec::new(),
        };

        Ok(SearchParams {
            query: non_blank(self.q),
            genres,
            page: self.page.unwrap_or(1),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub query: Option<String>,
    pub genres: Vec<i32>,
    pub page: u32,
}

impl SearchParams {
    pub fn by_genres(genres: &[i32], page: u32) -> Self {
        Self {
            query: None,
            genres: genres.to_vec(),
            page: page.max(1),
        }
    }
}

/// Bookmark ids arrive as path segments; they end up in a delimited column.
pub fn check_bookmark_id(anime_id: &str) -> Result<(), DomainError> {
    list_encoding::check_value(anime_id)
}
