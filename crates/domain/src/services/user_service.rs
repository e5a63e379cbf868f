use crate::entities::{BookmarkChange, NewUser, User};
use crate::errors::DomainError;
use crate::forms::{check_bookmark_id, LoginForm, ProfileEditForm, SignupForm};
use crate::repositories::UserRepository;
use crate::services::CredentialService;
use std::sync::Arc;
use tracing::{debug, info};

/// User Service - account lifecycle, credentials and bookmarks
pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
    credentials: CredentialService,
}

impl UserService {
    pub fn new(user_repository: Arc<dyn UserRepository>, credentials: CredentialService) -> Self {
        Self {
            user_repository,
            credentials,
        }
    }

    /// Create a new account from a signup form
    pub async fn register(&self, form: SignupForm) -> Result<User, DomainError> {
        let form = form.into_valid()?;
        let username = form.username;
        let email = form.email;

        // Friendlier messages than the store's constraint error; the unique
        // constraints still decide under a race.
        if self.user_repository.find_by_username(&username).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "Username '{}' is already taken",
                username
            )));
        }
        if self.user_repository.find_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "E-mail '{}' is already registered",
                email
            )));
        }

        let new_user = NewUser {
            username,
            email,
            first_name: form.first_name,
            last_name: form.last_name,
            password_hash: self.credentials.hash(&form.password)?,
            liked_genres: form.liked_genres,
        };

        let user = self.user_repository.create(&new_user).await?;
        info!("Registered user {}", user.username);
        Ok(user)
    }

    /// Returns the user only when the password verifies. Unknown usernames
    /// and wrong passwords both come back as `None`.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        match self.user_repository.find_by_username(username).await? {
            Some(user) if self.credentials.verify(password, &user.password) => Ok(Some(user)),
            Some(_) => {
                debug!("Password mismatch for user {}", username);
                Ok(None)
            }
            None => {
                debug!("Login attempt for unknown user {}", username);
                Ok(None)
            }
        }
    }

    pub async fn login(&self, form: LoginForm) -> Result<Option<User>, DomainError> {
        let form = form.into_valid()?;
        self.authenticate(&form.username, &form.password).await
    }

    pub async fn get_user(&self, username: &str) -> Result<User, DomainError> {
        self.user_repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("User '{}'", username)))
    }

    pub async fn find_user(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.user_repository.find_by_username(username).await
    }

    /// Partial profile update; omitted fields keep their value.
    pub async fn edit_profile(
        &self,
        username: &str,
        form: ProfileEditForm,
    ) -> Result<User, DomainError> {
        let changes = form.into_changes()?;
        let existing = self.get_user(username).await?;

        if changes.is_empty() {
            return Ok(existing);
        }

        if let Some(new_username) = &changes.username {
            if *new_username != existing.username
                && self.user_repository.find_by_username(new_username).await?.is_some()
            {
                return Err(DomainError::Conflict(format!(
                    "Username '{}' is already taken",
                    new_username
                )));
            }
        }

        if let Some(new_email) = &changes.email {
            if let Some(owner) = self.user_repository.find_by_email(new_email).await? {
                if owner.username != existing.username {
                    return Err(DomainError::Conflict(format!(
                        "E-mail '{}' is already registered",
                        new_email
                    )));
                }
            }
        }

        let updated = self.user_repository.update_profile(username, &changes).await?;
        info!("Updated profile of {} (now {})", username, updated.username);
        Ok(updated)
    }

    /// Replaces the full bookmark list.
    pub async fn set_bookmarks(
        &self,
        username: &str,
        bookmarks: Vec<String>,
    ) -> Result<User, DomainError> {
        for bookmark in &bookmarks {
            check_bookmark_id(bookmark)?;
        }
        self.user_repository.set_bookmarks(username, &bookmarks).await
    }

    /// Read-modify-write of the bookmark list. Two concurrent toggles for the
    /// same user can lose one of the updates.
    pub async fn toggle_bookmark(
        &self,
        username: &str,
        anime_id: &str,
    ) -> Result<(User, BookmarkChange), DomainError> {
        check_bookmark_id(anime_id)?;

        let user = self.get_user(username).await?;
        let (bookmarks, change) = user.toggled_bookmarks(anime_id);
        let updated = self.user_repository.set_bookmarks(username, &bookmarks).await?;

        debug!("Bookmark {} {:?} for {}", anime_id, change, username);
        Ok((updated, change))
    }

    pub async fn delete_user(&self, username: &str) -> Result<(), DomainError> {
        self.get_user(username).await?;
        self.user_repository.delete(username).await
    }
}
