use crate::entities::{NewUser, User, UserChanges};
use crate::errors::DomainError;
use async_trait::async_trait;

/// Repository trait - defines what we need from persistence layer
/// This is a PORT in hexagonal architecture
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    /// Fails with `DomainError::Conflict` on a duplicate username or email.
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;
    async fn update_profile(&self, username: &str, changes: &UserChanges) -> Result<User, DomainError>;
    /// Replaces the whole bookmark list.
    async fn set_bookmarks(&self, username: &str, bookmarks: &[String]) -> Result<User, DomainError>;
    async fn delete(&self, username: &str) -> Result<(), DomainError>;
    async fn count(&self) -> Result<i64, DomainError>;
}
