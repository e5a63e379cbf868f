use crate::entities::Review;
use crate::errors::DomainError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn create(&self, review: &Review) -> Result<Review, DomainError>;
    /// Oldest first.
    async fn list_by_anime(&self, anime_id: i32) -> Result<Vec<Review>, DomainError>;
    async fn list_by_user(&self, username: &str) -> Result<Vec<Review>, DomainError>;
}
