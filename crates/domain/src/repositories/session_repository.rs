use crate::entities::{Session, SessionToken};
use crate::errors::DomainError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn find(&self, token: &SessionToken) -> Result<Option<Session>, DomainError>;
    /// Inserts the session or points an existing token at a new user.
    async fn upsert(&self, session: &Session) -> Result<(), DomainError>;
    /// Deleting an unknown token is not an error.
    async fn delete(&self, token: &SessionToken) -> Result<(), DomainError>;
}
