use crate::entities::Genre;
use crate::errors::DomainError;
use crate::forms::SearchParams;
use async_trait::async_trait;
use serde_json::Value;

/// External anime metadata source. Documents are passed through untouched;
/// every failure is reported as `DomainError::UpstreamUnavailable`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnimeCatalog: Send + Sync {
    async fn anime_by_id(&self, anime_id: i32) -> Result<Value, DomainError>;
    async fn search(&self, params: &SearchParams) -> Result<Value, DomainError>;
    /// Default listing shown on the home page.
    async fn featured(&self) -> Result<Value, DomainError>;
    async fn genres(&self) -> Result<Vec<Genre>, DomainError>;
}
