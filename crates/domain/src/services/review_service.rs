use crate::entities::Review;
use crate::errors::DomainError;
use crate::forms::ReviewForm;
use crate::repositories::ReviewRepository;
use std::sync::Arc;
use tracing::info;

pub struct ReviewService {
    review_repository: Arc<dyn ReviewRepository>,
}

impl ReviewService {
    pub fn new(review_repository: Arc<dyn ReviewRepository>) -> Self {
        Self { review_repository }
    }

    /// Validate and store a review written by `username`.
    pub async fn submit(
        &self,
        username: &str,
        anime_id: i32,
        form: ReviewForm,
    ) -> Result<Review, DomainError> {
        form.check()?;

        let review = Review::new(username.to_string(), anime_id, form.rating, form.comment);
        let saved = self.review_repository.create(&review).await?;

        info!(
            "{} rated anime {} with {}/10",
            saved.username, saved.anime_id, saved.rating
        );
        Ok(saved)
    }

    pub async fn reviews_for_anime(&self, anime_id: i32) -> Result<Vec<Review>, DomainError> {
        self.review_repository.list_by_anime(anime_id).await
    }

    pub async fn reviews_by_user(&self, username: &str) -> Result<Vec<Review>, DomainError> {
        self.review_repository.list_by_user(username).await
    }
}
