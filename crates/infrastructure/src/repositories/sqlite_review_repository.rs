use crate::database::{reviews, run_blocking, SqlitePool};
use async_trait::async_trait;
use diesel::prelude::*;
use domain::{DomainError, Review, ReviewRepository};

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct ReviewModel {
    id: i32,
    anime_id: i32,
    rating: i32,
    comment: Option<String>,
    username: String,
}

#[derive(Insertable)]
#[diesel(table_name = reviews)]
struct NewReviewModel {
    anime_id: i32,
    rating: i32,
    comment: Option<String>,
    username: String,
}

impl From<ReviewModel> for Review {
    fn from(model: ReviewModel) -> Self {
        Review::with_id(
            model.id,
            model.username,
            model.anime_id,
            model.rating,
            model.comment.unwrap_or_default(),
        )
    }
}

impl From<&Review> for NewReviewModel {
    fn from(review: &Review) -> Self {
        NewReviewModel {
            anime_id: review.anime_id,
            rating: review.rating,
            // Stored as '' rather than NULL when absent
            comment: Some(review.comment.clone()),
            username: review.username.clone(),
        }
    }
}

pub struct SqliteReviewRepository {
    pool: SqlitePool,
}

impl SqliteReviewRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for SqliteReviewRepository {
    async fn create(&self, review: &Review) -> Result<Review, DomainError> {
        let new_review = NewReviewModel::from(review);

        let result = run_blocking(&self.pool, move |conn| {
            diesel::insert_into(reviews::table)
                .values(&new_review)
                .returning(ReviewModel::as_returning())
                .get_result::<ReviewModel>(conn)
        })
        .await?;

        Ok(result.into())
    }

    async fn list_by_anime(&self, anime_id: i32) -> Result<Vec<Review>, DomainError> {
        let result = run_blocking(&self.pool, move |conn| {
            reviews::table
                .filter(reviews::anime_id.eq(anime_id))
                .order(reviews::id.asc())
                .select(ReviewModel::as_select())
                .load::<ReviewModel>(conn)
        })
        .await?;

        Ok(result.into_iter().map(|model| model.into()).collect())
    }

    async fn list_by_user(&self, username: &str) -> Result<Vec<Review>, DomainError> {
        let username = username.to_string();
        let result = run_blocking(&self.pool, move |conn| {
            reviews::table
                .filter(reviews::username.eq(username))
                .order(reviews::id.asc())
                .select(ReviewModel::as_select())
                .load::<ReviewModel>(conn)
        })
        .await?;

        Ok(result.into_iter().map(|model| model.into()).collect())
    }
}
