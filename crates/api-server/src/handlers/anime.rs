use crate::extract::{AppJson, AppPath, AppQuery};
use crate::{ApiError, AppState, RequestContext};
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use domain::{BookmarkChange, ReviewForm, SearchForm};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct BookmarkResponse {
    anime_id: i32,
    change: BookmarkChange,
    bookmarks: Vec<String>,
}

pub async fn home(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let listing = state.app.catalog.featured().await?;
    Ok(Json(listing))
}

pub async fn genres(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let genres = state.app.catalog.genres().await?;
    Ok(Json(genres))
}

pub async fn search(
    State(state): State<AppState>,
    AppQuery(form): AppQuery<SearchForm>,
) -> Result<impl IntoResponse, ApiError> {
    let params = form.into_params()?;
    let results = state.app.catalog.search(&params).await?;
    Ok(Json(results))
}

pub async fn anime_detail(
    State(state): State<AppState>,
    AppPath(anime_id): AppPath<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state.app.anime_page(anime_id).await?;
    Ok(Json(page))
}

pub async fn list_reviews(
    State(state): State<AppState>,
    AppPath(anime_id): AppPath<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let reviews = state.app.review_service.reviews_for_anime(anime_id).await?;
    Ok(Json(reviews))
}

pub async fn create_review(
    State(state): State<AppState>,
    AppPath(anime_id): AppPath<i32>,
    ctx: RequestContext,
    AppJson(form): AppJson<ReviewForm>,
) -> Result<impl IntoResponse, ApiError> {
    let user = ctx.require_user()?;
    let review = state
        .app
        .review_service
        .submit(&user.username, anime_id, form)
        .await?;
    Ok((StatusCode::CREATED, Json(review)))
}

pub async fn toggle_bookmark(
    State(state): State<AppState>,
    AppPath(anime_id): AppPath<i32>,
    ctx: RequestContext,
) -> Result<impl IntoResponse, ApiError> {
    let user = ctx.require_user()?;
    let (updated, change) = state
        .app
        .user_service
        .toggle_bookmark(&user.username, &anime_id.to_string())
        .await?;

    Ok(Json(BookmarkResponse {
        anime_id,
        change,
        bookmarks: updated.bookmarks,
    }))
}
