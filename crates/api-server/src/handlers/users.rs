use crate::extract::{AppJson, AppQuery};
use crate::{ApiError, AppState, RequestContext};
use axum::{
    extract::State,
    response::IntoResponse,
    Json,
};
use domain::ProfileEditForm;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
}

pub async fn me(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<impl IntoResponse, ApiError> {
    let user = ctx.require_user()?;
    let profile = state.app.profile(&user.username).await?;
    Ok(Json(profile))
}

pub async fn edit_me(
    State(state): State<AppState>,
    ctx: RequestContext,
    AppJson(form): AppJson<ProfileEditForm>,
) -> Result<impl IntoResponse, ApiError> {
    let user = ctx.require_user()?;
    let updated = state.app.user_service.edit_profile(&user.username, form).await?;
    Ok(Json(updated))
}

pub async fn recommendations(
    State(state): State<AppState>,
    ctx: RequestContext,
    AppQuery(query): AppQuery<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let user = ctx.require_user()?;
    let listing = state
        .app
        .recommendations(user, query.page.unwrap_or(1))
        .await?;
    Ok(Json(listing))
}
