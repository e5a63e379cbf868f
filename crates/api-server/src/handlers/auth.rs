use crate::extract::AppJson;
use crate::{ApiError, AppState, RequestContext};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{AppendHeaders, IntoResponse},
    Json,
};
use domain::{LoginForm, SignupForm};
use tracing::info;

pub async fn signup(
    State(state): State<AppState>,
    ctx: RequestContext,
    AppJson(form): AppJson<SignupForm>,
) -> Result<impl IntoResponse, ApiError> {
    let (user, token) = state.app.sign_up(ctx.token.as_ref(), form).await?;
    info!("New account {}", user.username);

    Ok((
        StatusCode::CREATED,
        AppendHeaders([(header::SET_COOKIE, state.cookie.set(&token))]),
        Json(user),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    ctx: RequestContext,
    AppJson(form): AppJson<LoginForm>,
) -> Result<impl IntoResponse, ApiError> {
    let (user, token) = state
        .app
        .log_in(ctx.token.as_ref(), form)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    Ok((
        AppendHeaders([(header::SET_COOKIE, state.cookie.set(&token))]),
        Json(user),
    ))
}

/// Always succeeds, even for anonymous callers.
pub async fn logout(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<impl IntoResponse, ApiError> {
    state.app.session_service.logout(ctx.token.as_ref()).await?;
    if let Some(user) = &ctx.user {
        info!("User {} logged out", user.username);
    }

    Ok((
        StatusCode::NO_CONTENT,
        AppendHeaders([(header::SET_COOKIE, state.cookie.clear())]),
    ))
}
