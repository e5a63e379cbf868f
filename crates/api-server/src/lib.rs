use application::AnimeReviewApp;
use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

pub mod context;
pub mod error;
pub mod extract;
pub mod handlers;

pub use context::{RequestContext, SessionCookie};
pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub app: Arc<AnimeReviewApp>,
    pub cookie: Arc<SessionCookie>,
}

impl AppState {
    pub fn new(app: Arc<AnimeReviewApp>, cookie: SessionCookie) -> Self {
        Self {
            app,
            cookie: Arc::new(cookie),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        // Account endpoints
        .route("/api/signup", post(handlers::auth::signup))
        .route("/api/login", post(handlers::auth::login))
        .route("/api/logout", post(handlers::auth::logout))
        .route(
            "/api/me",
            get(handlers::users::me).patch(handlers::users::edit_me),
        )
        .route("/api/recommendations", get(handlers::users::recommendations))

        // Upstream catalog endpoints
        .route("/api/home", get(handlers::anime::home))
        .route("/api/genres", get(handlers::anime::genres))
        .route("/api/anime/search", get(handlers::anime::search))
        .route("/api/anime/:id", get(handlers::anime::anime_detail))

        // Reviews and bookmarks
        .route(
            "/api/anime/:id/reviews",
            get(handlers::anime::list_reviews).post(handlers::anime::create_review),
        )
        .route("/api/anime/:id/bookmark", post(handlers::anime::toggle_bookmark))

        // Health check
        .route("/health", get(handlers::health_check))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache, no-store, must-revalidate"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::PRAGMA,
            HeaderValue::from_static("no-cache"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::EXPIRES,
            HeaderValue::from_static("0"),
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
