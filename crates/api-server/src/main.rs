use anyhow::Result;
use api_server::{router, AppState, SessionCookie};
use application::AnimeReviewApp;
use config::AppConfig;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = AppConfig::from_env()?;

    // Initialize tracing; RUST_LOG wins over LOG_FILTER
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting anime review API server");
    info!("Using database: {}", config.database_path);
    info!("Upstream metadata: {}", config.upstream_api_url);

    let app = Arc::new(AnimeReviewApp::new(&config)?);
    let cookie = SessionCookie::new(&config.session_cookie, config.session_cookie_secure);
    let app_state = AppState::new(app, cookie);

    let bind_address = config.api_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("API Server listening on http://{}", bind_address);
    info!("   POST  /api/signup               - Create account and log in");
    info!("   POST  /api/login                - Log in");
    info!("   POST  /api/logout               - Log out");
    info!("   GET   /api/me                   - Current user and their reviews");
    info!("   PATCH /api/me                   - Edit profile");
    info!("   GET   /api/recommendations      - Anime in your liked genres");
    info!("   GET   /api/home                 - Featured anime");
    info!("   GET   /api/genres               - Genre taxonomy");
    info!("   GET   /api/anime/search         - Search (q, genre, page)");
    info!("   GET   /api/anime/:id            - Anime details with reviews");
    info!("   GET   /api/anime/:id/reviews    - Reviews for an anime");
    info!("   POST  /api/anime/:id/reviews    - Review an anime");
    info!("   POST  /api/anime/:id/bookmark   - Toggle bookmark");
    info!("   GET   /health                   - Health check");

    axum::serve(listener, router(app_state)).await?;

    Ok(())
}
