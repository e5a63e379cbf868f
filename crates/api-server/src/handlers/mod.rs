use axum::{response::IntoResponse, Json};

pub mod anime;
pub mod auth;
pub mod users;

pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
