use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::DomainError;
use serde_json::json;
use tracing::{debug, error};

#[derive(Debug)]
pub enum ApiError {
    Domain(DomainError),
    InvalidCredentials,
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Domain(err) => match err {
                DomainError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
                DomainError::Conflict(_) => StatusCode::CONFLICT,
                DomainError::NotFound(_) => StatusCode::NOT_FOUND,
                DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
                DomainError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
                DomainError::CredentialError(_) | DomainError::RepositoryError(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::InvalidCredentials => "Invalid username or password".to_string(),
            ApiError::Domain(err) if status.is_server_error() => {
                error!("Request failed: {}", err);
                match err {
                    DomainError::UpstreamUnavailable(_) => {
                        "Anime data is unavailable right now".to_string()
                    }
                    _ => "Internal server error".to_string(),
                }
            }
            ApiError::Domain(err) => {
                debug!("Request rejected: {}", err);
                err.to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
