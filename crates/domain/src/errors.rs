use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Upstream metadata service unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Credential error: {0}")]
    CredentialError(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl DomainError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, DomainError::Conflict(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound(_))
    }
}

impl From<bcrypt::BcryptError> for DomainError {
    fn from(err: bcrypt::BcryptError) -> Self {
        DomainError::CredentialError(err.to_string())
    }
}

impl From<garde::Report> for DomainError {
    fn from(report: garde::Report) -> Self {
        let message = report
            .iter()
            .map(|(path, error)| format!("{}: {}", path, error))
            .collect::<Vec<_>>()
            .join("; ");
        DomainError::ValidationError(message)
    }
}
