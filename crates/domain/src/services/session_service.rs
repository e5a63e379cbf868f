use crate::entities::{Session, SessionState, SessionToken, User};
use crate::errors::DomainError;
use crate::repositories::{SessionRepository, UserRepository};
use std::sync::Arc;
use tracing::{debug, info};

/// Session/auth layer: maps session tokens to live users.
pub struct SessionService {
    session_repository: Arc<dyn SessionRepository>,
    user_repository: Arc<dyn UserRepository>,
}

impl SessionService {
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        user_repository: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            session_repository,
            user_repository,
        }
    }

    /// Authenticates the session as `user`. A live `current` token is kept
    /// only when it already belongs to `user`; any other token is deleted and
    /// a fresh one issued.
    pub async fn login(
        &self,
        current: Option<&SessionToken>,
        user: &User,
    ) -> Result<SessionToken, DomainError> {
        let existing = match current {
            Some(token) => self.session_repository.find(token).await?,
            None => None,
        };

        let token = match existing {
            Some(session) if session.username == user.username => session.token,
            Some(session) => {
                debug!("Rotating session of {} on login", session.username);
                self.session_repository.delete(&session.token).await?;
                SessionToken::generate()
            }
            None => SessionToken::generate(),
        };

        self.session_repository
            .upsert(&Session::new(token.clone(), user.username.clone()))
            .await?;

        info!("User {} logged in", user.username);
        Ok(token)
    }

    /// No-op when already anonymous.
    pub async fn logout(&self, token: Option<&SessionToken>) -> Result<(), DomainError> {
        if let Some(token) = token {
            self.session_repository.delete(token).await?;
            debug!("Session closed");
        }
        Ok(())
    }

    /// The live user behind `token`, or `None` for a missing, unknown or
    /// dangling session.
    pub async fn current_user(
        &self,
        token: Option<&SessionToken>,
    ) -> Result<Option<User>, DomainError> {
        let Some(token) = token else {
            return Ok(None);
        };

        let Some(session) = self.session_repository.find(token).await? else {
            return Ok(None);
        };

        let user = self.user_repository.find_by_username(&session.username).await?;
        if user.is_none() {
            debug!("Session points at missing user {}", session.username);
        }
        Ok(user)
    }

    pub async fn state(&self, token: Option<&SessionToken>) -> Result<SessionState, DomainError> {
        Ok(match self.current_user(token).await? {
            Some(user) => SessionState::Authenticated(user.username),
            None => SessionState::Anonymous,
        })
    }
}
