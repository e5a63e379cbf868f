use crate::{ApiError, AppState};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use domain::{DomainError, SessionToken, User};

/// Per-request session context, resolved once from the session cookie.
pub struct RequestContext {
    pub token: Option<SessionToken>,
    pub user: Option<User>,
}

impl RequestContext {
    pub fn require_user(&self) -> Result<&User, ApiError> {
        self.user
            .as_ref()
            .ok_or(ApiError::Domain(DomainError::Unauthorized))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for RequestContext {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = state.cookie.read(&parts.headers);
        let user = state.app.session_service.current_user(token.as_ref()).await?;
        Ok(Self { token, user })
    }
}

/// Name and attributes of the session cookie.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    name: String,
    secure: bool,
}

impl SessionCookie {
    pub fn new(name: impl Into<String>, secure: bool) -> Self {
        Self {
            name: name.into(),
            secure,
        }
    }

    pub fn read(&self, headers: &HeaderMap) -> Option<SessionToken> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(key, _)| *key == self.name)
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(SessionToken::from)
    }

    /// `Set-Cookie` value carrying `token`.
    pub fn set(&self, token: &SessionToken) -> String {
        format!("{}={}; {}", self.name, token, self.attributes())
    }

    /// `Set-Cookie` value that expires the cookie.
    pub fn clear(&self) -> String {
        format!("{}=; {}; Max-Age=0", self.name, self.attributes())
    }

    fn attributes(&self) -> &'static str {
        if self.secure {
            "Path=/; HttpOnly; SameSite=Lax; Secure"
        } else {
            "Path=/; HttpOnly; SameSite=Lax"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn finds_the_named_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; anime_session=abc123; lang=en"),
        );

        assert_eq!(
            SessionCookie::new("anime_session", false).read(&headers),
            Some(SessionToken::from("abc123".to_string()))
        );
        assert_eq!(SessionCookie::new("missing", false).read(&headers), None);
    }

    #[test]
    fn empty_cookie_value_is_no_session() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("anime_session="));
        assert_eq!(SessionCookie::new("anime_session", false).read(&headers), None);
    }

    #[test]
    fn secure_attribute_follows_the_flag() {
        let token = SessionToken::from("abc".to_string());

        let plain = SessionCookie::new("anime_session", false);
        assert_eq!(plain.set(&token), "anime_session=abc; Path=/; HttpOnly; SameSite=Lax");
        assert!(!plain.clear().contains("Secure"));

        let secure = SessionCookie::new("anime_session", true);
        assert!(secure.set(&token).ends_with("; Secure"));
        assert!(secure.clear().contains("; Secure; Max-Age=0"));
    }
}
