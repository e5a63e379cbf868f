use super::dto::JikanGenreListResponse;
use async_trait::async_trait;
use domain::{AnimeCatalog, DomainError, Genre, SearchParams};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Pass-through client for the Jikan v4 REST API. No caching, no retries.
pub struct JikanClient {
    client: Client,
    base_url: String,
}

fn unavailable(err: impl std::fmt::Display) -> DomainError {
    DomainError::UpstreamUnavailable(err.to_string())
}

impl JikanClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("anime-review/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(unavailable)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, DomainError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                warn!("Upstream request to {} failed: {}", url, e);
                unavailable(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Upstream {} answered {}", url, status);
            return Err(DomainError::UpstreamUnavailable(format!(
                "{} answered {}",
                url, status
            )));
        }

        response.json::<T>().await.map_err(unavailable)
    }
}

/// Only the parameters the caller supplied are sent.
pub fn search_query(params: &SearchParams) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();

    if let Some(q) = &params.query {
        query.push(("q", q.clone()));
    }
    if !params.genres.is_empty() {
        let genres: Vec<String> = params.genres.iter().map(i32::to_string).collect();
        query.push(("genres", genres.join(",")));
    }
    query.push(("page", params.page.to_string()));

    query
}

#[async_trait]
impl AnimeCatalog for JikanClient {
    async fn anime_by_id(&self, anime_id: i32) -> Result<Value, DomainError> {
        self.get_json(&format!("/anime/{}", anime_id), &[]).await
    }

    async fn search(&self, params: &SearchParams) -> Result<Value, DomainError> {
        self.get_json("/anime", &search_query(params)).await
    }

    async fn featured(&self) -> Result<Value, DomainError> {
        self.get_json("/anime", &[]).await
    }

    async fn genres(&self) -> Result<Vec<Genre>, DomainError> {
        let response: JikanGenreListResponse = self.get_json("/genres/anime", &[]).await?;
        Ok(response.data.into_iter().map(Genre::from).collect())
    }
}
