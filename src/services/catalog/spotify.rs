/// Spotify Web API catalog provider
///
/// Authenticates with the client credentials flow and resolves tracks through
/// the search endpoint.
///
/// API Flow:
/// 1. Token: POST {accounts}/api/token with Basic auth → bearer token
/// 2. Search: GET {api}/search?q="{song} {artist}"&type=track&limit=5
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{ApiSearchResponse, ApiTokenResponse, CatalogToken, TrackMatch},
    services::catalog::{select_candidate, CatalogProvider, SEARCH_LIMIT},
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{Duration as ChronoDuration, Utc};
use reqwest::{Client as HttpClient, StatusCode};
use std::time::Duration;

#[derive(Clone)]
pub struct SpotifyProvider {
    http_client: HttpClient,
    client_id: Option<String>,
    client_secret: Option<String>,
    accounts_url: String,
    api_url: String,
}

impl SpotifyProvider {
    pub fn new(
        client_id: Option<String>,
        client_secret: Option<String>,
        accounts_url: String,
        api_url: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            client_id,
            client_secret,
            accounts_url: accounts_url.trim_end_matches('/').to_string(),
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.spotify_client_id.clone(),
            config.spotify_client_secret.clone(),
            config.spotify_accounts_url.clone(),
            config.spotify_api_url.clone(),
            Duration::from_secs(config.http_timeout_secs),
        )
    }

    /// Client id and secret, if both are configured and non-empty
    fn credentials(&self) -> Option<(&str, &str)> {
        let id = self.client_id.as_deref().filter(|s| !s.is_empty())?;
        let secret = self.client_secret.as_deref().filter(|s| !s.is_empty())?;
        Some((id, secret))
    }

    async fn request_token(&self, client_id: &str, client_secret: &str) -> AppResult<CatalogToken> {
        let url = format!("{}/api/token", self.accounts_url);
        let basic = BASE64.encode(format!("{}:{}", client_id, client_secret));

        let response = self
            .http_client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, format!("Basic {}", basic))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Internal(format!(
                "Token endpoint returned status {}: {}",
                status, body
            )));
        }

        let token: ApiTokenResponse = response.json().await?;
        let expires_at = ChronoDuration::try_seconds(token.expires_in)
            .and_then(|ttl| Utc::now().checked_add_signed(ttl))
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "Token endpoint returned unusable expires_in: {}",
                    token.expires_in
                ))
            })?;

        Ok(CatalogToken {
            access_token: token.access_token,
            expires_at,
        })
    }

    async fn search(&self, query: &str, token: &CatalogToken) -> AppResult<ApiSearchResponse> {
        let url = format!("{}/search", self.api_url);
        let limit = SEARCH_LIMIT.to_string();

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&token.access_token)
            .query(&[("q", query), ("type", "track"), ("limit", limit.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Internal(format!(
                "Search returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl CatalogProvider for SpotifyProvider {
    async fn authenticate(&self) -> Option<CatalogToken> {
        let Some((client_id, client_secret)) = self.credentials() else {
            tracing::info!(
                provider = self.name(),
                "Catalog credentials not configured, skipping enrichment"
            );
            return None;
        };

        match self.request_token(client_id, client_secret).await {
            Ok(token) => {
                tracing::debug!(
                    provider = self.name(),
                    expires_at = %token.expires_at,
                    "Catalog token issued"
                );
                Some(token)
            }
            Err(e) => {
                tracing::warn!(
                    provider = self.name(),
                    error = %e,
                    "Catalog authentication failed, skipping enrichment"
                );
                None
            }
        }
    }

    async fn lookup(
        &self,
        song: &str,
        artist: &str,
        token: Option<&CatalogToken>,
    ) -> Option<TrackMatch> {
        let token = token?;
        if token.is_expired() {
            tracing::debug!(provider = self.name(), "Catalog token expired, skipping lookup");
            return None;
        }

        let query = format!("{} {}", song, artist);
        let results = match self.search(&query, token).await {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!(
                    provider = self.name(),
                    query = %query,
                    error = %e,
                    "Catalog search failed"
                );
                return None;
            }
        };

        let candidates = &results.tracks.items;
        let selected = select_candidate(candidates, artist)?;
        let matched = TrackMatch::from(selected);

        tracing::debug!(
            provider = self.name(),
            query = %query,
            candidates = candidates.len(),
            selected = %selected.name,
            has_cover = matched.cover_image_url.is_some(),
            "Catalog lookup matched"
        );

        Some(matched)
    }

    fn name(&self) -> &'static str {
        "spotify"
    }
}
