//! HTTP implementation of [`LyricsApi`]
//!
//! All calls are plain JSON over HTTP. Failures carry the backend's
//! `{"error": "..."}` message when there is one, for the log.

use super::models::{
    EnrichedArtist, ErrorBody, ExplanationResponse, LyricsBody, LyricsResponse, SearchResponse,
    TranslationResponse,
};
use super::{ApiError, LyricsApi};
use crate::config::ApiConfig;
use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(cfg: &ApiConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(cfg.user_agent.as_str())
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("build reqwest client")?;

        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str, param: &str, value: &str) -> String {
        format!("{}/{}?{}={}", self.base_url, path, param, urlencoding::encode(value))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = self.client.get(url).send().await?;
        decode(response).await
    }

    async fn post_lyrics<T: DeserializeOwned>(&self, path: &str, lyrics: &str) -> Result<T, ApiError> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(&LyricsBody { lyrics })
            .send()
            .await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(status_error(status.as_u16(), &body));
    }
    Ok(serde_json::from_str(&body)?)
}

fn status_error(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| body.trim().chars().take(200).collect());
    ApiError::Status { status, message }
}

fn non_empty(text: String, operation: &'static str) -> Result<String, ApiError> {
    if text.trim().is_empty() {
        Err(ApiError::Empty(operation))
    } else {
        Ok(text)
    }
}

#[async_trait]
impl LyricsApi for HttpApi {
    async fn search_artist(&self, artist: &str) -> Result<SearchResponse, ApiError> {
        let url = self.endpoint("search_artist", "artist", artist);
        tracing::debug!(%url, "search artist");
        self.get_json(&url).await
    }

    async fn enhanced_search(&self, artist: &str) -> Result<EnrichedArtist, ApiError> {
        let url = self.endpoint("enhanced_search", "artist", artist);
        tracing::debug!(%url, "enhanced search");
        self.get_json(&url).await
    }

    async fn fetch_lyrics(&self, song_url: &str) -> Result<String, ApiError> {
        let url = self.endpoint("get_lyrics", "url", song_url);
        tracing::debug!(%url, "fetch lyrics");
        let res: LyricsResponse = self.get_json(&url).await?;
        non_empty(res.lyrics, "get_lyrics")
    }

    async fn translate(&self, lyrics: &str) -> Result<String, ApiError> {
        let res: TranslationResponse = self.post_lyrics("translate", lyrics).await?;
        non_empty(res.translation, "translate")
    }

    async fn explain(&self, lyrics: &str) -> Result<String, ApiError> {
        let res: ExplanationResponse = self.post_lyrics("explain", lyrics).await?;
        non_empty(res.explanation, "explain")
    }

    async fn check_image(&self, image_url: &str) -> bool {
        match self.client.head(image_url).send().await {
            Ok(r) => r.status().is_success(),
            Err(e) => {
                tracing::debug!(url = image_url, "image check failed: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> HttpApi {
        HttpApi::new(&ApiConfig {
            base_url: "http://localhost:5000/".into(),
            ..ApiConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_encodes_query() {
        let url = api().endpoint("search_artist", "artist", "Guns N' Roses & Co");
        assert_eq!(
            url,
            "http://localhost:5000/search_artist?artist=Guns%20N%27%20Roses%20%26%20Co"
        );
    }

    #[test]
    fn test_status_error_prefers_backend_message() {
        let err = status_error(404, r#"{"error": "Nenhuma música encontrada para este artista."}"#);
        assert!(err.is_not_found());
        assert!(err.to_string().contains("Nenhuma música"));

        let err = status_error(502, "<html>Bad Gateway</html>");
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("Bad Gateway"));
    }

    #[test]
    fn test_blank_text_is_empty() {
        assert!(matches!(non_empty("  \n".into(), "translate"), Err(ApiError::Empty("translate"))));
        assert_eq!(non_empty("ok".into(), "translate").unwrap(), "ok");
    }
}
