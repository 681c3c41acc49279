//! Request client for the lyrics backend
//!
//! The backend exposes five remote operations (artist search, enriched
//! artist search, lyrics by URL, translation and explanation). Everything
//! above this module only sees the [`LyricsApi`] trait and a typed
//! [`ApiError`].

pub mod client;
pub mod models;

pub use client::HttpApi;
pub use models::{ArtistMetadata, EnrichedArtist, SearchResponse, Song, TrackPreview};

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0} returned nothing")]
    Empty(&'static str),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. } | ApiError::Empty(_))
    }
}

#[async_trait]
pub trait LyricsApi: Send + Sync {
    async fn search_artist(&self, artist: &str) -> Result<SearchResponse, ApiError>;

    /// Best-effort third-party profile and top tracks for an artist.
    async fn enhanced_search(&self, artist: &str) -> Result<EnrichedArtist, ApiError>;

    async fn fetch_lyrics(&self, song_url: &str) -> Result<String, ApiError>;

    async fn translate(&self, lyrics: &str) -> Result<String, ApiError>;

    /// Returns markdown.
    async fn explain(&self, lyrics: &str) -> Result<String, ApiError>;

    /// Whether a card image can be loaded.
    async fn check_image(&self, image_url: &str) -> bool;
}
