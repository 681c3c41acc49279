use serde::{Deserialize, Serialize};

/// A song as returned by the artist search. `url` is both the identity and
/// the key used to fetch its lyrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Composite "artist - song" title.
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Song {
    /// Cover image, treating the backend's empty string as absent.
    pub fn image(&self) -> Option<&str> {
        self.image_url.as_deref().filter(|u| !u.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub songs: Vec<Song>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistMetadata {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    /// 0..=100
    #[serde(default)]
    pub popularity: u8,
    #[serde(default)]
    pub followers: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackPreview {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub album_name: String,
    #[serde(default, rename = "album_image")]
    pub album_image_url: Option<String>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default, rename = "spotify_url")]
    pub external_url: String,
    #[serde(default)]
    pub release_date: Option<String>,
}

/// Third-party artist context returned by `enhanced_search`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedArtist {
    #[serde(default, rename = "spotify_info")]
    pub metadata: Option<ArtistMetadata>,
    #[serde(default, rename = "spotify_top_tracks")]
    pub top_tracks: Vec<TrackPreview>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LyricsResponse {
    #[serde(default)]
    pub lyrics: String,
    #[allow(dead_code)]
    #[serde(default)]
    pub cached: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TranslationResponse {
    #[serde(default)]
    pub translation: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ExplanationResponse {
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct LyricsBody<'a> {
    pub lyrics: &'a str,
}
