//! Artist profile from the enriched search
//!
//! Purely additive context next to the song list. It never gates the
//! catalog and failures are only logged.

use crate::api::{ApiError, ArtistMetadata, EnrichedArtist, TrackPreview};

pub const MAX_TOP_TRACKS: usize = 6;
pub const MAX_GENRES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfilePhase {
    #[default]
    Idle,
    Loading,
    Ready,
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileTicket {
    pub generation: u64,
    pub artist: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewCommand {
    Play { track_id: String, url: String },
    Stop,
    /// The track has no preview.
    Unavailable,
}

#[derive(Debug, Default)]
pub struct ArtistProfile {
    generation: u64,
    artist: String,
    phase: ProfilePhase,
    metadata: Option<ArtistMetadata>,
    top_tracks: Vec<TrackPreview>,
    playing: Option<String>,
    selected: usize,
}

impl ArtistProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ProfilePhase {
        self.phase
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn metadata(&self) -> Option<&ArtistMetadata> {
        self.metadata.as_ref()
    }

    pub fn top_tracks(&self) -> &[TrackPreview] {
        &self.top_tracks
    }

    pub fn playing(&self) -> Option<&str> {
        self.playing.as_deref()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_track(&self) -> Option<&TrackPreview> {
        self.top_tracks.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.top_tracks.is_empty() {
            self.selected = (self.selected + 1).min(self.top_tracks.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Start loading the profile for `artist`, superseding any earlier request.
    pub fn begin(&mut self, artist: &str) -> ProfileTicket {
        self.clear();
        self.artist = artist.to_string();
        self.phase = ProfilePhase::Loading;
        ProfileTicket {
            generation: self.generation,
            artist: self.artist.clone(),
        }
    }

    /// Drop the profile; responses still in flight will be ignored.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.artist.clear();
        self.phase = ProfilePhase::Idle;
        self.metadata = None;
        self.top_tracks.clear();
        self.playing = None;
        self.selected = 0;
    }

    /// Returns false when the response belongs to a superseded request.
    pub fn finish(&mut self, ticket: &ProfileTicket, result: Result<EnrichedArtist, ApiError>) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(artist = %ticket.artist, "dropping stale profile");
            return false;
        }

        match result {
            Ok(EnrichedArtist {
                metadata: Some(metadata),
                mut top_tracks,
            }) => {
                top_tracks.truncate(MAX_TOP_TRACKS);
                self.metadata = Some(metadata);
                self.top_tracks = top_tracks;
                self.phase = ProfilePhase::Ready;
            }
            Ok(_) => {
                tracing::debug!(artist = %ticket.artist, "no profile for artist");
                self.phase = ProfilePhase::Unavailable;
            }
            Err(e) => {
                tracing::warn!(artist = %ticket.artist, "profile unavailable: {e}");
                self.phase = ProfilePhase::Unavailable;
            }
        }
        true
    }

    /// Toggle the single preview: same track stops, another track replaces.
    pub fn toggle_preview(&mut self, track_id: &str) -> PreviewCommand {
        if self.playing.as_deref() == Some(track_id) {
            self.playing = None;
            return PreviewCommand::Stop;
        }

        let url = self
            .top_tracks
            .iter()
            .find(|t| t.id == track_id)
            .and_then(|t| t.preview_url.clone())
            .filter(|u| !u.is_empty());

        match url {
            Some(url) => {
                self.playing = Some(track_id.to_string());
                PreviewCommand::Play {
                    track_id: track_id.to_string(),
                    url,
                }
            }
            None => PreviewCommand::Unavailable,
        }
    }

    /// The player stopped on its own (end of preview or error).
    pub fn preview_finished(&mut self) {
        self.playing = None;
    }
}

/// `56000000` -> `56,000,000`
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn genres_line(meta: &ArtistMetadata) -> String {
    if meta.genres.is_empty() {
        "No genres listed".to_string()
    } else {
        meta.genres.iter().take(MAX_GENRES).cloned().collect::<Vec<_>>().join(", ")
    }
}
