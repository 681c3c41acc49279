//! Top-level navigator
//!
//! Holds the "which screen" state and wires the controllers together:
//! search outcomes go to the artist session and reset the catalog, and
//! opening a song creates a fresh lyrics session. It never fetches.

use crate::api::{ApiError, SearchResponse, Song};
use crate::app::artist::{ArtistSession, SearchOutcome, SearchTicket};
use crate::app::catalog::Catalog;
use crate::app::lyrics::{LyricsRequest, LyricsSession, SessionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Browsing,
    ReadingLyrics(String),
}

pub struct Navigator {
    screen: Screen,
    artist: ArtistSession,
    catalog: Catalog,
    lyrics: Option<LyricsSession>,
    last_session: SessionId,
}

impl Navigator {
    pub fn new(artist: ArtistSession, catalog: Catalog) -> Self {
        Self {
            screen: Screen::Browsing,
            artist,
            catalog,
            lyrics: None,
            last_session: 0,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn is_browsing(&self) -> bool {
        self.screen == Screen::Browsing
    }

    pub fn artist(&self) -> &ArtistSession {
        &self.artist
    }

    pub fn artist_mut(&mut self) -> &mut ArtistSession {
        &mut self.artist
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Catalog together with the songs it is derived from.
    pub fn catalog_mut(&mut self) -> (&mut Catalog, &[Song]) {
        (&mut self.catalog, self.artist.songs())
    }

    pub fn lyrics(&self) -> Option<&LyricsSession> {
        self.lyrics.as_ref()
    }

    pub fn lyrics_mut(&mut self) -> Option<&mut LyricsSession> {
        self.lyrics.as_mut()
    }

    /// The live session with this id, if it has not been torn down.
    pub fn session_mut(&mut self, id: SessionId) -> Option<&mut LyricsSession> {
        self.lyrics.as_mut().filter(|s| s.id() == id)
    }

    pub fn apply_search(
        &mut self,
        ticket: &SearchTicket,
        result: Result<SearchResponse, ApiError>,
    ) -> SearchOutcome {
        let outcome = self.artist.finish_search(ticket, result);
        if outcome == SearchOutcome::Applied {
            self.catalog.reset();
        }
        outcome
    }

    pub fn select_song(&mut self, song: &Song) -> LyricsRequest {
        self.last_session += 1;
        let (session, request) = LyricsSession::open(self.last_session, &song.url, &song.title);
        self.lyrics = Some(session);
        self.screen = Screen::ReadingLyrics(song.url.clone());
        request
    }

    /// Open the catalog song under the cursor.
    pub fn open_selected(&mut self) -> Option<LyricsRequest> {
        let song = self.catalog.selected_song(self.artist.songs())?.clone();
        Some(self.select_song(&song))
    }

    /// Back to the catalog. The lyrics session is discarded.
    pub fn back(&mut self) {
        if let Some(s) = self.lyrics.take() {
            tracing::debug!(session = s.id(), url = s.song_url(), "lyrics session closed");
        }
        self.screen = Screen::Browsing;
    }
}
