//! Artist session controller
//!
//! Owns the current artist search (term, phase, songs, error) and the
//! recent-search store. Fetches are not performed here: `begin_search`
//! hands out a [`SearchTicket`] that the event loop runs, and the outcome
//! comes back through `finish_search`.

use crate::api::{ApiError, SearchResponse, Song};
use crate::config::SearchOrdering;
use crate::storage::RecentSearches;

pub const SEARCH_FAILED: &str = "Artist not found or the search failed.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Searching,
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub term: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Applied,
    /// A newer search was issued and the ordering policy drops older responses.
    Stale,
}

pub struct ArtistSession {
    /// Visible search-box text.
    input: String,
    /// Last submitted (trimmed) term.
    term: String,
    phase: SearchPhase,
    songs: Vec<Song>,
    error: Option<&'static str>,
    recent: RecentSearches,
    ordering: SearchOrdering,
    issued: u64,
    in_flight: usize,
}

impl ArtistSession {
    pub fn new(recent: RecentSearches, ordering: SearchOrdering) -> Self {
        Self {
            input: String::new(),
            term: String::new(),
            phase: SearchPhase::Idle,
            songs: Vec::new(),
            error: None,
            recent,
            ordering,
            issued: 0,
            in_flight: 0,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut String {
        &mut self.input
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    pub fn recent(&self) -> &RecentSearches {
        &self.recent
    }

    /// Requests issued but not yet resolved.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Start a search for `term`. Blank terms are ignored. A search already
    /// in flight does not block a new one.
    pub fn begin_search(&mut self, term: &str) -> Option<SearchTicket> {
        let term = term.trim();
        if term.is_empty() {
            return None;
        }

        self.issued += 1;
        self.in_flight += 1;
        self.term = term.to_string();
        self.phase = SearchPhase::Searching;
        self.error = None;

        tracing::debug!(seq = self.issued, term, "search issued");
        Some(SearchTicket {
            seq: self.issued,
            term: self.term.clone(),
        })
    }

    /// Same as submitting the input, but also puts `term` in the search box.
    pub fn select_recent(&mut self, term: &str) -> Option<SearchTicket> {
        self.input = term.to_string();
        self.begin_search(term)
    }

    pub fn submit_input(&mut self) -> Option<SearchTicket> {
        let input = self.input.clone();
        self.begin_search(&input)
    }

    pub fn finish_search(
        &mut self,
        ticket: &SearchTicket,
        result: Result<SearchResponse, ApiError>,
    ) -> SearchOutcome {
        self.in_flight = self.in_flight.saturating_sub(1);

        if self.ordering == SearchOrdering::LatestIssued && ticket.seq < self.issued {
            tracing::debug!(seq = ticket.seq, latest = self.issued, "dropping stale search");
            return SearchOutcome::Stale;
        }

        self.term = ticket.term.clone();
        // The backend answers an unknown artist with an empty song list.
        let result = result.and_then(|res| {
            if res.songs.is_empty() {
                Err(ApiError::Empty("search_artist"))
            } else {
                Ok(res)
            }
        });
        match result {
            Ok(res) => {
                tracing::debug!(term = %ticket.term, songs = res.songs.len(), "search resolved");
                self.phase = SearchPhase::Success;
                self.songs = res.songs;
                self.error = None;
                self.recent.add(&ticket.term);
            }
            Err(e) => {
                if e.is_not_found() {
                    tracing::debug!(term = %ticket.term, "artist not found: {e}");
                } else {
                    tracing::warn!(term = %ticket.term, "search failed: {e}");
                }
                self.phase = SearchPhase::Failure;
                self.songs.clear();
                self.error = Some(SEARCH_FAILED);
            }
        }
        SearchOutcome::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;

    fn session(ordering: SearchOrdering) -> ArtistSession {
        let recent = RecentSearches::load(Storage::open_in_memory().unwrap(), 5);
        ArtistSession::new(recent, ordering)
    }

    fn songs(prefix: &str, n: usize) -> Vec<Song> {
        (0..n)
            .map(|i| Song {
                title: format!("{prefix} - Song {i}"),
                url: format!("https://genius.com/{prefix}-song-{i}-lyrics"),
                image_url: None,
            })
            .collect()
    }

    fn ok(artist: &str, n: usize) -> Result<SearchResponse, ApiError> {
        Ok(SearchResponse {
            artist: artist.to_string(),
            songs: songs(artist, n),
        })
    }

    fn failed() -> Result<SearchResponse, ApiError> {
        Err(ApiError::Status {
            status: 404,
            message: "Artista não encontrado".into(),
        })
    }

    #[test]
    fn test_blank_term_is_noop() {
        let mut s = session(SearchOrdering::LastResolved);
        assert!(s.begin_search("   ").is_none());
        assert_eq!(s.phase(), SearchPhase::Idle);
        assert_eq!(s.in_flight(), 0);
    }

    #[test]
    fn test_success_replaces_songs_and_records_term_once() {
        let mut s = session(SearchOrdering::LastResolved);
        let t = s.begin_search("  Adele ").unwrap();
        assert_eq!(t.term, "Adele");
        assert_eq!(s.phase(), SearchPhase::Searching);

        assert_eq!(s.finish_search(&t, ok("Adele", 3)), SearchOutcome::Applied);
        assert_eq!(s.phase(), SearchPhase::Success);
        assert_eq!(s.songs(), songs("Adele", 3).as_slice());
        assert_eq!(s.recent().terms(), ["Adele"]);

        let t = s.begin_search("Adele").unwrap();
        s.finish_search(&t, ok("Adele", 3));
        assert_eq!(s.recent().terms(), ["Adele"]);

        let t = s.begin_search("Coldplay").unwrap();
        s.finish_search(&t, ok("Coldplay", 2));
        assert_eq!(s.recent().terms(), ["Coldplay", "Adele"]);
        assert_eq!(s.songs().len(), 2);
    }

    #[test]
    fn test_failure_clears_songs_with_fixed_message() {
        let mut s = session(SearchOrdering::LastResolved);
        let t = s.begin_search("Adele").unwrap();
        s.finish_search(&t, ok("Adele", 3));

        let t = s.begin_search("Nobody").unwrap();
        s.finish_search(&t, failed());
        assert_eq!(s.phase(), SearchPhase::Failure);
        assert!(s.songs().is_empty());
        assert_eq!(s.error(), Some(SEARCH_FAILED));
        assert_eq!(s.recent().terms(), ["Adele"]);

        // Retrying clears the error while in flight.
        s.begin_search("Adele").unwrap();
        assert_eq!(s.error(), None);
    }

    #[test]
    fn test_last_resolved_wins_by_default() {
        let mut s = session(SearchOrdering::LastResolved);
        let first = s.begin_search("Adele").unwrap();
        let second = s.begin_search("Coldplay").unwrap();
        assert_eq!(s.in_flight(), 2);

        s.finish_search(&second, ok("Coldplay", 2));
        assert_eq!(s.finish_search(&first, ok("Adele", 3)), SearchOutcome::Applied);

        assert_eq!(s.term(), "Adele");
        assert_eq!(s.songs().len(), 3);
        assert_eq!(s.in_flight(), 0);
    }

    #[test]
    fn test_latest_issued_drops_older_responses() {
        let mut s = session(SearchOrdering::LatestIssued);
        let first = s.begin_search("Adele").unwrap();
        let second = s.begin_search("Coldplay").unwrap();

        s.finish_search(&second, ok("Coldplay", 2));
        assert_eq!(s.finish_search(&first, ok("Adele", 3)), SearchOutcome::Stale);

        assert_eq!(s.term(), "Coldplay");
        assert_eq!(s.songs().len(), 2);
        assert_eq!(s.recent().terms(), ["Coldplay"]);
    }

    #[test]
    fn test_select_recent_updates_input() {
        let mut s = session(SearchOrdering::LastResolved);
        s.input_mut().push_str("Col");
        let t = s.select_recent("Adele").unwrap();
        assert_eq!(s.input(), "Adele");
        assert_eq!(t.term, "Adele");
    }

    #[test]
    fn test_empty_song_list_is_not_found() {
        let mut s = session(SearchOrdering::LastResolved);
        for artist in ["Adele", "Coldplay", "Muse", "Queen"] {
            let t = s.begin_search(artist).unwrap();
            s.finish_search(&t, ok(artist, 2));
        }

        for typo in ["adlee", "qeeun"] {
            let t = s.begin_search(typo).unwrap();
            assert_eq!(s.finish_search(&t, ok(typo, 0)), SearchOutcome::Applied);
            assert_eq!(s.phase(), SearchPhase::Failure);
            assert_eq!(s.error(), Some(SEARCH_FAILED));
            assert!(s.songs().is_empty());
        }
        assert_eq!(s.recent().terms(), ["Queen", "Muse", "Coldplay", "Adele"]);
    }
}
