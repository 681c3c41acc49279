use crate::api::{ApiError, EnrichedArtist, SearchResponse};
use crate::app::artist::SearchTicket;
use crate::app::lyrics::{AnnotationKind, SessionId};
use crate::app::profile::ProfileTicket;

#[derive(Debug)]
pub enum Event {
    Input(InputEvent),
    Player(PlayerEvent),
    Network(NetworkEvent),
    Tick,
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    Key(crossterm::event::KeyEvent),
    Mouse(crossterm::event::MouseEvent),
    Resize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    /// The preview played to the end.
    Ended,
    Error(String),
}

/// Outcome of a fetch, tagged with whatever the receiving controller needs
/// to recognise a stale response.
#[derive(Debug)]
pub enum NetworkEvent {
    SearchFinished {
        ticket: SearchTicket,
        result: Result<SearchResponse, ApiError>,
    },
    ProfileFinished {
        ticket: ProfileTicket,
        result: Result<EnrichedArtist, ApiError>,
    },
    LyricsFinished {
        session: SessionId,
        result: Result<String, ApiError>,
    },
    AnnotationFinished {
        session: SessionId,
        kind: AnnotationKind,
        result: Result<String, ApiError>,
    },
    ImageChecked {
        generation: u64,
        index: usize,
        ok: bool,
    },
}
