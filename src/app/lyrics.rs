//! Lyrics session controller
//!
//! One session per opened song. It holds the lyrics fetch state and a
//! single annotation slot (translation or explanation). Only one
//! annotation request may be pending at a time.

use crate::api::ApiError;
use crate::app::catalog::split_title;

pub const LYRICS_FAILED: &str = "Could not load the lyrics for this song.";
pub const TRANSLATION_FAILED: &str = "Could not translate the lyrics. Please try again.";
pub const EXPLANATION_FAILED: &str = "Could not explain the lyrics. Please try again.";

pub type SessionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LyricsPhase {
    Loading,
    Ready,
    Failure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    Translation,
    Explanation,
}

impl AnnotationKind {
    pub fn label(self) -> &'static str {
        match self {
            AnnotationKind::Translation => "Translation",
            AnnotationKind::Explanation => "Explanation",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            AnnotationKind::Translation => TRANSLATION_FAILED,
            AnnotationKind::Explanation => EXPLANATION_FAILED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Annotation {
    #[default]
    Idle,
    Pending(AnnotationKind),
    Ready { kind: AnnotationKind, text: String },
    Failure(AnnotationKind),
}

impl Annotation {
    pub fn kind(&self) -> Option<AnnotationKind> {
        match self {
            Annotation::Idle => None,
            Annotation::Pending(k) | Annotation::Failure(k) => Some(*k),
            Annotation::Ready { kind, .. } => Some(*kind),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Annotation::Pending(_))
    }

    /// Text to display: the result, or the fixed failure message.
    pub fn text(&self) -> Option<&str> {
        match self {
            Annotation::Ready { text, .. } => Some(text.as_str()),
            Annotation::Failure(k) => Some(k.failure_message()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricsRequest {
    pub session: SessionId,
    pub song_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRequest {
    pub session: SessionId,
    pub kind: AnnotationKind,
    pub lyrics: String,
}

#[derive(Debug, Clone)]
pub struct LyricsSession {
    id: SessionId,
    song_url: String,
    artist: String,
    title: String,
    phase: LyricsPhase,
    text: String,
    annotation: Annotation,
    pub scroll: u16,
    pub annotation_scroll: u16,
}

impl LyricsSession {
    /// New session in `Loading`, plus the lyrics fetch it needs.
    pub fn open(id: SessionId, song_url: &str, song_title: &str) -> (Self, LyricsRequest) {
        let (artist, title) = split_title(song_title);
        let session = Self {
            id,
            song_url: song_url.to_string(),
            artist,
            title,
            phase: LyricsPhase::Loading,
            text: String::new(),
            annotation: Annotation::Idle,
            scroll: 0,
            annotation_scroll: 0,
        };
        let request = LyricsRequest {
            session: id,
            song_url: song_url.to_string(),
        };
        tracing::debug!(session = id, url = song_url, "lyrics session opened");
        (session, request)
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn song_url(&self) -> &str {
        &self.song_url
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn phase(&self) -> LyricsPhase {
        self.phase
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn error(&self) -> Option<&'static str> {
        (self.phase == LyricsPhase::Failure).then_some(LYRICS_FAILED)
    }

    pub fn annotation(&self) -> &Annotation {
        &self.annotation
    }

    pub fn finish_lyrics(&mut self, result: Result<String, ApiError>) {
        match result {
            Ok(text) => {
                self.text = text;
                self.phase = LyricsPhase::Ready;
            }
            Err(e) => {
                tracing::warn!(url = %self.song_url, "lyrics fetch failed: {e}");
                self.text.clear();
                self.phase = LyricsPhase::Failure;
            }
        }
    }

    /// Request an annotation. Rejected while another one is pending or
    /// when there are no lyrics to annotate.
    pub fn annotate(&mut self, kind: AnnotationKind) -> Option<AnnotationRequest> {
        if self.annotation.is_pending() {
            tracing::debug!(session = self.id, ?kind, "annotation already pending");
            return None;
        }
        if self.phase != LyricsPhase::Ready {
            return None;
        }

        self.annotation = Annotation::Pending(kind);
        self.annotation_scroll = 0;
        Some(AnnotationRequest {
            session: self.id,
            kind,
            lyrics: self.text.clone(),
        })
    }

    pub fn finish_annotation(&mut self, kind: AnnotationKind, result: Result<String, ApiError>) {
        if self.annotation != Annotation::Pending(kind) {
            tracing::debug!(session = self.id, ?kind, "annotation not pending, ignoring");
            return;
        }
        self.annotation = match result {
            Ok(text) => Annotation::Ready { kind, text },
            Err(e) => {
                tracing::warn!(session = self.id, ?kind, "annotation failed: {e}");
                Annotation::Failure(kind)
            }
        };
    }
}
