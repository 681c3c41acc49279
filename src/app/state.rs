use crate::app::navigator::Navigator;
use crate::app::profile::ArtistProfile;

/// Which browsing pane receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    SearchInput,
    Recent,
    Filter,
    Songs,
    TopTracks,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::SearchInput => Focus::Recent,
            Focus::Recent => Focus::Filter,
            Focus::Filter => Focus::Songs,
            Focus::Songs => Focus::TopTracks,
            Focus::TopTracks => Focus::SearchInput,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::SearchInput => Focus::TopTracks,
            Focus::Recent => Focus::SearchInput,
            Focus::Filter => Focus::Recent,
            Focus::Songs => Focus::Filter,
            Focus::TopTracks => Focus::Songs,
        }
    }

    /// Panes where printable keys edit text.
    pub fn is_text_entry(self) -> bool {
        matches!(self, Focus::SearchInput | Focus::Filter)
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub created_at: std::time::Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

impl Toast {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Info,
            created_at: std::time::Instant::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Error,
            created_at: std::time::Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > std::time::Duration::from_secs(3)
    }
}

pub const APP_TITLE: &str = "lyrebird";

pub struct AppState {
    pub should_quit: bool,
    pub tick: u64,
    pub show_help: bool,

    pub focus: Focus,
    /// Cursor in the recent-searches list.
    pub recent_selected: usize,

    pub nav: Navigator,
    pub profile: ArtistProfile,

    /// Terminal window title, applied by the run loop when it changes.
    pub title: String,

    pub toast: Option<Toast>,
    pub status: String,
}

impl AppState {
    pub fn new(nav: Navigator) -> Self {
        Self {
            should_quit: false,
            tick: 0,
            show_help: false,
            focus: Focus::SearchInput,
            recent_selected: 0,
            nav,
            profile: ArtistProfile::new(),
            title: APP_TITLE.to_string(),
            toast: None,
            status: String::new(),
        }
    }

    pub fn recent_up(&mut self) {
        self.recent_selected = self.recent_selected.saturating_sub(1);
    }

    pub fn recent_down(&mut self) {
        let len = self.nav.artist().recent().terms().len();
        if len > 0 {
            self.recent_selected = (self.recent_selected + 1).min(len - 1);
        }
    }

    pub fn selected_recent(&self) -> Option<String> {
        self.nav.artist().recent().get(self.recent_selected).map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_cycle_round_trips() {
        let mut f = Focus::SearchInput;
        for _ in 0..5 {
            f = f.next();
        }
        assert_eq!(f, Focus::SearchInput);
        assert_eq!(Focus::SearchInput.prev(), Focus::TopTracks);
        assert_eq!(Focus::Songs.prev().next(), Focus::Songs);
        assert!(Focus::Filter.is_text_entry());
        assert!(!Focus::Songs.is_text_entry());
    }
}
