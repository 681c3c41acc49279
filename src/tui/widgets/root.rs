//! Root layout
//!
//! Browsing:
//! ┌ Artist ─────────────────────────────────────────────┐
//! ├ Filter ───────────────────────┬ Recent ─────────────┤
//! │ Songs                         ├ Artist profile ─────┤
//! │                               │  top tracks         │
//! ├───────────────────────────────┴─────────────────────┤
//! │ status                                              │
//!
//! Reading lyrics:
//! ┌ heading ────────────────────────────────────────────┐
//! ├ lyrics ───────────────────┬ translation/explanation ┤
//! │ status                                              │

use crate::app::navigator::Screen;
use crate::app::state::{AppState, ToastKind};
use crate::tui::theme::get_theme;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::{catalog, help, lyrics, profile, search};

const BROWSING_HINTS: &str = "/ search  f filter  Enter open  ? help  q quit";
const READING_HINTS: &str = "t translate  e explain  J/K scroll notes  Esc back";

pub fn render(frame: &mut Frame, state: &mut AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(1)])
        .split(frame.area());

    let reading = match (state.nav.screen(), state.nav.lyrics()) {
        (Screen::ReadingLyrics(_), Some(session)) => {
            render_reading(frame, state, session, rows[0]);
            true
        }
        _ => {
            render_browsing(frame, state, rows[0]);
            false
        }
    };
    render_status(frame, state, reading, rows[1]);

    if state.show_help {
        let area = frame.area();
        help::render(frame, area);
    }
}

fn render_browsing(frame: &mut Frame, state: &AppState, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);
    search::render_search_box(frame, state, rows[0]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(cols[0]);
    catalog::render_filter(frame, state, left[0]);
    catalog::render_songs(frame, state, left[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(5)])
        .split(cols[1]);
    search::render_recent(frame, state, right[0]);
    profile::render(frame, state, right[1]);
}

fn render_reading(
    frame: &mut Frame,
    state: &AppState,
    session: &crate::app::lyrics::LyricsSession,
    area: Rect,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);
    lyrics::render_heading(frame, session, rows[0]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    lyrics::render_lyrics(frame, state, session, cols[0]);
    lyrics::render_annotation(frame, state, session, cols[1]);
}

fn render_status(frame: &mut Frame, state: &AppState, reading: bool, area: Rect) {
    let theme = get_theme();

    let line = if let Some(toast) = &state.toast {
        let (icon, color) = match toast.kind {
            ToastKind::Info => (theme.icons.info, theme.palette.accent),
            ToastKind::Error => (theme.icons.error, theme.palette.error),
        };
        Line::from(Span::styled(
            format!(" {icon} {}", toast.message),
            Style::default().fg(color),
        ))
    } else {
        let hints = if reading { READING_HINTS } else { BROWSING_HINTS };
        let mut spans = Vec::new();
        if !state.status.is_empty() {
            spans.push(Span::styled(
                format!(" {}", state.status),
                Style::default().fg(theme.palette.fg_primary),
            ));
            spans.push(Span::styled("  │  ", Style::default().fg(theme.palette.border)));
        }
        spans.push(Span::styled(
            format!(" {hints}"),
            Style::default().fg(theme.palette.fg_secondary),
        ));
        Line::from(spans)
    };
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Song;
    use crate::app::artist::ArtistSession;
    use crate::app::catalog::Catalog;
    use crate::app::navigator::Navigator;
    use crate::app::state::Toast;
    use crate::config::SearchOrdering;
    use crate::storage::{RecentSearches, Storage};
    use ratatui::{Terminal, backend::TestBackend};

    fn state() -> AppState {
        let recent = RecentSearches::load(Storage::open_in_memory().unwrap(), 5);
        let nav = Navigator::new(
            ArtistSession::new(recent, SearchOrdering::LastResolved),
            Catalog::new(12),
        );
        AppState::new(nav)
    }

    fn screen_text(state: &mut AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_idle_browsing_screen() {
        let mut s = state();
        let text = screen_text(&mut s);
        assert!(text.contains("Search for an artist to see their songs"));
        assert!(text.contains("No recent searches"));
        assert!(text.contains("? help"));
    }

    #[test]
    fn test_reading_screen_shows_heading_and_loading() {
        let mut s = state();
        let song = Song {
            title: "Adele - Hello".into(),
            url: "/adele-hello-lyrics".into(),
            image_url: None,
        };
        s.nav.select_song(&song);
        let text = screen_text(&mut s);
        assert!(text.contains("Hello"));
        assert!(text.contains("Loading lyrics..."));
        assert!(text.contains("translate to English"));
    }

    #[test]
    fn test_toast_replaces_status_line() {
        let mut s = state();
        s.status = "12 songs for Adele".into();
        s.toast = Some(Toast::error("Something went wrong"));
        let text = screen_text(&mut s);
        assert!(text.contains("Something went wrong"));
        assert!(!text.contains("12 songs for Adele"));
    }

    #[test]
    fn test_help_overlay_draws_keybinds() {
        let mut s = state();
        s.show_help = true;
        let text = screen_text(&mut s);
        assert!(text.contains("Translate to English"));
    }
}
