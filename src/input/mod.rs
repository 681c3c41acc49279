use crate::app::actions::Action;
use crate::app::events::{Event, InputEvent};
use crate::app::state::{AppState, Focus};
use crossterm::event::{
    self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind,
};
use tokio::sync::mpsc;

pub fn spawn_input_task(tx: mpsc::Sender<Event>, mouse_enabled: bool) {
    tokio::task::spawn_blocking(move || {
        loop {
            if !event::poll(std::time::Duration::from_millis(250)).unwrap_or(false) {
                if tx.is_closed() {
                    break;
                }
                continue;
            }
            let ev = match event::read() {
                Ok(CtEvent::Key(k)) if k.kind == KeyEventKind::Press => InputEvent::Key(k),
                Ok(CtEvent::Mouse(m)) if mouse_enabled => InputEvent::Mouse(m),
                Ok(CtEvent::Resize(_, _)) => InputEvent::Resize,
                Ok(_) => continue,
                Err(e) => {
                    tracing::debug!("terminal read: {e}");
                    continue;
                }
            };
            if tx.blocking_send(Event::Input(ev)).is_err() {
                break;
            }
        }
    });
}

pub fn map_input_to_action(state: &AppState, ev: InputEvent) -> Option<Action> {
    match ev {
        InputEvent::Resize => Some(Action::Resize),
        InputEvent::Mouse(m) => match (m.kind, state.nav.is_browsing()) {
            (MouseEventKind::ScrollUp, true) => Some(Action::ListUp),
            (MouseEventKind::ScrollDown, true) => Some(Action::ListDown),
            (MouseEventKind::ScrollUp, false) => Some(Action::ScrollLyrics(-3)),
            (MouseEventKind::ScrollDown, false) => Some(Action::ScrollLyrics(3)),
            _ => None,
        },
        InputEvent::Key(k) => {
            if k.code == KeyCode::Char('c') && k.modifiers.contains(KeyModifiers::CONTROL) {
                return Some(Action::Quit);
            }
            if state.show_help {
                return match k.code {
                    KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::F(1) => {
                        Some(Action::ToggleHelp)
                    }
                    _ => None,
                };
            }
            if state.nav.is_browsing() {
                handle_browsing(state, k)
            } else {
                handle_reading_lyrics(k)
            }
        }
    }
}

fn handle_text_entry(state: &AppState, k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Esc => Some(Action::SetFocus(Focus::Songs)),
        KeyCode::Tab => Some(Action::FocusNext),
        KeyCode::BackTab => Some(Action::FocusPrev),
        KeyCode::Enter if state.focus == Focus::SearchInput => Some(Action::SubmitSearch),
        KeyCode::Enter | KeyCode::Down => Some(Action::SetFocus(Focus::Songs)),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Char('u') if k.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::ClearInput),
        KeyCode::Char(c) if !k.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::InputChar(c)),
        _ => None,
    }
}

fn handle_browsing(state: &AppState, k: KeyEvent) -> Option<Action> {
    if state.focus.is_text_entry() {
        return handle_text_entry(state, k);
    }

    match k.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),

        KeyCode::Tab => Some(Action::FocusNext),
        KeyCode::BackTab => Some(Action::FocusPrev),
        KeyCode::Char('/') | KeyCode::Char('i') => Some(Action::SetFocus(Focus::SearchInput)),
        KeyCode::Char('f') => Some(Action::SetFocus(Focus::Filter)),
        KeyCode::Char('r') => Some(Action::SetFocus(Focus::Recent)),
        KeyCode::Char('s') => Some(Action::SetFocus(Focus::Songs)),
        KeyCode::Char('p') => Some(Action::SetFocus(Focus::TopTracks)),

        KeyCode::Up | KeyCode::Char('k') => Some(Action::ListUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ListDown),
        KeyCode::Char('g') => Some(Action::GoTop),
        KeyCode::Char('G') => Some(Action::GoBottom),
        KeyCode::Char('m') => Some(Action::LoadMore),
        KeyCode::Char('d') if k.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::LoadMore),

        KeyCode::Enter => Some(Action::Activate),
        KeyCode::Char(' ') if state.focus == Focus::TopTracks => Some(Action::Activate),
        KeyCode::Char('?') | KeyCode::F(1) => Some(Action::ToggleHelp),

        _ => None,
    }
}

fn handle_reading_lyrics(k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('b') => Some(Action::Back),
        KeyCode::Char('q') => Some(Action::Quit),

        KeyCode::Char('t') => Some(Action::Translate),
        KeyCode::Char('e') => Some(Action::Explain),

        KeyCode::Down | KeyCode::Char('j') => Some(Action::ScrollLyrics(1)),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollLyrics(-1)),
        KeyCode::PageDown => Some(Action::ScrollLyrics(10)),
        KeyCode::PageUp => Some(Action::ScrollLyrics(-10)),
        KeyCode::Char('d') if k.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::ScrollLyrics(10)),
        KeyCode::Char('u') if k.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::ScrollLyrics(-10)),
        KeyCode::Char('J') => Some(Action::ScrollAnnotation(1)),
        KeyCode::Char('K') => Some(Action::ScrollAnnotation(-1)),

        KeyCode::Char('?') | KeyCode::F(1) => Some(Action::ToggleHelp),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Song;
    use crate::app::artist::ArtistSession;
    use crate::app::catalog::Catalog;
    use crate::app::navigator::Navigator;
    use crate::config::SearchOrdering;
    use crate::storage::{RecentSearches, Storage};

    fn state() -> AppState {
        let recent = RecentSearches::load(Storage::open_in_memory().unwrap(), 5);
        let nav = Navigator::new(ArtistSession::new(recent, SearchOrdering::LastResolved), Catalog::new(12));
        AppState::new(nav)
    }

    fn key(code: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_search_box_takes_printable_keys() {
        let s = state();
        assert_eq!(s.focus, Focus::SearchInput);
        assert_eq!(map_input_to_action(&s, key(KeyCode::Char('q'))), Some(Action::InputChar('q')));
        assert_eq!(map_input_to_action(&s, key(KeyCode::Enter)), Some(Action::SubmitSearch));
        assert_eq!(
            map_input_to_action(&s, key(KeyCode::Esc)),
            Some(Action::SetFocus(Focus::Songs))
        );
    }

    #[test]
    fn test_control_chords_do_not_type() {
        let s = state();
        let chord = |c| InputEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
        assert_eq!(map_input_to_action(&s, chord('d')), None);
        assert_eq!(map_input_to_action(&s, chord('u')), Some(Action::ClearInput));
        let shifted = InputEvent::Key(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT));
        assert_eq!(map_input_to_action(&s, shifted), Some(Action::InputChar('A')));
    }

    #[test]
    fn test_filter_enter_moves_to_songs() {
        let mut s = state();
        s.focus = Focus::Filter;
        assert_eq!(
            map_input_to_action(&s, key(KeyCode::Enter)),
            Some(Action::SetFocus(Focus::Songs))
        );
        assert_eq!(map_input_to_action(&s, key(KeyCode::Char('x'))), Some(Action::InputChar('x')));
    }

    #[test]
    fn test_song_list_keys() {
        let mut s = state();
        s.focus = Focus::Songs;
        assert_eq!(map_input_to_action(&s, key(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(map_input_to_action(&s, key(KeyCode::Char('m'))), Some(Action::LoadMore));
        assert_eq!(map_input_to_action(&s, key(KeyCode::Enter)), Some(Action::Activate));
        assert_eq!(map_input_to_action(&s, key(KeyCode::Char(' '))), None);
    }

    #[test]
    fn test_lyrics_screen_keys() {
        let mut s = state();
        let song = Song {
            title: "Adele - Hello".into(),
            url: "/adele-hello-lyrics".into(),
            image_url: None,
        };
        s.nav.select_song(&song);
        assert_eq!(map_input_to_action(&s, key(KeyCode::Char('t'))), Some(Action::Translate));
        assert_eq!(map_input_to_action(&s, key(KeyCode::Char('e'))), Some(Action::Explain));
        assert_eq!(map_input_to_action(&s, key(KeyCode::Esc)), Some(Action::Back));
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        let mut s = state();
        s.show_help = true;
        assert_eq!(map_input_to_action(&s, key(KeyCode::Char('x'))), None);
        assert_eq!(map_input_to_action(&s, key(KeyCode::Esc)), Some(Action::ToggleHelp));
        let ctrl_c = InputEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(map_input_to_action(&s, ctrl_c), Some(Action::Quit));
    }
}
