//! Song catalog: filter line, song cards and the "load more" footer

use crate::app::artist::SearchPhase;
use crate::app::catalog::{Card, CardImage};
use crate::app::state::{AppState, Focus};
use crate::tui::theme::{HIGHLIGHT_SYMBOL, LoadingSpinner, Theme, get_theme};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
};

pub fn render_filter(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let focused = state.focus == Focus::Filter;
    let block = theme.pane(format!(" {} Filter ", theme.icons.filter), focused);

    let query = state.nav.catalog().query();
    let line = if query.is_empty() && !focused {
        Line::from(Span::styled(
            "press f to filter songs by title",
            Style::default().fg(theme.palette.fg_secondary),
        ))
    } else {
        let cursor = if focused { "▏" } else { "" };
        Line::from(vec![
            Span::styled(query.to_string(), Style::default().fg(theme.palette.fg_primary)),
            Span::styled(cursor, Style::default().fg(theme.palette.accent)),
        ])
    };
    frame.render_widget(Paragraph::new(line).block(block), area);
}

pub fn render_songs(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let focused = state.focus == Focus::Songs;
    let artist = state.nav.artist();
    let catalog = state.nav.catalog();
    let songs = artist.songs();

    let title = if songs.is_empty() {
        format!(" {} Songs ", theme.icons.music)
    } else {
        format!(
            " {} Songs ({}/{}) ",
            theme.icons.music,
            catalog.filtered_len(songs),
            songs.len()
        )
    };
    let block = theme.pane(title, focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let message = match artist.phase() {
        SearchPhase::Idle => Some(("Search for an artist to see their songs".to_string(), false)),
        SearchPhase::Searching if songs.is_empty() => Some((
            format!("{} Searching for {}...", LoadingSpinner::frame(state.tick), artist.term()),
            false,
        )),
        SearchPhase::Failure => artist.error().map(|e| (e.to_string(), true)),
        _ if songs.is_empty() => Some((format!("No songs found for {}", artist.term()), false)),
        _ if catalog.filtered_len(songs) == 0 => {
            Some((format!("No songs match \"{}\"", catalog.query()), false))
        }
        _ => None,
    };
    if let Some((text, is_error)) = message {
        let color = if is_error { theme.palette.error } else { theme.palette.fg_secondary };
        let p = Paragraph::new(Line::from(text))
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: true });
        frame.render_widget(p, inner);
        return;
    }

    let page = catalog.page(songs);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(if page.has_more { 1 } else { 0 }),
        ])
        .split(inner);

    let width = rows[0].width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = catalog
        .cards(songs)
        .iter()
        .map(|card| ListItem::new(card_line(card, &theme, width)))
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(catalog.selected()));

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .bg(theme.palette.bg_highlight)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(HIGHLIGHT_SYMBOL);
    frame.render_stateful_widget(list, rows[0], &mut list_state);

    if page.has_more {
        let more = Paragraph::new(Line::from(format!(
            "m: load more ({} remaining)",
            page.remaining
        )))
        .style(Style::default().fg(theme.palette.fg_secondary));
        frame.render_widget(more, rows[1]);
    }
}

fn card_line(card: &Card<'_>, theme: &Theme, width: usize) -> Line<'static> {
    let (icon, icon_style) = match card.image {
        CardImage::Url(_) => (theme.icons.image, Style::default().fg(theme.palette.accent_alt)),
        CardImage::Placeholder => (theme.icons.placeholder, Style::default().fg(theme.palette.fg_secondary)),
    };
    let title_width = width.saturating_sub(card.artist.chars().count() + 5);
    Line::from(vec![
        Span::styled(format!("{icon} "), icon_style),
        Span::styled(
            truncate_str(&card.title, title_width),
            Style::default().fg(theme.palette.fg_primary),
        ),
        Span::styled(
            format!("  {}", card.artist),
            Style::default().fg(theme.palette.fg_secondary),
        ),
    ])
}

pub fn truncate_str(s: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{truncated}...")
    } else {
        s.chars().take(max_len).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("Skyfall", 10), "Skyfall");
        assert_eq!(truncate_str("Someone Like You", 10), "Someone...");
        assert_eq!(truncate_str("Hello", 2), "He");
        assert_eq!(truncate_str("Hello", 0), "");
    }

    #[test]
    fn test_placeholder_card_uses_placeholder_glyph() {
        let theme = get_theme();
        let card = Card {
            index: 0,
            artist: "Adele".into(),
            title: "Hello".into(),
            url: "/adele-hello-lyrics",
            image: CardImage::Placeholder,
        };
        let line = card_line(&card, &theme, 40);
        assert_eq!(line.spans[0].content, format!("{} ", theme.icons.placeholder));
        assert_eq!(line.spans[1].content, "Hello");
    }
}
