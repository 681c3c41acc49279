//! Artist search box and the recent-searches list

use crate::app::state::{AppState, Focus};
use crate::tui::theme::{HIGHLIGHT_SYMBOL, LoadingSpinner, get_theme};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

pub fn render_search_box(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let focused = state.focus == Focus::SearchInput;
    let artist = state.nav.artist();

    let block = theme.pane(format!(" {} Artist ", theme.icons.search), focused);

    let mut spans = vec![Span::styled(
        artist.input().to_string(),
        Style::default().fg(theme.palette.fg_primary),
    )];
    if focused {
        spans.push(Span::styled("▏", Style::default().fg(theme.palette.accent)));
    }
    if artist.in_flight() > 0 {
        spans.push(Span::styled(
            format!("  {} searching", LoadingSpinner::frame(state.tick)),
            Style::default().fg(theme.palette.fg_secondary),
        ));
    } else if artist.input().is_empty() && !focused {
        spans.push(Span::styled(
            "press / to search for an artist",
            Style::default().fg(theme.palette.fg_secondary),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

pub fn render_recent(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let focused = state.focus == Focus::Recent;
    let block = theme.pane(format!(" {} Recent ", theme.icons.history), focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let recent = state.nav.artist().recent();
    if recent.is_empty() {
        let empty = Paragraph::new(Line::from("No recent searches"))
            .style(Style::default().fg(theme.palette.fg_secondary));
        frame.render_widget(empty, inner);
        return;
    }

    let items: Vec<ListItem> = recent
        .terms()
        .iter()
        .map(|t| ListItem::new(Line::from(t.clone())))
        .collect();

    let mut list_state = ListState::default();
    if focused {
        list_state.select(Some(state.recent_selected));
    }

    let list = List::new(items)
        .style(Style::default().fg(theme.palette.fg_primary))
        .highlight_style(
            Style::default()
                .fg(theme.palette.bg_primary)
                .bg(theme.palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(HIGHLIGHT_SYMBOL);

    frame.render_stateful_widget(list, inner, &mut list_state);
}
