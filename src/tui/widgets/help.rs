//! Keybinding overlay

use crate::tui::theme::{Theme, get_theme};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
};

pub fn render(frame: &mut Frame, area: Rect) {
    let theme = get_theme();
    let area = centered(area, 84, 24);

    let block = theme.pane(format!(" {} Keybinds ", theme.icons.help), true);
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let left = vec![
        section_header("Browsing", &theme),
        keybind("/ or i", "Edit the artist search", &theme),
        keybind("Enter", "Search / open / play", &theme),
        keybind("f", "Filter songs by title", &theme),
        keybind("r", "Recent searches", &theme),
        keybind("s", "Song list", &theme),
        keybind("p", "Top tracks", &theme),
        keybind("Tab", "Next pane", &theme),
        keybind("j / k", "Move down / up", &theme),
        keybind("g / G", "Top / bottom", &theme),
        keybind("m", "Load more songs", &theme),
        keybind("Space", "Play / stop preview", &theme),
        keybind("Ctrl+u", "Clear input", &theme),
    ];
    frame.render_widget(Paragraph::new(left).wrap(Wrap { trim: false }), cols[0]);

    let right = vec![
        section_header("Lyrics", &theme),
        keybind("t", "Translate to English", &theme),
        keybind("e", "Explain the meaning", &theme),
        keybind("j / k", "Scroll lyrics", &theme),
        keybind("PgDn / PgUp", "Scroll a page", &theme),
        keybind("J / K", "Scroll the notes", &theme),
        keybind("Esc / b", "Back to songs", &theme),
        Line::default(),
        section_header("General", &theme),
        keybind("?", "Toggle this help", &theme),
        keybind("q", "Quit", &theme),
        keybind("Ctrl+c", "Quit from anywhere", &theme),
    ];
    frame.render_widget(Paragraph::new(right).wrap(Wrap { trim: false }), cols[1]);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

fn section_header(title: &str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        format!("━━ {title} ━━"),
        Style::default()
            .fg(theme.palette.accent)
            .add_modifier(Modifier::BOLD),
    ))
}

fn keybind(key: &str, desc: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(
            format!("{key:12}"),
            Style::default()
                .fg(theme.palette.accent_alt)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(desc.to_string(), Style::default().fg(theme.palette.fg_primary)),
    ])
}
