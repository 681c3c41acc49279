//! Artist profile pane: metadata header and top-track previews

use crate::app::profile::{ArtistProfile, ProfilePhase, genres_line, group_thousands};
use crate::app::state::{AppState, Focus};
use crate::tui::theme::{HIGHLIGHT_SYMBOL, LoadingSpinner, Theme, get_theme};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
};

pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let focused = state.focus == Focus::TopTracks;
    let profile = &state.profile;

    let block = theme.pane(format!(" {} Artist ", theme.icons.artist), focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match profile.phase() {
        ProfilePhase::Idle => {}
        ProfilePhase::Loading => {
            let p = Paragraph::new(Line::from(format!(
                "{} Loading {}...",
                LoadingSpinner::frame(state.tick),
                profile.artist()
            )))
            .style(Style::default().fg(theme.palette.fg_secondary));
            frame.render_widget(p, inner);
        }
        ProfilePhase::Unavailable => {
            let p = Paragraph::new(Line::from("No artist details available"))
                .style(Style::default().fg(theme.palette.fg_secondary))
                .wrap(Wrap { trim: true });
            frame.render_widget(p, inner);
        }
        ProfilePhase::Ready => render_ready(frame, profile, focused, &theme, inner),
    }
}

fn render_ready(frame: &mut Frame, profile: &ArtistProfile, focused: bool, theme: &Theme, area: Rect) {
    let header = header_lines(profile, theme);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header.len() as u16 + 1),
            Constraint::Min(1),
        ])
        .split(area);
    frame.render_widget(Paragraph::new(header).wrap(Wrap { trim: true }), rows[0]);

    let tracks = profile.top_tracks();
    if tracks.is_empty() {
        let p = Paragraph::new(Line::from("No top tracks"))
            .style(Style::default().fg(theme.palette.fg_secondary));
        frame.render_widget(p, rows[1]);
        return;
    }

    let items: Vec<ListItem> = tracks
        .iter()
        .map(|t| {
            let is_playing = profile.playing() == Some(t.id.as_str());
            let (icon, style) = if is_playing {
                (theme.icons.stop, Style::default().fg(theme.palette.playing))
            } else if t.preview_url.is_some() {
                (theme.icons.play, Style::default().fg(theme.palette.fg_primary))
            } else {
                (" ", Style::default().fg(theme.palette.fg_secondary))
            };
            let mut spans = vec![
                Span::styled(format!("{icon} "), style),
                Span::styled(t.name.clone(), style),
            ];
            if !t.album_name.is_empty() {
                spans.push(Span::styled(
                    format!("  {}", t.album_name),
                    Style::default().fg(theme.palette.fg_secondary),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let mut list_state = ListState::default();
    if focused {
        list_state.select(Some(profile.selected()));
    }

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .bg(theme.palette.bg_highlight)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(HIGHLIGHT_SYMBOL);
    frame.render_stateful_widget(list, rows[1], &mut list_state);
}

fn header_lines(profile: &ArtistProfile, theme: &Theme) -> Vec<Line<'static>> {
    let Some(meta) = profile.metadata() else {
        return vec![Line::from(Span::styled(
            profile.artist().to_string(),
            Style::default()
                .fg(theme.palette.accent)
                .add_modifier(Modifier::BOLD),
        ))];
    };
    vec![
        Line::from(Span::styled(
            meta.name.clone(),
            Style::default()
                .fg(theme.palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(
                format!("{} followers", group_thousands(meta.followers)),
                Style::default().fg(theme.palette.fg_primary),
            ),
            Span::styled(
                format!("  {} {}/100", theme.icons.star, meta.popularity),
                Style::default().fg(theme.palette.accent_alt),
            ),
        ]),
        Line::from(Span::styled(
            genres_line(meta),
            Style::default().fg(theme.palette.fg_secondary),
        )),
    ]
}
