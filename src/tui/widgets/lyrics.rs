//! Lyrics reading screen
//!
//! Left pane holds the lyrics, right pane holds the translation or the
//! explanation. Explanations arrive as light markdown and go through
//! [`markdown_lines`].

use crate::app::lyrics::{Annotation, AnnotationKind, LyricsPhase, LyricsSession};
use crate::app::state::AppState;
use crate::tui::theme::{LoadingSpinner, Theme, get_theme};
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

pub fn render_heading(frame: &mut Frame, session: &LyricsSession, area: Rect) {
    let theme = get_theme();
    let mut spans = Vec::new();
    if !session.artist().is_empty() {
        spans.push(Span::styled(
            session.artist().to_string(),
            Style::default().fg(theme.palette.fg_secondary),
        ));
        spans.push(Span::styled(" · ", Style::default().fg(theme.palette.border)));
    }
    spans.push(Span::styled(
        session.title().to_string(),
        Style::default()
            .fg(theme.palette.accent)
            .add_modifier(Modifier::BOLD),
    ));

    let block = theme.pane(format!(" {} Lyrics ", theme.icons.lyrics), false);
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

pub fn render_lyrics(frame: &mut Frame, state: &AppState, session: &LyricsSession, area: Rect) {
    let theme = get_theme();
    let block = theme.pane(format!(" {} ", theme.icons.music), false);

    let lines: Vec<Line> = match session.phase() {
        LyricsPhase::Loading => vec![Line::from(Span::styled(
            format!("{} Loading lyrics...", LoadingSpinner::frame(state.tick)),
            Style::default().fg(theme.palette.fg_secondary),
        ))],
        LyricsPhase::Failure => vec![
            Line::from(Span::styled(
                format!("{} {}", theme.icons.error, session.error().unwrap_or_default()),
                Style::default().fg(theme.palette.error),
            )),
            Line::default(),
            Line::from(Span::styled(
                "Esc to go back",
                Style::default().fg(theme.palette.fg_secondary),
            )),
        ],
        LyricsPhase::Ready => session
            .text()
            .lines()
            .map(|l| {
                Line::from(Span::styled(
                    l.to_string(),
                    Style::default().fg(theme.palette.fg_primary),
                ))
            })
            .collect(),
    };

    let p = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((session.scroll, 0));
    frame.render_widget(p, area);
}

pub fn render_annotation(frame: &mut Frame, state: &AppState, session: &LyricsSession, area: Rect) {
    let theme = get_theme();
    let annotation = session.annotation();
    let title = match annotation.kind() {
        Some(AnnotationKind::Translation) => format!(" {} Translation ", theme.icons.translate),
        Some(AnnotationKind::Explanation) => format!(" {} Explanation ", theme.icons.explain),
        None => format!(" {} Notes ", theme.icons.info),
    };
    let block = theme.pane(title, false);

    let lines: Vec<Line> = match annotation {
        Annotation::Idle => {
            let hint = |key: &'static str, what: &'static str| {
                Line::from(vec![
                    Span::styled(key, Style::default().fg(theme.palette.accent_alt).add_modifier(Modifier::BOLD)),
                    Span::styled(what, Style::default().fg(theme.palette.fg_secondary)),
                ])
            };
            vec![hint("t", "  translate to English"), hint("e", "  explain the meaning")]
        }
        Annotation::Pending(kind) => vec![Line::from(Span::styled(
            format!(
                "{} Working on the {}...",
                LoadingSpinner::frame(state.tick),
                kind.label().to_lowercase()
            ),
            Style::default().fg(theme.palette.fg_secondary),
        ))],
        Annotation::Ready { kind: AnnotationKind::Translation, text } => text
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(theme.palette.fg_primary))))
            .collect(),
        Annotation::Ready { kind: AnnotationKind::Explanation, text } => markdown_lines(text, &theme),
        Annotation::Failure(_) => vec![Line::from(Span::styled(
            annotation.text().unwrap_or_default().to_string(),
            Style::default().fg(theme.palette.error),
        ))],
    };

    let p = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((session.annotation_scroll, 0));
    frame.render_widget(p, area);
}

/// Renders a CommonMark explanation into styled lines. Paragraphs and list
/// blocks are separated by a blank line, soft breaks start a new line.
pub fn markdown_lines(text: &str, theme: &Theme) -> Vec<Line<'static>> {
    let mut out = MarkdownLines::new(theme);
    for event in Parser::new_ext(text, Options::ENABLE_STRIKETHROUGH) {
        out.event(event);
    }
    out.finish()
}

struct MarkdownLines<'t> {
    theme: &'t Theme,
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    styles: Vec<Style>,
    /// Next number for ordered lists, `None` for bullets.
    lists: Vec<Option<u64>>,
    in_code_block: bool,
}

impl<'t> MarkdownLines<'t> {
    fn new(theme: &'t Theme) -> Self {
        Self {
            theme,
            lines: Vec::new(),
            current: Vec::new(),
            styles: vec![Style::default().fg(theme.palette.fg_primary)],
            lists: Vec::new(),
            in_code_block: false,
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) if self.in_code_block => {
                let style = self.code_style();
                for line in text.lines() {
                    self.push(line, style);
                    self.break_line();
                }
            }
            Event::Text(text) | Event::Html(text) | Event::InlineHtml(text) => {
                let style = self.style();
                self.push(&text, style);
            }
            Event::Code(code) => {
                let style = self.code_style();
                self.push(&code, style);
            }
            Event::SoftBreak | Event::HardBreak => self.break_line(),
            Event::Rule => {
                self.block_gap();
                self.lines.push(Line::from(Span::styled(
                    "─".repeat(24),
                    Style::default().fg(self.theme.palette.border),
                )));
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        let style = self.style();
        match tag {
            Tag::Paragraph if self.lists.is_empty() => self.block_gap(),
            Tag::Heading { .. } => {
                self.block_gap();
                self.styles.push(
                    Style::default()
                        .fg(self.theme.palette.accent)
                        .add_modifier(Modifier::BOLD),
                );
            }
            Tag::CodeBlock(_) => {
                self.block_gap();
                self.in_code_block = true;
            }
            Tag::List(first) => {
                self.end_line();
                if self.lists.is_empty() {
                    self.block_gap();
                }
                self.lists.push(first);
            }
            Tag::Item => {
                self.end_line();
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let m = format!("{n}. ");
                        *n += 1;
                        m
                    }
                    _ => format!("{} ", self.theme.icons.bullet),
                };
                self.current.push(Span::styled(
                    format!("{indent}{marker}"),
                    Style::default().fg(self.theme.palette.accent),
                ));
            }
            Tag::Emphasis => self.styles.push(style.add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.styles.push(style.add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => self.styles.push(style.add_modifier(Modifier::CROSSED_OUT)),
            Tag::Link { .. } => self.styles.push(style.add_modifier(Modifier::UNDERLINED)),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                self.styles.pop();
                self.end_line();
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link => {
                self.styles.pop();
            }
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.end_line();
            }
            TagEnd::List(_) => {
                self.lists.pop();
            }
            TagEnd::Paragraph | TagEnd::Item => self.end_line(),
            _ => {}
        }
    }

    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or_default()
    }

    fn code_style(&self) -> Style {
        Style::default().fg(self.theme.palette.accent_alt)
    }

    /// Adjacent text with the same style joins into one span.
    fn push(&mut self, text: &str, style: Style) {
        if text.is_empty() {
            return;
        }
        if let Some(last) = self.current.last_mut()
            && last.style == style
        {
            last.content.to_mut().push_str(text);
        } else {
            self.current.push(Span::styled(text.to_string(), style));
        }
    }

    fn break_line(&mut self) {
        let spans = std::mem::take(&mut self.current);
        self.lines.push(Line::from(spans));
    }

    fn end_line(&mut self) {
        if !self.current.is_empty() {
            self.break_line();
        }
    }

    fn block_gap(&mut self) {
        self.end_line();
        if !self.lines.is_empty() {
            self.lines.push(Line::default());
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.end_line();
        self.lines
    }
}
