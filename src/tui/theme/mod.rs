//! Theme configuration

pub mod borders;
pub mod icons;
pub mod palette;

pub use borders::BorderStyle;
pub use icons::{HIGHLIGHT_SYMBOL, Icons, LoadingSpinner};
pub use palette::Palette;

use ratatui::style::Style;
use ratatui::widgets::{Block, Borders};

#[derive(Debug, Clone)]
pub struct Theme {
    pub palette: Palette,
    pub icons: Icons,
}

impl Theme {
    pub fn new() -> Self {
        Self {
            palette: Palette::INK,
            icons: Icons::nerd(),
        }
    }

    pub fn border_set(&self) -> ratatui::symbols::border::Set<'static> {
        BorderStyle::to_border_set()
    }

    /// Bordered pane with the accent border when focused.
    pub fn pane<'a>(&self, title: String, focused: bool) -> Block<'a> {
        let border = if focused { self.palette.accent } else { self.palette.border };
        Block::default()
            .borders(Borders::ALL)
            .border_set(self.border_set())
            .border_style(Style::default().fg(border))
            .title(title)
            .title_style(Style::default().fg(self.palette.accent))
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

pub fn get_theme() -> Theme {
    Theme::new()
}
