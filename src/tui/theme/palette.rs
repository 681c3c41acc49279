//! Color palette: grayscale base with a single warm accent

use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_primary: Color,
    pub bg_highlight: Color,
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub accent: Color,
    pub accent_alt: Color,
    pub border: Color,
    pub playing: Color,
    pub error: Color,
}

impl Palette {
    pub const INK: Self = Self {
        bg_primary: Color::Rgb(0, 0, 0),          // #000000
        bg_highlight: Color::Rgb(48, 48, 48),    // #303030
        fg_primary: Color::Rgb(235, 235, 235),   // #ebebeb
        fg_secondary: Color::Rgb(136, 136, 136), // #888888
        accent: Color::Rgb(240, 180, 90),        // #f0b45a amber
        accent_alt: Color::Rgb(200, 200, 200),   // #c8c8c8
        border: Color::Rgb(64, 64, 64),          // #404040
        playing: Color::Rgb(120, 200, 140),      // #78c88c
        error: Color::Rgb(230, 100, 100),        // #e66464
    };
}

impl Default for Palette {
    fn default() -> Self {
        Self::INK
    }
}
