//! Nerd Font icons for TUI display
//! Requires a Nerd Font to be installed (https://www.nerdfonts.com)

/// Icon set using Nerd Font glyphs
#[derive(Debug, Clone)]
pub struct Icons {
    // Preview controls
    pub play: &'static str,
    pub stop: &'static str,

    // Panes
    pub search: &'static str,
    pub history: &'static str,
    pub filter: &'static str,
    pub help: &'static str,

    // Status
    pub error: &'static str,
    pub info: &'static str,

    // Music
    pub music: &'static str,
    pub artist: &'static str,
    pub lyrics: &'static str,
    pub translate: &'static str,
    pub explain: &'static str,
    pub star: &'static str,

    // Card artwork; `placeholder` stands in for images that failed to load
    pub image: &'static str,
    pub placeholder: &'static str,

    pub bullet: &'static str,
}

impl Icons {
    /// Nerd Font icon set
    pub const fn nerd() -> Self {
        Self {
            play: "\u{f04b}",           // nf-fa-play
            stop: "\u{f04d}",           // nf-fa-stop

            search: "\u{f002}",         // nf-fa-search
            history: "\u{f1da}",        // nf-fa-history
            filter: "\u{f0b0}",         // nf-fa-filter
            help: "\u{f059}",           // nf-fa-question_circle

            error: "\u{f00d}",          // nf-fa-times
            info: "\u{f05a}",           // nf-fa-info_circle

            music: "\u{f001}",          // nf-fa-music
            artist: "\u{f007}",         // nf-fa-user
            lyrics: "\u{f15c}",         // nf-fa-file_text_o
            translate: "\u{f1ab}",      // nf-fa-language
            explain: "\u{f0eb}",        // nf-fa-lightbulb_o
            star: "\u{f005}",           // nf-fa-star

            image: "\u{f03e}",          // nf-fa-picture_o
            placeholder: "\u{f001}",    // nf-fa-music

            bullet: "•",
        }
    }
}

impl Default for Icons {
    fn default() -> Self {
        Self::nerd()
    }
}

/// Prefix of the highlighted row in lists.
pub const HIGHLIGHT_SYMBOL: &str = "\u{f054} ";

/// Loading spinner frames
pub struct LoadingSpinner;

impl LoadingSpinner {
    /// Braille-based smooth spinner
    pub const BRAILLE: [&'static str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

    /// One frame per 250ms tick.
    pub fn frame(tick: u64) -> &'static str {
        let idx = tick as usize % Self::BRAILLE.len();
        Self::BRAILLE[idx]
    }
}
