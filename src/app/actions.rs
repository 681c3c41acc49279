use super::state::Focus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleHelp,
    FocusNext,
    FocusPrev,
    SetFocus(Focus),

    // Text entry (search box or catalog filter, depending on focus)
    InputChar(char),
    Backspace,
    ClearInput,
    SubmitSearch,

    ListUp,
    ListDown,
    GoTop,
    GoBottom,
    LoadMore,
    /// Enter on the focused pane: recent term, song card or top track.
    Activate,

    // Lyrics screen
    Back,
    Translate,
    Explain,
    ScrollLyrics(i16),
    ScrollAnnotation(i16),

    Resize,
}
