//! View state for rendering.
//!
//! Groups the state that only affects how the view is shown (scroll, focus,
//! options), separating it from the expansion state the view is built from.

/// UI configuration options derived from config/CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    pub ascii_only: bool,
    pub high_contrast: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Rows scrolled off the top of the body.
    pub scroll: u16,
    /// Index into the view's toggle affordances, in display order.
    pub focus: usize,
    /// Set when focus moved; the renderer scrolls the focused row into view
    /// and clears it.
    pub focus_moved: bool,
    pub ui_options: UiOptions,
}

impl ViewState {
    #[must_use]
    pub fn new(ui_options: UiOptions) -> Self {
        Self {
            ui_options,
            ..Self::default()
        }
    }
}
