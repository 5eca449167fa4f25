//! Session state for modguide.
//!
//! The [`App`] owns the catalog, the guide copy and the expansion state, and
//! keeps a cached [`View`] composed from them. It has no terminal
//! dependencies; the TUI crate reads the view and drives the navigation
//! methods.

mod config;
mod loader;

pub use config::{AppConfig, CONFIG_ENV, ConfigError, GuideConfig, config_path, expand_env_vars};
pub use loader::{
    BUILTIN_CATALOG, CatalogDocument, CatalogSource, LoadError, load_catalog, parse_catalog,
};

pub use modguide_core::{EntryStyle, Inline, SectionId, Tone, View, ViewNode, compose};
pub use modguide_types::ui::{ExpansionKey, ExpansionState, KeyParseError, UiOptions, ViewState};
pub use modguide_types::{
    BucketId, CapabilityScore, Catalog, DocLink, DocLinks, Guide, ModuleRecord, NonEmptyString,
    ScoreTier, sanitize_catalog_text,
};

/// Application state
pub struct App {
    catalog: Catalog,
    guide: Guide,
    expansion: ExpansionState,
    /// Composed view and the expansion revision it was composed at.
    view: View,
    view_revision: usize,
    /// Toggle affordances of `view`, in display order. Focus indexes into it.
    toggle_keys: Vec<ExpansionKey>,
    view_state: ViewState,
    /// Largest useful scroll offset, reported by the renderer.
    scroll_max: u16,
    /// Body height at the last layout.
    viewport_rows: u16,
    should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(document: CatalogDocument, ui_options: UiOptions) -> Self {
        let CatalogDocument { guide, catalog } = document;
        let expansion = ExpansionState::new();
        let view = compose(&catalog, &guide, &expansion);
        let toggle_keys = view.toggle_keys();
        Self {
            view_revision: expansion.revision(),
            catalog,
            guide,
            expansion,
            view,
            toggle_keys,
            view_state: ViewState::new(ui_options),
            scroll_max: 0,
            viewport_rows: 0,
            should_quit: false,
        }
    }

    /// The current view. Recomposed first if the expansion state changed
    /// since it was last built.
    pub fn view(&mut self) -> &View {
        self.refresh_view();
        &self.view
    }

    fn refresh_view(&mut self) {
        if self.view_revision == self.expansion.revision() {
            return;
        }
        self.view = compose(&self.catalog, &self.guide, &self.expansion);
        self.toggle_keys = self.view.toggle_keys();
        self.view_revision = self.expansion.revision();
        tracing::trace!(revision = self.view_revision, "view recomposed");
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn guide(&self) -> &Guide {
        &self.guide
    }

    #[must_use]
    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.view_state.ui_options
    }

    #[must_use]
    pub fn view_state(&self) -> &ViewState {
        &self.view_state
    }

    // ------------------------------------------------------------------
    // Expansion
    // ------------------------------------------------------------------

    /// Flip one entity's expansion. Returns the new value.
    pub fn toggle(&mut self, key: &ExpansionKey) -> bool {
        let expanded = self.expansion.toggle(key);
        tracing::debug!(key = %key, expanded, "toggled");
        expanded
    }

    /// Expand `key` unless it already is. Returns `false` if no toggle in the
    /// view carries that key.
    pub fn expand(&mut self, key: &ExpansionKey) -> bool {
        self.refresh_view();
        if !self.toggle_keys.contains(key) {
            tracing::warn!(key = %key, "no such entry to expand");
            return false;
        }
        if !self.expansion.is_expanded(key) {
            self.toggle(key);
        }
        true
    }

    /// Toggle the focused affordance, if there is one.
    pub fn toggle_focused(&mut self) -> Option<bool> {
        let key = self.focused_key()?.clone();
        Some(self.toggle(&key))
    }

    // ------------------------------------------------------------------
    // Focus
    // ------------------------------------------------------------------

    /// Every toggle affordance of the current view, in display order.
    pub fn toggle_keys(&mut self) -> &[ExpansionKey] {
        self.refresh_view();
        &self.toggle_keys
    }

    #[must_use]
    pub fn focus_index(&self) -> Option<usize> {
        let last = self.toggle_keys.len().checked_sub(1)?;
        Some(self.view_state.focus.min(last))
    }

    #[must_use]
    pub fn focused_key(&self) -> Option<&ExpansionKey> {
        self.focus_index().map(|index| &self.toggle_keys[index])
    }

    fn set_focus(&mut self, index: usize) {
        let Some(last) = self.toggle_keys.len().checked_sub(1) else {
            return;
        };
        let index = index.min(last);
        if index != self.view_state.focus {
            self.view_state.focus = index;
            self.view_state.focus_moved = true;
        }
    }

    pub fn focus_next(&mut self) {
        let next = self.focus_index().map_or(0, |index| index.saturating_add(1));
        self.set_focus(next);
    }

    pub fn focus_prev(&mut self) {
        let prev = self.focus_index().map_or(0, |index| index.saturating_sub(1));
        self.set_focus(prev);
    }

    pub fn focus_first(&mut self) {
        self.set_focus(0);
    }

    pub fn focus_last(&mut self) {
        self.set_focus(usize::MAX);
    }

    /// Returns whether focus moved since the last call, and clears the flag.
    pub fn take_focus_moved(&mut self) -> bool {
        std::mem::take(&mut self.view_state.focus_moved)
    }

    // ------------------------------------------------------------------
    // Scrolling
    // ------------------------------------------------------------------

    #[must_use]
    pub fn scroll_offset(&self) -> u16 {
        self.view_state.scroll
    }

    /// Record the largest useful offset for the current layout and clamp to
    /// it.
    pub fn clamp_scroll(&mut self, content_rows: usize, viewport_rows: u16) {
        let max = content_rows.saturating_sub(usize::from(viewport_rows));
        self.viewport_rows = viewport_rows;
        self.scroll_max = u16::try_from(max).unwrap_or(u16::MAX);
        self.view_state.scroll = self.view_state.scroll.min(self.scroll_max);
    }

    /// Rows moved by a page scroll.
    #[must_use]
    pub fn page_rows(&self) -> u16 {
        self.viewport_rows.saturating_sub(1).max(1)
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let current = i32::from(self.view_state.scroll);
        let target = current.saturating_add(delta).clamp(0, i32::from(self.scroll_max));
        self.view_state.scroll = u16::try_from(target).unwrap_or(self.scroll_max);
    }

    pub fn scroll_to_top(&mut self) {
        self.view_state.scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.view_state.scroll = self.scroll_max;
    }

    /// Adjust the offset so `row` is inside a viewport of `viewport_rows`.
    pub fn follow_row(&mut self, row: usize, viewport_rows: u16) {
        let viewport = usize::from(viewport_rows.max(1));
        let scroll = usize::from(self.view_state.scroll);
        let target = if row < scroll {
            row
        } else if row >= scroll + viewport {
            row + 1 - viewport
        } else {
            return;
        };
        self.view_state.scroll = u16::try_from(target)
            .unwrap_or(u16::MAX)
            .min(self.scroll_max);
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }
}
