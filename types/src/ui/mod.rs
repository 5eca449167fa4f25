//! UI state types for the TUI layer.
//!
//! Pure data types with no IO, no async, no ratatui dependency.
//! Used by the engine (state ownership), the composer and the tui (rendering/input).

mod expansion;
mod view_state;

pub use expansion::{ExpansionKey, ExpansionState, KeyParseError, Section};
pub use view_state::{UiOptions, ViewState};
