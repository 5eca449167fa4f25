//! View composition for modguide.
//!
//! The composer turns `(catalog, guide, expansion state)` into a [`View`]
//! tree. It owns no state and performs no IO; the engine decides when to call
//! it and the TUI decides how the tree looks.

mod compose;
mod view;

pub use compose::{
    DOCS_PLACEHOLDER, EMPTY_BUCKET, EMPTY_CATALOG, GRID_DISCLOSURE_LABEL, REGISTRATION_NOTE,
    SINGLE_LINK_LABEL, compose, documentation, grid_card, grid_detail, grid_section,
    summary_detail, summary_entry, summary_section, takeaways_section,
};
pub use view::{EntryStyle, Inline, SectionId, Tone, View, ViewNode};
