//! Expansion state store.
//!
//! Tracks which detail panels are open. Keys are composite: a section plus
//! the entity name, so the same module can be expanded independently in the
//! summary section and in the grid.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::BucketId;

const GRID_TAG: &str = "grid";

/// The part of the view an expander belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    /// A row in one of the bucketed summary sections.
    Summary(BucketId),
    /// A card in the full catalog grid.
    Grid,
}

/// Identifies one independently toggleable detail panel.
///
/// Textual form: `open:Name`, `registered:Name` or `grid:Name`. A bare
/// `Name` also parses as a grid key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExpansionKey {
    section: Section,
    entity: String,
}

impl ExpansionKey {
    #[must_use]
    pub fn new(section: Section, entity: impl Into<String>) -> Self {
        Self {
            section,
            entity: entity.into(),
        }
    }

    #[must_use]
    pub fn summary(bucket: BucketId, entity: impl Into<String>) -> Self {
        Self::new(Section::Summary(bucket), entity)
    }

    #[must_use]
    pub fn grid(entity: impl Into<String>) -> Self {
        Self::new(Section::Grid, entity)
    }

    #[must_use]
    pub fn section(&self) -> Section {
        self.section
    }

    #[must_use]
    pub fn entity(&self) -> &str {
        &self.entity
    }
}

impl fmt::Display for ExpansionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.section {
            Section::Summary(bucket) => write!(f, "{}:{}", bucket.tag(), self.entity),
            Section::Grid => write!(f, "{GRID_TAG}:{}", self.entity),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("expansion key must name an entity (got '{0}')")]
pub struct KeyParseError(String);

impl FromStr for ExpansionKey {
    type Err = KeyParseError;

    /// A known tag before the first `:` selects the section; anything else
    /// is a grid key for the whole string.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if let Some((tag, entity)) = raw.split_once(':') {
            let section = if tag == GRID_TAG {
                Some(Section::Grid)
            } else {
                BucketId::from_tag(tag).map(Section::Summary)
            };
            if let Some(section) = section {
                return if entity.trim().is_empty() {
                    Err(KeyParseError(raw.to_string()))
                } else {
                    Ok(Self::new(section, entity))
                };
            }
        }
        if raw.trim().is_empty() {
            return Err(KeyParseError(raw.to_string()));
        }
        Ok(Self::grid(raw))
    }
}

/// Expanded/collapsed flag per key, plus a revision counter.
///
/// Keys never toggled read as collapsed. Entries are never removed; a key
/// whose entity is no longer displayed is simply never read.
///
/// The revision is bumped by every toggle. The engine compares it against the
/// revision its cached view was composed at and recomposes on mismatch, so a
/// toggle can never be observed by a render without the view being rebuilt.
#[derive(Debug, Clone, Default)]
pub struct ExpansionState {
    expanded: HashMap<ExpansionKey, bool>,
    revision: usize,
}

impl ExpansionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_expanded(&self, key: &ExpansionKey) -> bool {
        self.expanded.get(key).copied().unwrap_or(false)
    }

    /// Flip `key` and return its new value. No other key changes.
    pub fn toggle(&mut self, key: &ExpansionKey) -> bool {
        let entry = self.expanded.entry(key.clone()).or_insert(false);
        *entry = !*entry;
        self.revision = self.revision.wrapping_add(1);
        *entry
    }

    #[inline]
    #[must_use]
    pub fn revision(&self) -> usize {
        self.revision
    }
}
