//! View tree produced by the composer.
//!
//! Nodes are opaque to the composer's callers except for their structure and
//! keys: `Entry` nodes are keyed by [`ExpansionKey`] so a host can diff
//! successive trees entity by entity. Styling is expressed as a coarse
//! [`Tone`]; the host maps tones to colors.

use modguide_types::ui::ExpansionKey;
use modguide_types::{BucketId, CapabilityScore};

/// Semantic emphasis of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Normal,
    Muted,
    Accent,
    Positive,
    Caution,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Summary(BucketId),
    Grid,
    Takeaways,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStyle {
    /// Compact summary row.
    Row,
    /// Grid card, separated from its neighbours.
    Card,
}

/// Inline content of a [`ViewNode::Line`].
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text {
        text: String,
        tone: Tone,
        strong: bool,
    },
    /// Support flag badge, shown checked or crossed.
    Badge { label: String, enabled: bool },
    /// Expand/collapse affordance. Activating it issues `toggle(key)`.
    Toggle {
        key: ExpansionKey,
        expanded: bool,
        label: Option<String>,
    },
}

impl Inline {
    #[must_use]
    pub fn text(text: impl Into<String>, tone: Tone) -> Self {
        Self::Text {
            text: text.into(),
            tone,
            strong: false,
        }
    }

    #[must_use]
    pub fn strong(text: impl Into<String>, tone: Tone) -> Self {
        Self::Text {
            text: text.into(),
            tone,
            strong: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewNode {
    Section {
        id: SectionId,
        title: String,
        tone: Tone,
        children: Vec<ViewNode>,
    },
    /// One module's row or card.
    Entry {
        key: ExpansionKey,
        style: EntryStyle,
        highlighted: bool,
        children: Vec<ViewNode>,
    },
    /// A single unwrapped line.
    Line(Vec<Inline>),
    /// Free text, wrapped by the host.
    Paragraph { text: String, tone: Tone },
    Bullets { items: Vec<String>, tone: Tone },
    /// Tag chips, in the given order.
    Tags { tags: Vec<String>, tone: Tone },
    /// Labeled block.
    Field {
        label: String,
        children: Vec<ViewNode>,
    },
    /// Opaque command text, shown verbatim.
    Code(String),
    Link { label: String, url: String },
    Placeholder(String),
    /// Proportional score indicator.
    Score(CapabilityScore),
    /// Expanded detail panel.
    Detail(Vec<ViewNode>),
}

impl ViewNode {
    #[must_use]
    pub fn children(&self) -> &[ViewNode] {
        match self {
            ViewNode::Section { children, .. }
            | ViewNode::Entry { children, .. }
            | ViewNode::Field { children, .. }
            | ViewNode::Detail(children) => children,
            _ => &[],
        }
    }

    /// Depth-first, pre-order walk over this node and its descendants.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a ViewNode)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }
}

/// Root of a composed view.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct View {
    pub title: String,
    pub sections: Vec<ViewNode>,
}

impl View {
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a ViewNode)) {
        for section in &self.sections {
            section.walk(visit);
        }
    }

    /// Every toggle affordance, in display order.
    #[must_use]
    pub fn toggle_keys(&self) -> Vec<ExpansionKey> {
        let mut keys = Vec::new();
        self.walk(&mut |node| {
            if let ViewNode::Line(inlines) = node {
                for inline in inlines {
                    if let Inline::Toggle { key, .. } = inline {
                        keys.push(key.clone());
                    }
                }
            }
        });
        keys
    }

    #[must_use]
    pub fn entry(&self, key: &ExpansionKey) -> Option<&ViewNode> {
        let mut found = None;
        self.walk(&mut |node| {
            if found.is_none()
                && let ViewNode::Entry { key: entry_key, .. } = node
                && entry_key == key
            {
                found = Some(node);
            }
        });
        found
    }

    #[must_use]
    pub fn section(&self, id: SectionId) -> Option<&ViewNode> {
        self.sections.iter().find(
            |node| matches!(node, ViewNode::Section { id: section_id, .. } if *section_id == id),
        )
    }
}
