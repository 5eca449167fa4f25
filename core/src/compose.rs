//! View composition.
//!
//! `compose` is a pure function of the catalog, the guide copy and the
//! expansion state. Same inputs, same tree: the engine relies on that to cache
//! the view between toggles.

use modguide_types::ui::{ExpansionKey, ExpansionState};
use modguide_types::{
    BucketId, Buckets, Catalog, DocLinks, Guide, ModuleRecord, SectionCopy, SupportLabels,
};

use crate::view::{EntryStyle, Inline, SectionId, Tone, View, ViewNode};

pub const DOCS_PLACEHOLDER: &str = "No documentation available";
pub const SINGLE_LINK_LABEL: &str = "View documentation";
pub const REGISTRATION_NOTE: &str = "Registration required";
pub const GRID_DISCLOSURE_LABEL: &str = "Installation & Authentication";
pub const EMPTY_BUCKET: &str = "No modules in this group";
pub const EMPTY_CATALOG: &str = "The catalog is empty";

/// Build the whole view: both summary buckets (open first), the grid, then
/// the takeaways.
#[must_use]
pub fn compose(catalog: &Catalog, guide: &Guide, state: &ExpansionState) -> View {
    let buckets = Buckets::from_catalog(catalog);
    let mut sections: Vec<ViewNode> = buckets
        .iter()
        .map(|(bucket, modules)| summary_section(bucket, modules, guide, state))
        .collect();
    sections.push(grid_section(catalog, guide, state));
    sections.push(takeaways_section(guide));

    View {
        title: guide.title.clone(),
        sections,
    }
}

fn bucket_tone(bucket: BucketId) -> Tone {
    match bucket {
        BucketId::Open => Tone::Positive,
        BucketId::Registered => Tone::Caution,
    }
}

#[must_use]
pub fn summary_section(
    bucket: BucketId,
    modules: &[&ModuleRecord],
    guide: &Guide,
    state: &ExpansionState,
) -> ViewNode {
    let copy = guide.section(bucket);
    let tone = bucket_tone(bucket);
    let mut children: Vec<ViewNode> = copy
        .intro
        .iter()
        .map(|text| ViewNode::Paragraph {
            text: text.clone(),
            tone: Tone::Normal,
        })
        .collect();
    if !copy.highlights.is_empty() {
        children.push(ViewNode::Bullets {
            items: copy.highlights.clone(),
            tone,
        });
    }

    if modules.is_empty() {
        children.push(ViewNode::Placeholder(EMPTY_BUCKET.to_string()));
    }
    children.extend(
        modules
            .iter()
            .map(|module| summary_entry(bucket, module, copy, &guide.support_labels, state)),
    );

    ViewNode::Section {
        id: SectionId::Summary(bucket),
        title: copy.title.clone(),
        tone,
        children,
    }
}

fn support_badges(module: &ModuleRecord, labels: &SupportLabels) -> [Inline; 2] {
    [
        Inline::Badge {
            label: labels.legacy.clone(),
            enabled: module.support.legacy,
        },
        Inline::Badge {
            label: labels.modern.clone(),
            enabled: module.support.modern,
        },
    ]
}

/// Collapsed row for one module of a bucket, followed by its detail panel
/// when expanded.
#[must_use]
pub fn summary_entry(
    bucket: BucketId,
    module: &ModuleRecord,
    copy: &SectionCopy,
    labels: &SupportLabels,
    state: &ExpansionState,
) -> ViewNode {
    let key = ExpansionKey::summary(bucket, module.name());
    let expanded = state.is_expanded(&key);

    let mut header = vec![Inline::strong(module.name(), Tone::Normal)];
    if let Some(annotation) = module.lifecycle_annotation() {
        header.push(Inline::strong(annotation, Tone::Critical));
    }
    if bucket == BucketId::Registered {
        header.push(Inline::strong(REGISTRATION_NOTE, Tone::Caution));
    }
    header.extend(support_badges(module, labels));
    header.push(Inline::Toggle {
        key: key.clone(),
        expanded,
        label: None,
    });

    let mut children = vec![ViewNode::Line(header)];
    if !module.specializations.is_empty() {
        children.push(ViewNode::Tags {
            tags: module.specializations.clone(),
            tone: Tone::Muted,
        });
    }
    if expanded {
        children.push(summary_detail(bucket, module, copy));
    }

    ViewNode::Entry {
        key,
        style: EntryStyle::Row,
        highlighted: false,
        children,
    }
}

#[must_use]
pub fn summary_detail(bucket: BucketId, module: &ModuleRecord, copy: &SectionCopy) -> ViewNode {
    let mut children = Vec::new();

    let prerequisites: Vec<String> = copy
        .prerequisites
        .iter()
        .chain(&module.prerequisites)
        .cloned()
        .collect();
    if !prerequisites.is_empty() {
        children.push(ViewNode::Field {
            label: "Prerequisites".to_string(),
            children: vec![ViewNode::Bullets {
                items: prerequisites,
                tone: Tone::Caution,
            }],
        });
    }

    children.push(ViewNode::Field {
        label: "Capabilities".to_string(),
        children: vec![ViewNode::Tags {
            tags: module.capabilities.clone(),
            tone: bucket_tone(bucket),
        }],
    });
    children.extend(procedures(module));
    children.push(ViewNode::Field {
        label: "Documentation".to_string(),
        children: documentation(&module.docs),
    });
    if !module.notes.is_empty() {
        children.push(ViewNode::Paragraph {
            text: module.notes.clone(),
            tone: Tone::Muted,
        });
    }

    ViewNode::Detail(children)
}

fn procedures(module: &ModuleRecord) -> [ViewNode; 2] {
    [
        ViewNode::Field {
            label: "Installation".to_string(),
            children: vec![ViewNode::Code(module.install.clone())],
        },
        ViewNode::Field {
            label: "Authentication".to_string(),
            children: vec![ViewNode::Code(module.auth.clone())],
        },
    ]
}

/// The one place documentation links are rendered: a labeled link per entry,
/// a single generic link, or the placeholder.
#[must_use]
pub fn documentation(docs: &DocLinks) -> Vec<ViewNode> {
    match docs {
        DocLinks::List(links) => links
            .iter()
            .map(|link| ViewNode::Link {
                label: link.label.clone(),
                url: link.url.clone(),
            })
            .collect(),
        DocLinks::Single(url) => vec![ViewNode::Link {
            label: SINGLE_LINK_LABEL.to_string(),
            url: url.clone(),
        }],
        DocLinks::None => vec![ViewNode::Placeholder(DOCS_PLACEHOLDER.to_string())],
    }
}

/// Every module in catalog order, independent of the buckets.
#[must_use]
pub fn grid_section(catalog: &Catalog, guide: &Guide, state: &ExpansionState) -> ViewNode {
    let children = if catalog.is_empty() {
        vec![ViewNode::Placeholder(EMPTY_CATALOG.to_string())]
    } else {
        catalog
            .iter()
            .map(|module| grid_card(module, &guide.support_labels, state))
            .collect()
    };

    ViewNode::Section {
        id: SectionId::Grid,
        title: guide.grid_title.clone(),
        tone: Tone::Accent,
        children,
    }
}

#[must_use]
pub fn grid_card(module: &ModuleRecord, labels: &SupportLabels, state: &ExpansionState) -> ViewNode {
    let key = ExpansionKey::grid(module.name());
    let expanded = state.is_expanded(&key);

    let mut header = vec![Inline::strong(module.name(), Tone::Normal)];
    header.extend(support_badges(module, labels));

    let mut children = vec![ViewNode::Line(header)];
    if module.requires_registration {
        children.push(ViewNode::Line(vec![Inline::strong(
            REGISTRATION_NOTE,
            Tone::Caution,
        )]));
    }
    children.push(ViewNode::Line(vec![
        Inline::text("Capability score", Tone::Normal),
        Inline::strong(module.score.to_string(), Tone::Normal),
    ]));
    children.push(ViewNode::Score(module.score));
    if !module.notes.is_empty() {
        children.push(ViewNode::Paragraph {
            text: module.notes.clone(),
            tone: Tone::Muted,
        });
    }
    children.push(ViewNode::Field {
        label: "Specialization areas".to_string(),
        children: vec![ViewNode::Tags {
            tags: module.specializations.clone(),
            tone: Tone::Accent,
        }],
    });
    children.push(ViewNode::Field {
        label: "Supported operations".to_string(),
        children: vec![ViewNode::Tags {
            tags: module.capabilities.clone(),
            tone: Tone::Positive,
        }],
    });
    children.push(ViewNode::Line(vec![Inline::Toggle {
        key: key.clone(),
        expanded,
        label: Some(GRID_DISCLOSURE_LABEL.to_string()),
    }]));
    if expanded {
        children.push(grid_detail(module));
    }

    ViewNode::Entry {
        key,
        style: EntryStyle::Card,
        highlighted: module.requires_registration,
        children,
    }
}

#[must_use]
pub fn grid_detail(module: &ModuleRecord) -> ViewNode {
    let mut children: Vec<ViewNode> = procedures(module).into();
    children.push(ViewNode::Field {
        label: "Reference".to_string(),
        children: documentation(&module.docs),
    });
    ViewNode::Detail(children)
}

/// Static content; rendered once regardless of any state.
#[must_use]
pub fn takeaways_section(guide: &Guide) -> ViewNode {
    let mut children: Vec<ViewNode> = guide
        .takeaways
        .iter()
        .map(|takeaway| ViewNode::Field {
            label: takeaway.title.clone(),
            children: vec![ViewNode::Paragraph {
                text: takeaway.body.clone(),
                tone: Tone::Normal,
            }],
        })
        .collect();
    if let Some(tip) = guide.tip.as_deref().filter(|tip| !tip.trim().is_empty()) {
        children.push(ViewNode::Paragraph {
            text: format!("Tip: {tip}"),
            tone: Tone::Accent,
        });
    }

    ViewNode::Section {
        id: SectionId::Takeaways,
        title: guide.takeaways_title.clone(),
        tone: Tone::Accent,
        children,
    }
}
