//! Module records and the catalog that holds them.

use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use crate::{CapabilityScore, NonEmptyString};

/// Two runtime-compatibility flags shown as badges on every module.
///
/// The labels live in [`crate::SupportLabels`] so a catalog can name them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct SupportFlags {
    #[serde(default)]
    pub legacy: bool,
    #[serde(default)]
    pub modern: bool,
}

/// Lifecycle status of a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
    #[default]
    Active,
    Deprecated,
}

/// One labeled documentation link.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocLink {
    pub label: String,
    pub url: String,
}

/// Documentation attached to a module.
///
/// In a catalog file this is either a string (one link) or an array of
/// `{ label, url }` tables. Absent, `""` and `[]` all mean `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "DocLinksRepr")]
pub enum DocLinks {
    #[default]
    None,
    Single(String),
    List(Vec<DocLink>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DocLinksRepr {
    Single(String),
    List(Vec<DocLink>),
}

impl From<DocLinksRepr> for DocLinks {
    fn from(repr: DocLinksRepr) -> Self {
        match repr {
            DocLinksRepr::Single(url) if url.trim().is_empty() => DocLinks::None,
            DocLinksRepr::Single(url) => DocLinks::Single(url),
            DocLinksRepr::List(links) if links.is_empty() => DocLinks::None,
            DocLinksRepr::List(links) => DocLinks::List(links),
        }
    }
}

/// A single catalog entry.
///
/// Read-only once the catalog is built. `name` doubles as the entity part of
/// every expansion key, which is why [`Catalog::new`] insists it is unique.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModuleRecord {
    pub name: NonEmptyString,
    #[serde(default)]
    pub requires_registration: bool,
    #[serde(default)]
    pub support: SupportFlags,
    #[serde(default)]
    pub score: CapabilityScore,
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub specializations: Vec<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub install: String,
    #[serde(default)]
    pub auth: String,
    #[serde(default)]
    pub docs: DocLinks,
    #[serde(default, rename = "status")]
    pub lifecycle: Lifecycle,
    /// Shown next to the name of a deprecated module, e.g. a retirement date.
    #[serde(default)]
    pub status_note: Option<String>,
    /// Prerequisites specific to this module, listed after the shared ones of
    /// its bucket.
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

impl ModuleRecord {
    /// Minimal record, mostly useful for building fixtures.
    #[must_use]
    pub fn new(name: NonEmptyString) -> Self {
        Self {
            name,
            requires_registration: false,
            support: SupportFlags::default(),
            score: CapabilityScore::default(),
            capabilities: Vec::new(),
            specializations: Vec::new(),
            notes: String::new(),
            install: String::new(),
            auth: String::new(),
            docs: DocLinks::None,
            lifecycle: Lifecycle::Active,
            status_note: None,
            prerequisites: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    #[must_use]
    pub fn is_deprecated(&self) -> bool {
        self.lifecycle == Lifecycle::Deprecated
    }

    /// Annotation rendered beside the name, if the module carries one.
    #[must_use]
    pub fn lifecycle_annotation(&self) -> Option<String> {
        if !self.is_deprecated() {
            return None;
        }
        Some(match self.status_note.as_deref() {
            Some(note) if !note.trim().is_empty() => format!("({})", note.trim()),
            _ => "(Deprecated)".to_string(),
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate module name '{0}'; names must be unique across the catalog")]
    DuplicateName(String),
}

/// The immutable, ordered set of modules the view is built from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    modules: Vec<ModuleRecord>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate names.
    ///
    /// Uniqueness is checked once here, at ingestion. Nothing downstream
    /// re-validates it.
    pub fn new(modules: Vec<ModuleRecord>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(modules.len());
        for module in &modules {
            if !seen.insert(module.name()) {
                return Err(CatalogError::DuplicateName(module.name().to_string()));
            }
        }
        Ok(Self { modules })
    }

    #[must_use]
    pub fn modules(&self) -> &[ModuleRecord] {
        &self.modules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ModuleRecord> {
        self.modules.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ModuleRecord;
    type IntoIter = std::slice::Iter<'a, ModuleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::{Catalog, CatalogError, DocLink, DocLinks, Lifecycle, ModuleRecord};
    use crate::NonEmptyString;

    #[derive(Deserialize)]
    struct Fixture {
        module: Vec<ModuleRecord>,
    }

    fn parse(toml_str: &str) -> Vec<ModuleRecord> {
        toml::from_str::<Fixture>(toml_str).unwrap().module
    }

    fn named(name: &str) -> ModuleRecord {
        ModuleRecord::new(NonEmptyString::new(name).unwrap())
    }

    #[test]
    fn parses_full_record() {
        let modules = parse(
            r#"
            [[module]]
            name = "AzureAD"
            support = { legacy = true, modern = false }
            score = 2
            capabilities = ["M365 Groups", "M365 Members"]
            specializations = ["Users", "Groups", "Users"]
            notes = "Legacy module."
            install = "Install-Module AzureAD"
            auth = "Connect-AzureAD"
            docs = "https://example.com/azuread"
            status = "deprecated"
            status_note = "Retiring March 2025"
            "#,
        );
        let module = &modules[0];
        assert_eq!(module.name(), "AzureAD");
        assert!(!module.requires_registration);
        assert!(module.support.legacy);
        assert!(!module.support.modern);
        assert!((module.score.value() - 2.0).abs() < f64::EPSILON);
        assert_eq!(module.specializations, vec!["Users", "Groups", "Users"]);
        assert_eq!(
            module.docs,
            DocLinks::Single("https://example.com/azuread".to_string())
        );
        assert_eq!(module.lifecycle, Lifecycle::Deprecated);
        assert_eq!(
            module.lifecycle_annotation().as_deref(),
            Some("(Retiring March 2025)")
        );
    }

    #[test]
    fn parses_link_list_and_defaults() {
        let modules = parse(
            r#"
            [[module]]
            name = "Microsoft.Graph"
            requires_registration = true
            docs = [
                { label = "Users", url = "https://example.com/users" },
                { label = "Teams", url = "https://example.com/teams" },
            ]
            "#,
        );
        let module = &modules[0];
        assert!(module.requires_registration);
        assert_eq!(
            module.docs,
            DocLinks::List(vec![
                DocLink {
                    label: "Users".to_string(),
                    url: "https://example.com/users".to_string(),
                },
                DocLink {
                    label: "Teams".to_string(),
                    url: "https://example.com/teams".to_string(),
                },
            ])
        );
        assert_eq!(module.lifecycle, Lifecycle::Active);
        assert!(module.lifecycle_annotation().is_none());
        assert!(module.capabilities.is_empty());
    }

    #[test]
    fn empty_docs_normalize_to_none() {
        let modules = parse(
            r#"
            [[module]]
            name = "A"
            docs = ""

            [[module]]
            name = "B"
            docs = []

            [[module]]
            name = "C"
            "#,
        );
        assert!(modules.iter().all(|m| m.docs == DocLinks::None));
    }

    #[test]
    fn rejects_negative_score_and_empty_name() {
        let negative = toml::from_str::<Fixture>(
            r#"
            [[module]]
            name = "A"
            score = -1
            "#,
        );
        assert!(negative.is_err());

        let unnamed = toml::from_str::<Fixture>(
            r#"
            [[module]]
            name = "  "
            "#,
        );
        assert!(unnamed.is_err());
    }

    #[test]
    fn deprecated_without_note_uses_generic_annotation() {
        let mut module = named("Old");
        module.lifecycle = Lifecycle::Deprecated;
        assert_eq!(module.lifecycle_annotation().as_deref(), Some("(Deprecated)"));
        assert!(module.is_deprecated());
    }

    #[test]
    fn catalog_rejects_duplicate_names() {
        let err = Catalog::new(vec![named("X"), named("Y"), named("X")]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateName("X".to_string()));
    }

    #[test]
    fn catalog_preserves_order() {
        let catalog = Catalog::new(vec![named("B"), named("A")]).unwrap();
        let names: Vec<&str> = catalog.iter().map(ModuleRecord::name).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(catalog.len(), 2);
    }
}
