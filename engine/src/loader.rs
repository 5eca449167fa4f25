//! Catalog ingestion.
//!
//! A catalog file is TOML: an optional `[guide]` table with the static copy
//! and one `[[module]]` table per record. Name uniqueness is checked here,
//! once; nothing downstream re-validates.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use modguide_types::{Catalog, CatalogError, Guide, ModuleRecord};

/// The catalog shipped with the binary.
pub const BUILTIN_CATALOG: &str = include_str!("../assets/catalog.toml");

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Builtin,
    File(PathBuf),
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Builtin => f.write_str("built-in catalog"),
            CatalogSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read catalog at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {origin}: {source}")]
    Parse {
        origin: CatalogSource,
        source: toml::de::Error,
    },
    #[error("invalid {origin}: {source}")]
    Invalid {
        origin: CatalogSource,
        source: CatalogError,
    },
}

/// A loaded catalog together with the copy that frames it.
#[derive(Debug, Clone, Default)]
pub struct CatalogDocument {
    pub guide: Guide,
    pub catalog: Catalog,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    guide: Guide,
    #[serde(default, rename = "module")]
    modules: Vec<ModuleRecord>,
}

pub fn load_catalog(source: &CatalogSource) -> Result<CatalogDocument, LoadError> {
    let document = match source {
        CatalogSource::Builtin => parse_catalog(BUILTIN_CATALOG, source)?,
        CatalogSource::File(path) => {
            let content = read_catalog(path)?;
            parse_catalog(&content, source)?
        }
    };
    tracing::info!("Loaded {} modules from {}", document.catalog.len(), source);
    Ok(document)
}

fn read_catalog(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| {
        tracing::warn!("Failed to read catalog at {:?}: {}", path, source);
        LoadError::Read {
            path: path.to_path_buf(),
            source,
        }
    })
}

pub fn parse_catalog(content: &str, origin: &CatalogSource) -> Result<CatalogDocument, LoadError> {
    let file: CatalogFile = toml::from_str(content).map_err(|source| LoadError::Parse {
        origin: origin.clone(),
        source,
    })?;
    let catalog = Catalog::new(file.modules).map_err(|source| LoadError::Invalid {
        origin: origin.clone(),
        source,
    })?;
    Ok(CatalogDocument {
        guide: file.guide,
        catalog,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use modguide_types::{BucketId, Buckets, DocLinks, Lifecycle};

    fn builtin() -> CatalogDocument {
        load_catalog(&CatalogSource::Builtin).unwrap()
    }

    fn module<'a>(doc: &'a CatalogDocument, name: &str) -> &'a ModuleRecord {
        doc.catalog.iter().find(|module| module.name() == name).unwrap()
    }

    #[test]
    fn builtin_catalog_loads_nine_modules_in_order() {
        let doc = builtin();
        let names: Vec<&str> = doc.catalog.iter().map(ModuleRecord::name).collect();
        assert_eq!(
            names,
            vec![
                "ExchangeOnlineManagement",
                "MicrosoftTeams",
                "PnP.PowerShell 1.12.0",
                "PnP.PowerShell 3.x.x",
                "Microsoft.Graph",
                "AzureAD",
                "Microsoft PowerApps",
                "MicrosoftPowerBIMgmt",
                "Microsoft.Online.SharePoint.PowerShell",
            ]
        );
    }

    #[test]
    fn builtin_catalog_splits_seven_open_two_registered() {
        let doc = builtin();
        let buckets = Buckets::from_catalog(&doc.catalog);
        assert_eq!(buckets.get(BucketId::Open).len(), 7);
        let registered: Vec<&str> = buckets
            .get(BucketId::Registered)
            .iter()
            .map(|module| module.name())
            .collect();
        assert_eq!(registered, vec!["PnP.PowerShell 3.x.x", "Microsoft.Graph"]);
    }

    #[test]
    fn builtin_catalog_carries_data_driven_flags() {
        let doc = builtin();
        let azure = module(&doc, "AzureAD");
        assert_eq!(azure.lifecycle, Lifecycle::Deprecated);
        assert_eq!(
            azure.lifecycle_annotation().as_deref(),
            Some("(Retiring March 2025)")
        );

        let pnp = module(&doc, "PnP.PowerShell 3.x.x");
        assert_eq!(pnp.prerequisites.len(), 3);

        let graph = module(&doc, "Microsoft.Graph");
        assert!(matches!(&graph.docs, DocLinks::List(links) if links.len() == 5));
        assert_eq!(graph.score.to_string(), "8/8");

        assert_eq!(doc.guide.registered.prerequisites.len(), 3);
        assert_eq!(doc.guide.takeaways.len(), 4);
        assert!(doc.guide.tip.is_some());
    }

    #[test]
    fn parse_catalog_without_guide_uses_default_copy() {
        let doc =
            parse_catalog("[[module]]\nname = \"Solo\"\n", &CatalogSource::Builtin).unwrap();
        assert_eq!(doc.catalog.len(), 1);
        assert_eq!(doc.guide, Guide::default());
    }

    #[test]
    fn parse_catalog_accepts_empty_document() {
        let doc = parse_catalog("", &CatalogSource::Builtin).unwrap();
        assert!(doc.catalog.is_empty());
    }

    #[test]
    fn duplicate_names_are_invalid() {
        let err = parse_catalog(
            "[[module]]\nname = \"Twin\"\n\n[[module]]\nname = \"Twin\"\n",
            &CatalogSource::File(PathBuf::from("dupes.toml")),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LoadError::Invalid {
                source: CatalogError::DuplicateName(ref name),
                ..
            } if name == "Twin"
        ));
        assert!(err.to_string().contains("dupes.toml"));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = parse_catalog("[[module]\nname = 1", &CatalogSource::Builtin).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn load_catalog_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        fs::write(
            &path,
            "[guide]\ntitle = \"Custom\"\n\n[[module]]\nname = \"Alpha\"\nrequires_registration = true\n",
        )
        .unwrap();

        let doc = load_catalog(&CatalogSource::File(path)).unwrap();
        assert_eq!(doc.guide.title, "Custom");
        assert!(module(&doc, "Alpha").requires_registration);
    }

    #[test]
    fn load_catalog_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = load_catalog(&CatalogSource::File(path.clone())).unwrap_err();
        assert!(matches!(err, LoadError::Read { path: ref p, .. } if *p == path));
    }
}
