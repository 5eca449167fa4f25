//! Static copy of the reference view.
//!
//! Everything here is content only. It is rendered once per view and carries
//! no state.

use serde::Deserialize;

use crate::BucketId;

/// Display labels of the two [`crate::SupportFlags`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SupportLabels {
    pub legacy: String,
    pub modern: String,
}

impl Default for SupportLabels {
    fn default() -> Self {
        Self {
            legacy: "PS5".to_string(),
            modern: "PS7".to_string(),
        }
    }
}

/// Heading and explanatory text of one summary bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SectionCopy {
    pub title: String,
    /// Paragraphs shown under the title.
    pub intro: Vec<String>,
    /// Bullet list shown after the intro.
    pub highlights: Vec<String>,
    /// Prerequisites shared by every module of the bucket, shown first in
    /// each detail panel.
    pub prerequisites: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Takeaway {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Guide {
    pub title: String,
    pub support_labels: SupportLabels,
    pub open: SectionCopy,
    pub registered: SectionCopy,
    pub grid_title: String,
    pub takeaways_title: String,
    pub takeaways: Vec<Takeaway>,
    pub tip: Option<String>,
}

impl Default for Guide {
    fn default() -> Self {
        Self {
            title: "Module Reference".to_string(),
            support_labels: SupportLabels::default(),
            open: SectionCopy {
                title: "No Registration Required".to_string(),
                ..SectionCopy::default()
            },
            registered: SectionCopy {
                title: "Registration Required".to_string(),
                ..SectionCopy::default()
            },
            grid_title: "Capability Overview".to_string(),
            takeaways_title: "Key Takeaways".to_string(),
            takeaways: Vec::new(),
            tip: None,
        }
    }
}

impl Guide {
    #[must_use]
    pub fn section(&self, bucket: BucketId) -> &SectionCopy {
        match bucket {
            BucketId::Open => &self.open,
            BucketId::Registered => &self.registered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Guide;
    use crate::BucketId;

    #[test]
    fn partial_guide_keeps_defaults() {
        let guide: Guide = toml::from_str(
            r#"
            title = "Reference"

            [registered]
            title = "Advanced"
            prerequisites = ["App registration"]
            "#,
        )
        .unwrap();
        assert_eq!(guide.title, "Reference");
        assert_eq!(guide.support_labels.legacy, "PS5");
        assert_eq!(guide.grid_title, "Capability Overview");
        assert_eq!(guide.section(BucketId::Registered).title, "Advanced");
        assert_eq!(
            guide.section(BucketId::Registered).prerequisites,
            vec!["App registration"]
        );
        // An absent section table keeps the built-in copy.
        assert_eq!(guide.section(BucketId::Open).title, "No Registration Required");
    }
}
