//! Releases: artifacts grouped by artifact name at query time.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::image::ImageRecord;

/// All artifacts sharing one artifact name. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
    pub name: String,
    pub artifacts: Vec<ImageRecord>,
}

/// Restricts a release listing. An absent name means no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseFilter {
    #[serde(default)]
    pub name: Option<String>,
}

impl ReleaseFilter {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// Treat an empty name the same as no name.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.filter(|n| !n.is_empty()),
        }
    }

    /// Exact, case-sensitive match on the artifact name.
    pub fn matches(&self, record: &ImageRecord) -> bool {
        match self.name.as_deref() {
            Some(name) => name == record.name(),
            None => true,
        }
    }
}

/// Group records by artifact name, keeping names in first-seen order and
/// records in input order within each release.
pub fn group_into_releases<I>(records: I) -> Vec<Release>
where
    I: IntoIterator<Item = ImageRecord>,
{
    let mut groups: IndexMap<String, Vec<ImageRecord>> = IndexMap::new();
    for record in records {
        groups
            .entry(record.name().to_string())
            .or_default()
            .push(record);
    }

    groups
        .into_iter()
        .map(|(name, artifacts)| Release { name, artifacts })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
