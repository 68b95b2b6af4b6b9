//! Artifact records: user description plus artifact header metadata.
//!
//! [`ImageRecord`] serializes (via serde) to the flat API shape. The stored
//! document is a separate type, [`PersistedImage`], built only by
//! [`ImageRecord::to_persisted_document`]. Neither composed part contributes
//! its own stored shape; the record assembles the document itself.

use chrono::{SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::artifact::{ArtifactMetadata, PersistedArtifact, DEVICE_TYPE_KEY};
use crate::dependency::{DependencyIndexEntry, ScalarValue};
use crate::error::ArtifactError;
use crate::types::{ImageId, Timestamp};
use crate::validation::{collect_violations, FieldRule, FieldValue, Rule, ValidationErrors};

/// Information provided by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ImageDescription {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        self.violations().into_result()
    }

    fn violations(&self) -> ValidationErrors {
        collect_violations(&[FieldRule::new(
            "description",
            FieldValue::Text(self.description.as_deref()),
            Rule::TEXT_LENGTH,
        )])
    }
}

/// An uploaded artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    id: ImageId,

    #[serde(flatten)]
    meta: ImageDescription,

    #[serde(flatten)]
    meta_artifact: ArtifactMetadata,

    /// Artifact size in bytes.
    size: i64,

    /// Last modification time, including upload time. Microsecond precision,
    /// matching what the store keeps.
    modified: Timestamp,
}

impl ImageRecord {
    /// Create a record stamped with the current time.
    pub fn new(
        id: ImageId,
        meta: ImageDescription,
        meta_artifact: ArtifactMetadata,
        size: i64,
    ) -> Self {
        Self {
            id,
            meta,
            meta_artifact,
            size,
            modified: stamp(Utc::now()),
        }
    }

    pub fn id(&self) -> ImageId {
        self.id
    }

    pub fn modified(&self) -> Timestamp {
        self.modified
    }

    pub fn name(&self) -> &str {
        &self.meta_artifact.name
    }

    pub fn meta(&self) -> &ImageDescription {
        &self.meta
    }

    pub fn meta_artifact(&self) -> &ArtifactMetadata {
        &self.meta_artifact
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    pub fn set_modified(&mut self, modified: Timestamp) {
        self.modified = stamp(modified);
    }

    /// Replace the user description and stamp the modification time.
    pub fn set_description(&mut self, meta: ImageDescription) {
        self.meta = meta;
        self.set_modified(Utc::now());
    }

    /// Check the id and both composed parts, reporting every violation.
    ///
    /// Augments the artifact's `depends` as a side effect.
    pub fn validate(&mut self) -> Result<(), ValidationErrors> {
        self.meta_artifact.augment_depends();

        let mut errors = collect_violations(&[FieldRule::new(
            "id",
            FieldValue::Id(&self.id),
            Rule::UuidV4,
        )]);
        errors.merge(self.meta.violations());
        errors.merge(self.meta_artifact.violations());
        errors.into_result()
    }

    /// Build the stored document.
    ///
    /// Validates the whole record, rebuilds the dependency index from the
    /// augmented `depends`, and fails without producing anything if either
    /// step fails.
    pub fn to_persisted_document(&mut self) -> Result<PersistedImage, ArtifactError> {
        self.validate()?;
        let depends_idx = self.meta_artifact.dependency_index()?;

        Ok(PersistedImage {
            id: self.id,
            meta: self.meta.clone(),
            meta_artifact: PersistedArtifact::from_parts(&self.meta_artifact, depends_idx),
            size: self.size,
            modified: self.modified,
        })
    }
}

fn stamp(ts: Timestamp) -> Timestamp {
    ts.trunc_subsecs(6)
}

/// Stored document shape of an [`ImageRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedImage {
    pub id: ImageId,
    pub meta: ImageDescription,
    pub meta_artifact: PersistedArtifact,
    pub size: i64,
    pub modified: Timestamp,
}

impl From<PersistedImage> for ImageRecord {
    fn from(doc: PersistedImage) -> Self {
        Self {
            id: doc.id,
            meta: doc.meta,
            meta_artifact: doc.meta_artifact.into(),
            size: doc.size,
            modified: doc.modified,
        }
    }
}

/// Restricts an artifact listing by dependency index entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFilter {
    /// Only artifacts whose `depends_idx` holds `{key: "device_type", value: <this>}`.
    #[serde(default)]
    pub device_type: Option<String>,
}

impl ImageFilter {
    /// Index entries a matching document must contain.
    pub fn required_entries(&self) -> Vec<DependencyIndexEntry> {
        self.device_type
            .iter()
            .filter(|d| !d.is_empty())
            .map(|d| DependencyIndexEntry::new(DEVICE_TYPE_KEY, ScalarValue::Text(d.clone())))
            .collect()
    }

    pub fn matches(&self, doc: &PersistedImage) -> bool {
        self.required_entries()
            .iter()
            .all(|entry| doc.meta_artifact.depends_idx.contains(entry))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
