//! Artifact header metadata: identity, compatibility, and dependencies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dependency::{
    unwind, Dependencies, DependencyIndexEntry, DependencyValue, IndexingError,
};
use crate::error::ArtifactError;
use crate::types::Timestamp;
use crate::validation::{collect_violations, FieldRule, FieldValue, Rule, ValidationErrors};

/// The `depends` key that always mirrors `device_types_compatible`.
pub const DEVICE_TYPE_KEY: &str = "device_type";

/// Artifact format and format version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactInfo {
    pub format: String,
    pub version: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTypeInfo {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub update_type: Option<String>,
}

/// A payload file carried by an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateFile {
    pub name: String,
    pub checksum: String,
    pub size: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<Timestamp>,
}

/// One update contained in an artifact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Update {
    #[serde(default)]
    pub type_info: UpdateTypeInfo,
    #[serde(default)]
    pub files: Vec<UpdateFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_data: Option<serde_json::Value>,
}

/// Metadata read from the artifact header.
///
/// This is the API shape. The stored shape is [`PersistedArtifact`], which is
/// only ever produced through [`ArtifactMetadata::to_persisted`] so that the
/// dependency index can never be supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub device_types_compatible: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<ArtifactInfo>,

    #[serde(default)]
    pub signed: bool,

    #[serde(default)]
    pub updates: Vec<Update>,

    #[serde(
        rename = "artifact_provides",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub provides: BTreeMap<String, String>,

    #[serde(
        rename = "artifact_depends",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub depends: Dependencies,
}

impl ArtifactMetadata {
    pub fn new(name: impl Into<String>, device_types_compatible: Vec<String>) -> Self {
        Self {
            name: name.into(),
            device_types_compatible,
            ..Self::default()
        }
    }

    /// Overwrite `depends["device_type"]` with the compatible device types.
    pub fn augment_depends(&mut self) {
        self.depends.insert(
            DEVICE_TYPE_KEY.to_string(),
            DependencyValue::text_list(self.device_types_compatible.iter().cloned()),
        );
    }

    /// Augment `depends`, then check every field rule.
    pub fn validate(&mut self) -> Result<(), ValidationErrors> {
        self.augment_depends();
        self.violations().into_result()
    }

    /// Flat index over the current `depends` map.
    pub fn dependency_index(&self) -> Result<Vec<DependencyIndexEntry>, IndexingError> {
        unwind(&self.depends)
    }

    /// Validate, rebuild the dependency index, and produce the stored shape.
    pub fn to_persisted(&mut self) -> Result<PersistedArtifact, ArtifactError> {
        self.validate()?;
        let depends_idx = self.dependency_index()?;
        Ok(PersistedArtifact::from_parts(self, depends_idx))
    }

    pub(crate) fn violations(&self) -> ValidationErrors {
        let mut rules = vec![
            FieldRule::new("name", FieldValue::Text(Some(&self.name)), Rule::Required),
            FieldRule::new("name", FieldValue::Text(Some(&self.name)), Rule::TEXT_LENGTH),
            FieldRule::new(
                "device_types_compatible",
                FieldValue::TextList(&self.device_types_compatible),
                Rule::NonEmpty,
            ),
            FieldRule::new(
                "device_types_compatible",
                FieldValue::TextList(&self.device_types_compatible),
                Rule::TEXT_LENGTH,
            ),
        ];
        if let Some(info) = &self.info {
            rules.push(FieldRule::new(
                "info.format",
                FieldValue::Text(Some(&info.format)),
                Rule::Required,
            ));
            rules.push(FieldRule::new(
                "info.version",
                FieldValue::Unsigned(u64::from(info.version)),
                Rule::Required,
            ));
        }
        collect_violations(&rules)
    }
}

/// Stored shape of [`ArtifactMetadata`], carrying the derived `depends_idx`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedArtifact {
    pub name: String,
    pub device_types_compatible: Vec<String>,
    #[serde(default)]
    pub info: Option<ArtifactInfo>,
    #[serde(default)]
    pub signed: bool,
    #[serde(default)]
    pub updates: Vec<Update>,
    #[serde(default)]
    pub provides: BTreeMap<String, String>,
    #[serde(default)]
    pub depends: Dependencies,
    #[serde(default)]
    pub depends_idx: Vec<DependencyIndexEntry>,
}

impl PersistedArtifact {
    pub(crate) fn from_parts(
        meta: &ArtifactMetadata,
        depends_idx: Vec<DependencyIndexEntry>,
    ) -> Self {
        Self {
            name: meta.name.clone(),
            device_types_compatible: meta.device_types_compatible.clone(),
            info: meta.info.clone(),
            signed: meta.signed,
            updates: meta.updates.clone(),
            provides: meta.provides.clone(),
            depends: meta.depends.clone(),
            depends_idx,
        }
    }
}

/// Reading back discards the stored index; it is rebuilt on the next write.
impl From<PersistedArtifact> for ArtifactMetadata {
    fn from(doc: PersistedArtifact) -> Self {
        Self {
            name: doc.name,
            device_types_compatible: doc.device_types_compatible,
            info: doc.info,
            signed: doc.signed,
            updates: doc.updates,
            provides: doc.provides,
            depends: doc.depends,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
