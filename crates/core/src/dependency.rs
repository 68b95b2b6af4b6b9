//! Artifact dependency values and their flat, indexable projection.
//!
//! `depends` maps a key to a value of arbitrary JSON shape. The store can only
//! index flat scalar fields, so [`unwind`] turns the map into a sequence of
//! `{key, value}` pairs: one per scalar and one per element of a scalar list.
//! A query for "depends on device type X" then becomes a containment match on
//! `{key: "device_type", value: X}`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single indexable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Boolean(bool),
    Number(serde_json::Number),
    Text(String),
}

/// A value stored under a `depends` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DependencyValue {
    Scalar(ScalarValue),
    List(Vec<DependencyValue>),
    /// Stored verbatim but never indexed.
    Map(BTreeMap<String, DependencyValue>),
}

/// The `depends` mapping. Ordered so that the derived index is deterministic.
pub type Dependencies = BTreeMap<String, DependencyValue>;

impl DependencyValue {
    /// A list of text scalars.
    pub fn text_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(
            items
                .into_iter()
                .map(|s| Self::Scalar(ScalarValue::Text(s.into())))
                .collect(),
        )
    }
}

impl From<&str> for DependencyValue {
    fn from(value: &str) -> Self {
        Self::Scalar(ScalarValue::Text(value.to_string()))
    }
}

impl From<String> for DependencyValue {
    fn from(value: String) -> Self {
        Self::Scalar(ScalarValue::Text(value))
    }
}

impl From<bool> for DependencyValue {
    fn from(value: bool) -> Self {
        Self::Scalar(ScalarValue::Boolean(value))
    }
}

impl From<i64> for DependencyValue {
    fn from(value: i64) -> Self {
        Self::Scalar(ScalarValue::Number(value.into()))
    }
}

/// One entry of the derived dependency index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyIndexEntry {
    pub key: String,
    pub value: ScalarValue,
}

impl DependencyIndexEntry {
    pub fn new(key: impl Into<String>, value: ScalarValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// A `depends` value whose shape cannot be flattened into index entries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexingError {
    #[error("dependency `{key}` holds a nested mapping, which cannot be indexed")]
    NestedMap { key: String },

    #[error("dependency `{key}` holds a list nested inside a list, which cannot be indexed")]
    NestedList { key: String },
}

/// Flatten `depends` into index entries.
///
/// Keys are visited in ascending order and list elements in list order. The
/// whole map is rejected if any value is a mapping or a list contains a
/// non-scalar element; nothing is silently dropped.
pub fn unwind(depends: &Dependencies) -> Result<Vec<DependencyIndexEntry>, IndexingError> {
    let mut entries = Vec::with_capacity(depends.len());

    for (key, value) in depends {
        match value {
            DependencyValue::Scalar(scalar) => {
                entries.push(DependencyIndexEntry::new(key, scalar.clone()));
            }
            DependencyValue::List(items) => {
                for item in items {
                    match item {
                        DependencyValue::Scalar(scalar) => {
                            entries.push(DependencyIndexEntry::new(key, scalar.clone()));
                        }
                        DependencyValue::List(_) => {
                            return Err(IndexingError::NestedList { key: key.clone() });
                        }
                        DependencyValue::Map(_) => {
                            return Err(IndexingError::NestedMap { key: key.clone() });
                        }
                    }
                }
            }
            DependencyValue::Map(_) => {
                return Err(IndexingError::NestedMap { key: key.clone() });
            }
        }
    }

    Ok(entries)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
