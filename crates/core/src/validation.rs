//! Field rule checking for artifact metadata.
//!
//! Every record type builds an explicit list of [`FieldRule`]s and hands it
//! to [`validate`], which evaluates all of them and reports every violation
//! rather than stopping at the first one.

use std::fmt;

use uuid::Uuid;
use validator::ValidateLength;

/// Upper bound shared by all length-limited text fields.
pub const MAX_TEXT_LEN: u64 = 4096;

/// A single check applied to a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Text must be present and non-empty; numbers must be non-zero; ids
    /// must not be nil.
    Required,
    /// Text (or every element of a text list) must have a character count
    /// within `min..=max`. Absent text passes; combine with `Required`.
    Length { min: u64, max: u64 },
    /// List must contain at least one element.
    NonEmpty,
    /// Id must be a random (version 4) UUID.
    UuidV4,
}

impl Rule {
    /// The `1..=4096` bound used by names, descriptions and device types.
    pub const TEXT_LENGTH: Rule = Rule::Length {
        min: 1,
        max: MAX_TEXT_LEN,
    };
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "required"),
            Self::Length { min, max } => write!(f, "length({min}|{max})"),
            Self::NonEmpty => write!(f, "non_empty"),
            Self::UuidV4 => write!(f, "uuidv4"),
        }
    }
}

/// The value a rule is evaluated against.
#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    Text(Option<&'a str>),
    TextList(&'a [String]),
    Unsigned(u64),
    Id(&'a Uuid),
}

/// A field name paired with a value and the rule it must satisfy.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule<'a> {
    pub field: &'static str,
    pub value: FieldValue<'a>,
    pub rule: Rule,
}

impl<'a> FieldRule<'a> {
    pub fn new(field: &'static str, value: FieldValue<'a>, rule: Rule) -> Self {
        Self { field, value, rule }
    }
}

/// A violated field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub rule: Rule,
}

impl FieldViolation {
    pub fn new(field: &'static str, rule: Rule) -> Self {
        Self { field, rule }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.rule)
    }
}

/// The full set of rules a record violated. Never empty when returned as
/// an error from [`validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    /// Append every violation from `other`.
    pub fn merge(&mut self, other: ValidationErrors) {
        self.violations.extend(other.violations);
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Whether `field` violated `rule`.
    pub fn contains(&self, field: &str, rule: Rule) -> bool {
        self.violations
            .iter()
            .any(|v| v.field == field && v.rule == rule)
    }

    /// `Ok(())` when nothing was violated, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<Vec<FieldViolation>> for ValidationErrors {
    fn from(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Evaluate every rule, collecting all violations.
pub fn validate(rules: &[FieldRule<'_>]) -> Result<(), ValidationErrors> {
    collect_violations(rules).into_result()
}

/// Evaluate every rule and return the (possibly empty) violation set.
pub fn collect_violations(rules: &[FieldRule<'_>]) -> ValidationErrors {
    rules
        .iter()
        .filter(|r| !satisfies(r.value, r.rule))
        .map(|r| FieldViolation::new(r.field, r.rule))
        .collect::<Vec<_>>()
        .into()
}

fn satisfies(value: FieldValue<'_>, rule: Rule) -> bool {
    match (rule, value) {
        (Rule::Required, FieldValue::Text(text)) => text.is_some_and(|s| !s.is_empty()),
        (Rule::Required, FieldValue::TextList(items)) => !items.is_empty(),
        (Rule::Required, FieldValue::Unsigned(n)) => n != 0,
        (Rule::Required, FieldValue::Id(id)) => !id.is_nil(),

        (Rule::Length { .. }, FieldValue::Text(None)) => true,
        (Rule::Length { min, max }, FieldValue::Text(Some(s))) => {
            s.validate_length(Some(min), Some(max), None)
        }
        (Rule::Length { min, max }, FieldValue::TextList(items)) => items
            .iter()
            .all(|s| s.validate_length(Some(min), Some(max), None)),
        // Numbers and ids are not length-checked.
        (Rule::Length { .. }, FieldValue::Unsigned(_) | FieldValue::Id(_)) => true,

        (Rule::NonEmpty, FieldValue::Text(text)) => text.is_some_and(|s| !s.is_empty()),
        (Rule::NonEmpty, FieldValue::TextList(items)) => !items.is_empty(),
        (Rule::NonEmpty, FieldValue::Unsigned(n)) => n != 0,
        (Rule::NonEmpty, FieldValue::Id(id)) => !id.is_nil(),

        (Rule::UuidV4, FieldValue::Id(id)) => is_uuid_v4(id),
        (Rule::UuidV4, FieldValue::Text(text)) => text
            .and_then(|s| Uuid::parse_str(s).ok())
            .is_some_and(|id| is_uuid_v4(&id)),
        (Rule::UuidV4, FieldValue::TextList(_) | FieldValue::Unsigned(_)) => false,
    }
}

fn is_uuid_v4(id: &Uuid) -> bool {
    id.get_version() == Some(uuid::Version::Random)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
