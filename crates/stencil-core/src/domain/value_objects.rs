//! Domain value objects: Language and TemplateName.
//!
//! # Design
//!
//! These are pure value types: equality-by-value, no identity. Both are
//! validated on construction so they are always safe to splice into a file
//! path, a bundle resource path, or a compiled type identifier.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trailing character that marks a template name as "skip the override
/// directory". Stripped before bundle and compiled lookups.
pub const COMPILED_ONLY_MARKER: char = '!';

// ── Language ─────────────────────────────────────────────────────────────────

/// A target language identifier, e.g. `Rust`, `TypeScript`, `CSharp`.
///
/// Languages are open-ended: any identifier made of ASCII alphanumerics, `_`
/// and `-` is accepted. Whether templates exist for it is decided at
/// resolution time by the bundles and the compiled registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Language(String);

impl Language {
    /// Create a validated language identifier.
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        validate_identifier(&value).map_err(|reason| DomainError::InvalidLanguage {
            value: value.clone(),
            reason,
        })?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Language {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.0
    }
}

// ── TemplateName ─────────────────────────────────────────────────────────────

/// A logical template slot name, e.g. `Class` or `Class!`.
///
/// Invariant: the part before any trailing [`COMPILED_ONLY_MARKER`]s is a
/// non-empty identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TemplateName(String);

impl TemplateName {
    /// Create a validated template name.
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let base = value.trim_end_matches(COMPILED_ONLY_MARKER);
        validate_identifier(base).map_err(|reason| DomainError::InvalidTemplateName {
            value: value.clone(),
            reason,
        })?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the name ends in the compiled-only marker.
    pub fn is_compiled_only(&self) -> bool {
        self.0.ends_with(COMPILED_ONLY_MARKER)
    }

    /// The name with every trailing marker removed.
    pub fn without_marker(&self) -> &str {
        self.0.trim_end_matches(COMPILED_ONLY_MARKER)
    }

    /// The name a blank inclusion directive resolves to from inside this
    /// template: the same slot with the marker appended, so resolution skips
    /// the override directory and lands on the bundled or compiled version.
    pub fn continuation(&self) -> Self {
        Self(format!("{}{}", self.0, COMPILED_ONLY_MARKER))
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TemplateName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for TemplateName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TemplateName> for String {
    fn from(name: TemplateName) -> Self {
        name.0
    }
}

fn validate_identifier(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err("must not be empty".into());
    }
    match value
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
        Some(c) => Err(format!("contains disallowed character {c:?}")),
        None => Ok(()),
    }
}
