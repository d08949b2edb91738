//! The normalized migration record shared by adapters, the graph and the rules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// A non-empty migration identifier.
///
/// Django ids are `app_label.file_stem`, Alembic ids are revision hashes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MigrationId(String);

impl MigrationId {
    /// Create an id, returning `None` for an empty string.
    pub fn try_new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    /// Return the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for MigrationId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        MigrationId::try_new(s)
            .ok_or_else(|| serde::de::Error::custom("migration id must not be empty"))
    }
}

impl fmt::Display for MigrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MigrationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::ops::Deref for MigrationId {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for MigrationId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for MigrationId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// One migration file, normalized across frameworks.
///
/// Records are produced by discovery adapters and only ever borrowed by the
/// graph builder and the lint rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationRecord {
    /// Globally unique id within one discovery run
    pub id: MigrationId,
    /// Namespace (Django app label, or `alembic`)
    pub group: String,
    /// Ids this migration depends on, in declaration order. May dangle.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Human-readable operation labels (e.g. `DROP TABLE: users`)
    #[serde(default)]
    pub operations: Vec<String>,
    /// Full source text used for pattern scanning
    #[serde(default)]
    pub raw_content: String,
    /// File the record was read from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<PathBuf>,
}

impl MigrationRecord {
    /// Create a record with no dependencies, operations or content.
    pub fn new(id: MigrationId, group: impl Into<String>) -> Self {
        Self {
            id,
            group: group.into(),
            dependencies: Vec::new(),
            operations: Vec::new(),
            raw_content: String::new(),
            source_path: None,
        }
    }

    /// Set the declared dependencies.
    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    /// Set the operation labels.
    pub fn with_operations<I, S>(mut self, operations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.operations = operations.into_iter().map(Into::into).collect();
        self
    }

    /// Set the raw source text.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.raw_content = content.into();
        self
    }

    /// Set the source file path.
    pub fn with_source_path(mut self, path: impl AsRef<Path>) -> Self {
        self.source_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Source path as a display string, or an empty string when unknown.
    pub fn display_path(&self) -> String {
        self.source_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "migration_test.rs"]
mod tests;
