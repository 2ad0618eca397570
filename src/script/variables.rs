//! Named parameters available while resolving fragments.

use crate::error::AppError;
use crate::types::ValidationError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Conventional keys looked up in [`VariableContext::additional`].
pub mod keys {
    pub const MESSAGE: &str = "message";
    pub const SHEET: &str = "sheet";
    pub const TABLE: &str = "table";
    pub const ROW: &str = "row";
    pub const COLUMN: &str = "column";
    pub const VALUE: &str = "value";
}

/// Parameters for one script build.
///
/// Nothing here is required up front. Whether a fragment finds what it needs
/// is decided when that fragment is resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariableContext {
    pub file_path: Option<String>,
    pub export_path: Option<String>,
    pub additional: IndexMap<String, String>,
}

impl VariableContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file_path(mut self, path: impl Into<String>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    pub fn with_export_path(mut self, path: impl Into<String>) -> Self {
        self.export_path = Some(path.into());
        self
    }

    /// Adds or replaces an `additional` entry.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.additional.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.additional.get(key).map(String::as_str)
    }

    /// Parses a `key=value` assignment into an `additional` entry.
    ///
    /// Only the first `=` splits; the value may itself contain `=`.
    pub fn assign(&mut self, assignment: &str) -> Result<(), ValidationError> {
        let (key, value) =
            assignment
                .split_once('=')
                .ok_or_else(|| ValidationError::InvalidAssignment {
                    input: assignment.to_string(),
                    reason: "expected key=value".to_string(),
                })?;

        let key = key.trim();
        if key.is_empty() {
            return Err(ValidationError::InvalidAssignment {
                input: assignment.to_string(),
                reason: "key cannot be empty".to_string(),
            });
        }

        self.insert(key, value);
        Ok(())
    }

    /// Loads a context from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|source| AppError::JsonParseError {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overlays `other` on top of `self`: present values in `other` win.
    pub fn merged_with(mut self, other: VariableContext) -> Self {
        if other.file_path.is_some() {
            self.file_path = other.file_path;
        }
        if other.export_path.is_some() {
            self.export_path = other.export_path;
        }
        self.additional.extend(other.additional);
        self
    }
}
