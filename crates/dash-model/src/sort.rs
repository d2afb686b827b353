//! Ranking key specifications.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ID_COLUMN, ModelError, Result};

/// How a candidate column is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Largest number first.
    NumericDesc,
    /// Alphabetical, case-insensitive first.
    LexicographicAsc,
}

impl SortMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NumericDesc => "numeric-desc",
            Self::LexicographicAsc => "lexicographic-asc",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule applied when no declared candidate is present on every row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Fallback {
    /// First canonical column that is numeric on every row, descending.
    #[default]
    FirstAvailableNumericDesc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub column: String,
    pub mode: SortMode,
}

impl SortKey {
    pub fn new(column: impl Into<String>, mode: SortMode) -> Self {
        Self {
            column: column.into(),
            mode,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.column, self.mode)
    }
}

/// Ordered sort-key candidates plus the generic fallback rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub candidates: Vec<SortKey>,
    #[serde(default = "default_fallback")]
    pub fallback: Option<Fallback>,
}

fn default_fallback() -> Option<Fallback> {
    Some(Fallback::default())
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            candidates: Vec::new(),
            fallback: default_fallback(),
        }
    }
}

impl SortSpec {
    /// A spec with no candidates that relies on the numeric fallback.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn then(mut self, column: impl Into<String>, mode: SortMode) -> Self {
        self.candidates.push(SortKey::new(column, mode));
        self
    }

    #[must_use]
    pub fn then_numeric_desc(self, column: impl Into<String>) -> Self {
        self.then(column, SortMode::NumericDesc)
    }

    #[must_use]
    pub fn then_lexicographic_asc(self, column: impl Into<String>) -> Self {
        self.then(column, SortMode::LexicographicAsc)
    }

    #[must_use]
    pub fn without_fallback(mut self) -> Self {
        self.fallback = None;
        self
    }

    /// Check the spec can be evaluated against any table.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidSpec`] when there is nothing to sort by,
    /// or a candidate names an empty, duplicated or reserved column.
    pub fn validate(&self) -> Result<()> {
        if self.candidates.is_empty() && self.fallback.is_none() {
            return Err(ModelError::InvalidSpec(
                "no candidates and no fallback configured".to_string(),
            ));
        }
        let mut seen = BTreeSet::new();
        for key in &self.candidates {
            if key.column.trim().is_empty() {
                return Err(ModelError::InvalidSpec(
                    "candidate column name is empty".to_string(),
                ));
            }
            if key.column == ID_COLUMN {
                return Err(ModelError::InvalidSpec(format!(
                    "row identifier `{ID_COLUMN}` cannot be a sort key"
                )));
            }
            if !seen.insert(key.column.as_str()) {
                return Err(ModelError::InvalidSpec(format!(
                    "candidate `{}` listed more than once",
                    key.column
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_only_spec_is_valid() {
        assert!(SortSpec::new().validate().is_ok());
    }

    #[test]
    fn rejects_nothing_to_sort_by() {
        let err = SortSpec::new().without_fallback().validate().unwrap_err();
        assert!(matches!(err, ModelError::InvalidSpec(_)));
    }

    #[test]
    fn rejects_duplicate_and_blank_candidates() {
        let dup = SortSpec::new()
            .then_numeric_desc("Units Sold")
            .then_lexicographic_asc("Units Sold");
        assert!(dup.validate().is_err());
        assert!(SortSpec::new().then_numeric_desc("  ").validate().is_err());
        assert!(SortSpec::new().then_numeric_desc("id").validate().is_err());
    }

    #[test]
    fn deserializes_kebab_case_modes() {
        let spec: SortSpec = serde_json::from_str(
            r#"{"candidates":[{"column":"Product Name","mode":"lexicographic-asc"}]}"#,
        )
        .expect("parse spec");
        assert_eq!(spec.candidates[0].mode, SortMode::LexicographicAsc);
        assert_eq!(spec.fallback, Some(Fallback::FirstAvailableNumericDesc));
    }
}
