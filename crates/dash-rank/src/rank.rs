//! Ranking engine: resolve a sort key from a [`SortSpec`], order, truncate.
//!
//! # Key resolution
//!
//! 1. The first declared candidate present on every row, compared with its
//!    declared mode.
//! 2. Otherwise, if the spec allows it, the first canonical column holding a
//!    number on every row, descending.
//! 3. Otherwise the input order is kept.
//!
//! Sorting is stable, so rows with equal keys keep their relative order and
//! re-ranking a ranked table changes nothing.

use std::cmp::Ordering;
use std::fmt;

use icu_collator::{Collator, CollatorOptions, Strength};
use tracing::{debug, warn};

use dash_model::{Fallback, Result, Row, SortKey, SortMode, SortSpec, Table, Value, cell_text};

/// Pass this as `limit` to keep every row.
pub const NO_LIMIT: usize = 0;

/// The key a ranking pass resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankKey {
    /// A declared candidate.
    Candidate(SortKey),
    /// Column picked by the numeric fallback.
    Fallback(String),
    /// Nothing to sort by; input order kept.
    Unranked,
}

impl RankKey {
    pub fn column(&self) -> Option<&str> {
        match self {
            Self::Candidate(key) => Some(&key.column),
            Self::Fallback(column) => Some(column),
            Self::Unranked => None,
        }
    }

    fn mode(&self) -> Option<SortMode> {
        match self {
            Self::Candidate(key) => Some(key.mode),
            Self::Fallback(_) => Some(SortMode::NumericDesc),
            Self::Unranked => None,
        }
    }
}

impl fmt::Display for RankKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Candidate(key) => write!(f, "{key}"),
            Self::Fallback(column) => write!(f, "{column} (numeric fallback)"),
            Self::Unranked => f.write_str("input order"),
        }
    }
}

/// A ranked table and the key that produced its order.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked {
    pub table: Table,
    pub key: RankKey,
}

/// Resolve which key `spec` selects for `table`.
pub fn resolve_key(table: &Table, spec: &SortSpec) -> RankKey {
    if let Some(key) = spec
        .candidates
        .iter()
        .find(|key| table.present_on_every_row(&key.column))
    {
        return RankKey::Candidate(key.clone());
    }
    match spec.fallback {
        Some(Fallback::FirstAvailableNumericDesc) => table
            .columns()
            .iter()
            .find(|column| table.numeric_on_every_row(column))
            .map_or(RankKey::Unranked, |column| RankKey::Fallback(column.clone())),
        None => RankKey::Unranked,
    }
}

/// Rank `table` by `spec` and keep at most `limit` rows.
///
/// A `limit` of [`NO_LIMIT`] disables truncation.
///
/// # Errors
///
/// Returns [`dash_model::ModelError::InvalidSpec`] if the spec is not
/// well-formed. Tables without any usable key are not an error.
pub fn rank(table: &Table, spec: &SortSpec, limit: usize) -> Result<Table> {
    rank_with_key(table, spec, limit).map(|ranked| ranked.table)
}

/// Like [`rank`], also reporting the resolved key.
///
/// # Errors
///
/// See [`rank`].
pub fn rank_with_key(table: &Table, spec: &SortSpec, limit: usize) -> Result<Ranked> {
    spec.validate()?;
    let key = resolve_key(table, spec);
    let mut rows = table.rows().to_vec();
    match (key.column(), key.mode()) {
        (Some(column), Some(mode)) => {
            let collation = match mode {
                SortMode::LexicographicAsc => Collation::new(),
                SortMode::NumericDesc => Collation::plain(),
            };
            rows.sort_by(|a, b| compare_rows(a, b, column, mode, &collation));
            debug!(key = %key, rows = rows.len(), "ranked table");
        }
        _ => debug!(rows = rows.len(), "no ranking key available, keeping input order"),
    }
    if limit != NO_LIMIT && rows.len() > limit {
        debug!(limit, dropped = rows.len() - limit, "truncated ranked table");
        rows.truncate(limit);
    }
    Ok(Ranked {
        table: table.with_rows(rows),
        key,
    })
}

fn compare_rows(
    a: &Row,
    b: &Row,
    column: &str,
    mode: SortMode,
    collation: &Collation,
) -> Ordering {
    let (a, b) = (a.get(column), b.get(column));
    match mode {
        SortMode::NumericDesc => compare_numeric_desc(a, b),
        SortMode::LexicographicAsc => compare_lexicographic_asc(a, b, collation),
    }
}

/// Larger numbers first; cells without a number sort after all numbers.
fn compare_numeric_desc(a: &Value, b: &Value) -> Ordering {
    match (a.as_number(), b.as_number()) {
        (Some(a), Some(b)) => unsigned_zero(b).total_cmp(&unsigned_zero(a)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// -0.0 and 0.0 tie.
fn unsigned_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}

/// Alphabetical by display text; null cells sort last.
fn compare_lexicographic_asc(a: &Value, b: &Value, collation: &Collation) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (false, false) => collation.compare(&cell_text(a), &cell_text(b)),
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        (true, true) => Ordering::Equal,
    }
}

/// Root-locale string collation at tertiary strength: base letters first,
/// then accents, then case with lowercase first.
pub struct Collation {
    collator: Option<Collator>,
}

impl Collation {
    pub fn new() -> Self {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Tertiary);
        match Collator::try_new(&Default::default(), options) {
            Ok(collator) => Self {
                collator: Some(collator),
            },
            Err(error) => {
                warn!(%error, "root collation unavailable, comparing case-folded text");
                Self::plain()
            }
        }
    }

    /// Case-folded code-point comparison without locale data.
    pub fn plain() -> Self {
        Self { collator: None }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => compare_case_folded(a, b),
        }
    }
}

impl Default for Collation {
    fn default() -> Self {
        Self::new()
    }
}

/// Compare two strings with a one-off [`Collation`].
pub fn collate(a: &str, b: &str) -> Ordering {
    Collation::new().compare(a, b)
}

fn compare_case_folded(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
}
