//! Normalized in-memory tables.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{RowId, Value};

/// Name under which the row identifier is exposed to renderers.
///
/// The identifier is never part of a table's canonical columns.
pub const ID_COLUMN: &str = "id";

static NULL: Value = Value::Null;

/// One record: a stable identifier plus the cells present in the source.
///
/// A cell that the source omitted is absent from the row; reading it yields
/// [`Value::Null`], while [`Row::has`] still distinguishes "absent" from
/// "present but null".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: RowId,
    cells: BTreeMap<String, Value>,
}

impl Row {
    pub fn new(id: RowId) -> Self {
        Self {
            id,
            cells: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_cell(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.cells.insert(column.into(), value.into());
    }

    /// Returns true if the column exists in this row, whatever its value.
    pub fn has(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    pub fn get(&self, column: &str) -> &Value {
        self.cells.get(column).unwrap_or(&NULL)
    }
}

/// Ordered rows sharing one canonical column list.
///
/// The canonical order is the field order of the first source record and
/// drives every "first column" decision downstream.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// A table with the same columns and the given rows.
    #[must_use]
    pub fn with_rows(&self, rows: Vec<Row>) -> Self {
        Self {
            columns: self.columns.clone(),
            rows,
        }
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|name| name == column)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.id.as_str()).collect()
    }

    pub fn values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.rows.iter().map(move |row| row.get(column))
    }

    /// True when every row carries the column (value may be null).
    pub fn present_on_every_row(&self, column: &str) -> bool {
        self.rows.iter().all(|row| row.has(column))
    }

    /// True when the column holds a number on every row.
    pub fn numeric_on_every_row(&self, column: &str) -> bool {
        self.rows.iter().all(|row| row.get(column).is_number())
    }

    /// True when the column holds a number on at least one row.
    pub fn numeric_on_any_row(&self, column: &str) -> bool {
        self.rows.iter().any(|row| row.get(column).is_number())
    }
}
