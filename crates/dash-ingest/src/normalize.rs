//! Record normalization: raw records to a uniform [`Table`].

use std::collections::BTreeSet;

use serde_json::Value as JsonValue;
use tracing::debug;

use dash_model::{ID_COLUMN, Row, RowId, Table, Value};

use crate::error::{IngestError, Result};
use crate::record::{RawRecord, parse_records};

/// Normalize raw records into a table.
///
/// The first record's field order becomes the canonical column list. Later
/// records keep only the canonical fields they actually carry, so a missing
/// field reads as null while still counting as absent for presence checks.
/// Fields outside the canonical set are dropped. An empty input yields an
/// empty table.
///
/// # Errors
///
/// Returns a malformed-input error when a record id is blank or repeated.
pub fn normalize<I>(records: I) -> Result<Table>
where
    I: IntoIterator<Item = RawRecord>,
{
    let mut records = records.into_iter().peekable();
    let Some(first) = records.peek() else {
        debug!("no records, returning empty table");
        return Ok(Table::empty());
    };
    let columns: Vec<String> = first
        .fields
        .keys()
        .filter(|name| name.as_str() != ID_COLUMN)
        .cloned()
        .collect();
    let canonical: BTreeSet<String> = columns.iter().cloned().collect();
    let mut table = Table::new(columns);
    let mut seen = BTreeSet::new();
    let mut dropped = 0usize;

    for (index, record) in records.enumerate() {
        let id = RowId::new(record.id)
            .map_err(|_| IngestError::malformed(format!("record {index}: blank `{ID_COLUMN}`")))?;
        if !seen.insert(id.clone()) {
            return Err(IngestError::malformed(format!(
                "record {index}: duplicate `{ID_COLUMN}` {id}"
            )));
        }
        let mut row = Row::new(id);
        for (name, raw) in record.fields {
            if canonical.contains(&name) {
                row.insert(name, Value::from(raw));
            } else {
                dropped += 1;
            }
        }
        table.push_row(row);
    }

    if dropped > 0 {
        debug!(dropped, "ignored fields outside the canonical column set");
    }
    debug!(
        rows = table.len(),
        columns = table.columns().len(),
        "normalized records"
    );
    Ok(table)
}

/// Parse and normalize untyped JSON in one step.
///
/// # Errors
///
/// See [`parse_records`] and [`normalize`].
pub fn normalize_json(raw: &JsonValue) -> Result<Table> {
    normalize(parse_records(raw)?)
}
