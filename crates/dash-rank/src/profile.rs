//! Per-column type profiles.
//!
//! Column types are never declared by the record store, so they are inferred
//! from the values actually present. A column is numeric as soon as one row
//! holds a number in it.

use serde::Serialize;

use dash_model::{Table, ValueKind};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    /// Rows carrying the column at all.
    pub present: usize,
    pub numbers: usize,
    pub strings: usize,
    pub booleans: usize,
    pub nulls: usize,
    pub opaque: usize,
}

impl ColumnProfile {
    pub fn is_numeric(&self) -> bool {
        self.numbers > 0
    }

    /// Numeric on every row of a table with `rows` rows.
    pub fn is_uniformly_numeric(&self, rows: usize) -> bool {
        self.numbers == rows
    }

    pub fn missing(&self, rows: usize) -> usize {
        rows.saturating_sub(self.present)
    }

    /// The most common non-null kind, if any value is non-null.
    pub fn dominant_kind(&self) -> Option<ValueKind> {
        [
            (ValueKind::Number, self.numbers),
            (ValueKind::String, self.strings),
            (ValueKind::Boolean, self.booleans),
            (ValueKind::Opaque, self.opaque),
        ]
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .max_by_key(|(_, count)| *count)
        .map(|(kind, _)| kind)
    }
}

/// Profile every canonical column, in column order.
pub fn profile_columns(table: &Table) -> Vec<ColumnProfile> {
    table
        .columns()
        .iter()
        .map(|name| {
            let mut profile = ColumnProfile {
                name: name.clone(),
                ..ColumnProfile::default()
            };
            for row in table.rows() {
                if !row.has(name) {
                    continue;
                }
                profile.present += 1;
                match row.get(name).kind() {
                    ValueKind::Number => profile.numbers += 1,
                    ValueKind::String => profile.strings += 1,
                    ValueKind::Boolean => profile.booleans += 1,
                    ValueKind::Null => profile.nulls += 1,
                    ValueKind::Opaque => profile.opaque += 1,
                }
            }
            profile
        })
        .collect()
}

/// Canonical columns holding a number on at least one row.
pub fn numeric_columns(table: &Table) -> Vec<&str> {
    table
        .columns()
        .iter()
        .filter(|name| table.numeric_on_any_row(name))
        .map(String::as_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_model::{Row, RowId, Value};

    fn sample() -> Table {
        let mut table = Table::new(vec![
            "Product Name".to_string(),
            "Units Sold".to_string(),
            "Notes".to_string(),
        ]);
        table.push_row(
            Row::new(RowId::new("r1").expect("id"))
                .with_cell("Product Name", "A")
                .with_cell("Units Sold", 3.0)
                .with_cell("Notes", Value::Null),
        );
        table.push_row(
            Row::new(RowId::new("r2").expect("id"))
                .with_cell("Product Name", "B")
                .with_cell("Units Sold", "many"),
        );
        table
    }

    #[test]
    fn counts_kinds_per_column() {
        let profiles = profile_columns(&sample());
        assert_eq!(profiles.len(), 3);
        assert_eq!(profiles[1].numbers, 1);
        assert_eq!(profiles[1].strings, 1);
        assert!(profiles[1].is_numeric());
        assert!(!profiles[1].is_uniformly_numeric(2));
        assert_eq!(profiles[2].nulls, 1);
        assert_eq!(profiles[2].missing(2), 1);
        assert_eq!(profiles[2].dominant_kind(), None);
        assert_eq!(profiles[0].dominant_kind(), Some(ValueKind::String));
    }

    #[test]
    fn numeric_columns_in_canonical_order() {
        assert_eq!(numeric_columns(&sample()), vec!["Units Sold"]);
    }
}
