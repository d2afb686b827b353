//! Default chart axes for tables whose columns are not known in advance.

use tracing::{debug, warn};

use dash_model::{AxisSelection, ID_COLUMN, Table};

/// Pick the label and value axes for `table`.
///
/// Hints are honored only when they name a canonical column; the value hint
/// must additionally hold a number on at least one row. The label hint may
/// also name the row identifier `id`, which is not a canonical column; the
/// labels are then the row ids. Without a usable hint the label axis is the
/// first canonical column and the value axis the first other column holding
/// a number. When no column holds numbers the first other column is used
/// anyway and flagged as degenerate: its chart series is all zeros.
///
/// An empty table, or one without columns, yields the no-data sentinel.
pub fn select_axes(
    table: &Table,
    hinted_label: Option<&str>,
    hinted_value: Option<&str>,
) -> AxisSelection {
    if table.is_empty() || table.columns().is_empty() {
        debug!(rows = table.len(), "no data to plot");
        return AxisSelection::no_data();
    }
    let columns = table.columns();

    let label = match hinted_label {
        Some(hint) if hint == ID_COLUMN || table.has_column(hint) => hint.to_string(),
        hint => {
            if let Some(hint) = hint {
                debug!(hint, "label hint is not a column, using default");
            }
            columns[0].clone()
        }
    };

    if let Some(hint) = hinted_value {
        if table.has_column(hint) && table.numeric_on_any_row(hint) {
            return AxisSelection::new(label, hint);
        }
        debug!(hint, "value hint is not a numeric column, using default");
    }

    let mut others = columns.iter().filter(|column| **column != label);
    if let Some(value) = others
        .clone()
        .find(|column| table.numeric_on_any_row(column))
    {
        return AxisSelection::new(label, value.as_str());
    }

    let value = others.next().cloned().unwrap_or_else(|| columns[0].clone());
    warn!(
        label = %label,
        value = %value,
        "no numeric column, value axis will plot as zeros"
    );
    AxisSelection {
        degenerate_value: true,
        ..AxisSelection::new(label, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_model::{Row, RowId};

    fn table(columns: &[&str], rows: Vec<Row>) -> Table {
        let mut table = Table::new(columns.iter().map(|c| c.to_string()).collect());
        for row in rows {
            table.push_row(row);
        }
        table
    }

    fn row(id: &str) -> Row {
        Row::new(RowId::new(id).expect("id"))
    }

    #[test]
    fn valid_hints_win() {
        let t = table(
            &["Product Name", "Units Sold", "Total Price"],
            vec![
                row("r1")
                    .with_cell("Product Name", "A")
                    .with_cell("Units Sold", 1.0)
                    .with_cell("Total Price", 9.0),
            ],
        );
        let axes = select_axes(&t, Some("Product Name"), Some("Total Price"));
        assert_eq!(axes, AxisSelection::new("Product Name", "Total Price"));
    }

    #[test]
    fn id_is_an_acceptable_label_hint() {
        let t = table(&["Units Sold"], vec![row("r1").with_cell("Units Sold", 1.0)]);
        let axes = select_axes(&t, Some(ID_COLUMN), None);
        assert_eq!(axes, AxisSelection::new(ID_COLUMN, "Units Sold"));
    }

    #[test]
    fn numeric_label_column_is_skipped_for_value() {
        let t = table(
            &["Year", "Units Sold"],
            vec![row("r1").with_cell("Year", 2024.0).with_cell("Units Sold", 5.0)],
        );
        let axes = select_axes(&t, None, None);
        assert_eq!(axes, AxisSelection::new("Year", "Units Sold"));
    }

    #[test]
    fn single_column_table_reuses_label_as_value() {
        let t = table(&["Name"], vec![row("r1").with_cell("Name", "x")]);
        let axes = select_axes(&t, None, None);
        assert_eq!(axes.label_column, "Name");
        assert_eq!(axes.value_column, "Name");
        assert!(axes.degenerate_value);
    }

    #[test]
    fn rows_without_columns_have_no_data() {
        let t = table(&[], vec![row("r1")]);
        assert!(select_axes(&t, None, None).no_data);
    }
}
