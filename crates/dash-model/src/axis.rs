use serde::{Deserialize, Serialize};

/// Chosen chart axes for one table.
///
/// Both names are canonical columns of the table they were derived from,
/// unless `no_data` is set, in which case both are empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AxisSelection {
    pub label_column: String,
    pub value_column: String,
    /// The source table had no rows.
    pub no_data: bool,
    /// No column holds numbers; the value series renders as zeros.
    pub degenerate_value: bool,
}

impl AxisSelection {
    pub fn new(label_column: impl Into<String>, value_column: impl Into<String>) -> Self {
        Self {
            label_column: label_column.into(),
            value_column: value_column.into(),
            no_data: false,
            degenerate_value: false,
        }
    }

    /// The sentinel returned for an empty table.
    pub fn no_data() -> Self {
        Self {
            no_data: true,
            ..Self::default()
        }
    }

    pub fn has_data(&self) -> bool {
        !self.no_data
    }
}
