//! Core data model for the sales dashboard: loosely-typed values, normalized
//! tables, ranking specs and chart axis selections.

pub mod axis;
pub mod display;
pub mod error;
pub mod ids;
pub mod response;
pub mod sort;
pub mod table;
pub mod value;

pub use axis::AxisSelection;
pub use display::{cell_text, display_label, format_number};
pub use error::{ModelError, Result};
pub use ids::RowId;
pub use response::Response;
pub use sort::{Fallback, SortKey, SortMode, SortSpec};
pub use table::{ID_COLUMN, Row, Table};
pub use value::{Value, ValueKind};
