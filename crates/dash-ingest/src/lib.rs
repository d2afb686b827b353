//! Record ingestion for the dashboard: parsing store exports, normalizing
//! heterogeneous records into tables, and the record-store boundary.

pub mod error;
pub mod normalize;
pub mod record;
pub mod store;

pub use error::{IngestError, Result};
pub use normalize::{normalize, normalize_json};
pub use record::{RawRecord, parse_records};
pub use store::{JsonDirStore, MemoryStore, RecordStore};
