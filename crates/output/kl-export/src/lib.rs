//! Parquet export for keyledger.
//!
//! Writes one row per [`EnrichedRecord`](kl_types::EnrichedRecord), whatever
//! its status, with:
//! - nullable description, classification and temporal columns
//! - `created_date` as a millisecond UTC timestamp or a day-precision date,
//!   chosen once per file by [`TimestampEncoding`]
//! - `last_accessed_date` as a day-precision date
//! - `tags` as a nullable `Map<Utf8, Utf8>`; empty tag sets are null

pub mod config;
pub mod schema;
pub mod writer;

pub use config::{ExportCompression, ExportConfig, TimestampEncoding};
pub use schema::{ENCODING_METADATA_KEY, inventory_schema};
pub use writer::{ExportSummary, ParquetExporter};
