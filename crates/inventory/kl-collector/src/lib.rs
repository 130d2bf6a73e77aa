//! kl-collector - Inventory collection for keyledger.
//!
//! This crate turns an [`InventorySource`](kl_traits::InventorySource) into a
//! finished [`Inventory`]:
//!
//! - Exhaustive pagination with optional ownership filtering
//! - Per-resource enrichment that never fails, with access-denial
//!   classification
//! - Bounded-concurrency enrichment that preserves listing order
//! - Deterministic tag-column discovery over active records
//!
//! # Example
//!
//! ```ignore
//! use kl_collector::{Collector, CollectorConfig};
//!
//! let collector = Collector::new(source, CollectorConfig::new().with_concurrency(4));
//! let inventory = collector.collect().await?;
//!
//! for column in inventory.tag_columns() {
//!     println!("{column}");
//! }
//! ```

pub mod collector;
pub mod config;
pub mod enrich;
pub mod paginate;
pub mod schema;
pub mod stats;

pub use collector::{Collector, Inventory};
pub use config::{CollectorConfig, EnrichPolicy, ListOptions};
pub use enrich::enrich;
pub use paginate::{list_all, list_resources};
pub use schema::discover_tag_columns;
pub use stats::InventoryStats;
