//! Core types for keyledger.
//!
//! This crate provides the foundational types used throughout the system:
//! - [`ResourceKind`] - The class of managed resource being inventoried
//! - [`ResourceDetail`] / [`ListPage`] - Raw shapes returned by inventory sources
//! - [`EnrichedRecord`] - The normalized, immutable unit of output
//! - [`RecordStatus`] - Outcome of enriching one resource

pub mod record;
pub mod resource;

pub use record::*;
pub use resource::*;
