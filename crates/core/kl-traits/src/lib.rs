//! Core traits for keyledger.
//!
//! This crate defines the seam between the pipeline and cloud providers:
//! - [`InventorySource`] - Listing, detail and tag APIs for one resource kind
//! - [`MemorySource`] - In-memory source for tests and dry runs

pub mod memory;
pub mod source;

pub use memory::*;
pub use source::*;
