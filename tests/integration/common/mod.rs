//! Common utilities for integration tests.
//!
//! Fixture sources for pipeline tests and a LocalStack context for the AWS
//! adapter tests.

pub mod fixtures;
pub mod localstack;

pub use fixtures::{denied, enabled, read_parquet, scenario_source};
pub use localstack::LocalStackTestContext;
