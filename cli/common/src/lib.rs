//! Shared utilities for keyledger CLI binaries.
//!
//! Log level selection, logging setup and number formatting used by the
//! `keyledger` binary.

pub mod args;
pub mod format;
pub mod logging;

pub use args::LogLevel;
pub use format::format_number;
pub use logging::init_logging;
