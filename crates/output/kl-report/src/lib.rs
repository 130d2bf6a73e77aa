//! Fixed-width text reports for keyledger.
//!
//! - [`Table`] - Generic left-aligned table with computed column widths
//! - [`render_report`] - Active and not-authorized tables plus a tally

pub mod report;
pub mod table;

pub use report::{active_table, not_authorized_table, render_report, render_tally};
pub use table::{PLACEHOLDER, Table};
