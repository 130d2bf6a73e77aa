//! Inventory reports built from [`Table`]s.

use kl_collector::Inventory;
use kl_types::{EnrichedRecord, ResourceKind};
use std::fmt::Write;

use crate::table::{PLACEHOLDER, Table};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Table of active records with one extra column per discovered tag key.
pub fn active_table(kind: ResourceKind, records: &[&EnrichedRecord], tag_columns: &[String]) -> Table {
    let mut headers = vec![
        kind.id_label().to_string(),
        "Status".to_string(),
        "Creation Date".to_string(),
        kind.classification_label().to_string(),
    ];
    headers.extend(tag_columns.iter().cloned());

    let mut table = Table::new(headers);
    for record in records {
        let mut row = vec![
            record.id.clone(),
            record.status.to_string(),
            record
                .created_at
                .map(|ts| ts.format(DATE_FORMAT).to_string())
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            record
                .classification
                .clone()
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
        ];
        row.extend(tag_columns.iter().map(|key| {
            match record.tag(key) {
                Some(value) if !value.is_empty() => value.to_string(),
                _ => PLACEHOLDER.to_string(),
            }
        }));
        table.push_row(row);
    }

    table
}

/// Table of records whose describe call was denied.
///
/// Never carries tag columns: tags are not fetched for these records.
pub fn not_authorized_table(kind: ResourceKind, records: &[&EnrichedRecord]) -> Table {
    let mut table = Table::new([kind.id_label(), "Status"]);
    for record in records {
        table.push_row([record.id.clone(), record.status.to_string()]);
    }
    table
}

/// Render the full text report for an inventory.
///
/// Empty tables are left out; the tally is always printed.
pub fn render_report(inventory: &Inventory) -> String {
    let kind = inventory.kind;
    let mut out = String::new();

    let active = inventory.active();
    if !active.is_empty() {
        let columns = inventory.tag_columns();
        let _ = writeln!(out, "=== ACTIVE {} ===", kind.plural());
        out.push('\n');
        out.push_str(&active_table(kind, &active, &columns).render());
    }

    let denied = inventory.not_authorized();
    if !denied.is_empty() {
        if !out.is_empty() {
            out.push('\n');
        }
        let _ = writeln!(out, "=== NOT AUTHORIZED {} ===", kind.plural());
        out.push('\n');
        out.push_str(&not_authorized_table(kind, &denied).render());
    }

    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(&render_tally(inventory));
    out
}

/// Counts of total, active, not authorized, inactive and errored records.
pub fn render_tally(inventory: &Inventory) -> String {
    let stats = &inventory.stats;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Total {}: {}",
        inventory.kind.plural().to_lowercase(),
        inventory.records.len()
    );
    let _ = writeln!(out, "  Active:         {}", stats.active);
    let _ = writeln!(out, "  Not Authorized: {}", stats.not_authorized);
    let _ = writeln!(out, "  Inactive:       {}", stats.inactive);
    let _ = writeln!(out, "  Errors:         {}", stats.errors);
    out
}
