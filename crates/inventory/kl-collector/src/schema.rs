//! Dynamic column discovery.

use kl_types::EnrichedRecord;
use std::collections::BTreeSet;

/// Sorted union of tag keys across active records.
///
/// Records in any other status are ignored. The result is sorted
/// lexicographically, so identical input always yields identical columns.
pub fn discover_tag_columns<'a, I>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a EnrichedRecord>,
{
    let keys: BTreeSet<&str> = records
        .into_iter()
        .filter(|r| r.status.is_active())
        .flat_map(|r| r.tags.keys().map(String::as_str))
        .collect();

    keys.into_iter().map(str::to_string).collect()
}
