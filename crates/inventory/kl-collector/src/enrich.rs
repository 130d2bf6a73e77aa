//! Per-resource enrichment.

use kl_traits::InventorySource;
use kl_types::{EnrichedRecord, RecordStatus, ResourceId, truncate_to_day};
use std::collections::BTreeMap;
use tracing::debug;

use crate::config::EnrichPolicy;

/// Enrich a single resource into an [`EnrichedRecord`].
///
/// Never fails: every failure ends up in the record status.
///
/// 1. `describe` the resource. A denial becomes
///    [`RecordStatus::NotAuthorized`], any other failure
///    [`RecordStatus::Error`]; neither carries metadata.
/// 2. The provider state is kept verbatim as [`RecordStatus::Active`] when it
///    equals `policy.active_state`, [`RecordStatus::Inactive`] otherwise.
/// 3. Only active resources get their classification and a `list_tags`
///    call. Tag failures leave the tags empty.
pub async fn enrich<S>(source: &S, id: &ResourceId, policy: &EnrichPolicy) -> EnrichedRecord
where
    S: InventorySource + ?Sized,
{
    let detail = match source.describe(id).await {
        Ok(detail) => detail,
        Err(e) if policy.classifier.is_denied(&e) => {
            debug!(id = %id, error = %e, "Describe denied");
            return EnrichedRecord::not_authorized(id.as_str());
        }
        Err(e) => {
            debug!(id = %id, error = %e, "Describe failed");
            return EnrichedRecord::failed(id.as_str(), e.to_string());
        }
    };

    let active = detail.state == policy.active_state;
    let status = if active {
        RecordStatus::Active(detail.state)
    } else {
        RecordStatus::Inactive(detail.state)
    };

    let mut record = EnrichedRecord::new(id.as_str(), status);
    record.created_at = detail.created_at;
    record.last_accessed = detail.last_accessed_at.as_ref().map(truncate_to_day);
    record.description = detail.description;

    if active {
        record.classification = detail.classification;
        record.tags = fetch_tags(source, id).await;
    }

    debug!(id = %id, status = %record.status, tags = record.tags.len(), "Enriched resource");
    record
}

/// Best-effort tag retrieval.
async fn fetch_tags<S>(source: &S, id: &ResourceId) -> BTreeMap<String, String>
where
    S: InventorySource + ?Sized,
{
    match source.list_tags(id).await {
        Ok(tags) => tags.into_iter().map(|t| (t.key, t.value)).collect(),
        Err(e) => {
            debug!(id = %id, error = %e, "Tag lookup failed, continuing without tags");
            BTreeMap::new()
        }
    }
}
