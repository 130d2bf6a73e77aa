//! Main Collector implementation.

use futures::{StreamExt, stream};
use kl_error::Result;
use kl_traits::InventorySource;
use kl_types::{EnrichedRecord, ResourceKind};
use tracing::info;

use crate::config::CollectorConfig;
use crate::enrich::enrich;
use crate::paginate::list_all;
use crate::schema::discover_tag_columns;
use crate::stats::InventoryStats;

/// Coordinates listing and enrichment for one inventory source.
///
/// Generic over the source so the same pipeline drives KMS, Secrets Manager
/// and the in-memory source used by tests.
pub struct Collector<S: InventorySource> {
    source: S,
    config: CollectorConfig,
}

impl<S: InventorySource> Collector<S> {
    /// Create a new Collector.
    pub fn new(source: S, config: CollectorConfig) -> Self {
        Self { source, config }
    }

    /// The underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// List every resource, then enrich each one.
    ///
    /// Enrichment runs with up to `config.concurrency` calls in flight;
    /// records come back in listing order either way. Only listing failures
    /// are returned as errors.
    pub async fn collect(&self) -> Result<Inventory> {
        let mut stats = InventoryStats::new();
        let kind = self.source.kind();

        info!(kind = %kind, owned_only = self.config.owned_only, "Listing resources");
        let ids = list_all(&self.source, &self.config.list_options()).await?;
        stats.listed = ids.len();

        info!(
            kind = %kind,
            count = ids.len(),
            concurrency = self.config.concurrency,
            "Enriching resources"
        );
        let policy = self.config.enrich_policy();
        let records: Vec<EnrichedRecord> = stream::iter(ids.iter())
            .map(|id| enrich(&self.source, id, &policy))
            .buffered(self.config.concurrency.max(1))
            .collect()
            .await;

        for record in &records {
            stats.record(&record.status);
        }
        stats.complete();

        info!(
            kind = %kind,
            active = stats.active,
            not_authorized = stats.not_authorized,
            "Collection complete"
        );

        Ok(Inventory {
            kind,
            records,
            stats,
        })
    }
}

/// The result of a collection run.
#[derive(Debug, Clone)]
pub struct Inventory {
    /// Kind of resource collected
    pub kind: ResourceKind,

    /// One record per listed identifier, in listing order
    pub records: Vec<EnrichedRecord>,

    /// Run statistics
    pub stats: InventoryStats,
}

impl Inventory {
    /// Build an inventory from already-enriched records.
    pub fn from_records(kind: ResourceKind, records: Vec<EnrichedRecord>) -> Self {
        let mut stats = InventoryStats::new();
        stats.listed = records.len();
        for record in &records {
            stats.record(&record.status);
        }
        stats.complete();

        Self {
            kind,
            records,
            stats,
        }
    }

    /// Active records, in listing order.
    pub fn active(&self) -> Vec<&EnrichedRecord> {
        self.records
            .iter()
            .filter(|r| r.status.is_active())
            .collect()
    }

    /// Records whose describe call was denied, in listing order.
    pub fn not_authorized(&self) -> Vec<&EnrichedRecord> {
        self.records
            .iter()
            .filter(|r| r.status.is_not_authorized())
            .collect()
    }

    /// Sorted tag columns discovered over the active records.
    pub fn tag_columns(&self) -> Vec<String> {
        discover_tag_columns(&self.records)
    }

    /// Returns true if nothing was listed.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
