//! Statistics for collection runs.

use chrono::{DateTime, Duration, Utc};
use kl_types::RecordStatus;
use serde::{Deserialize, Serialize};

/// Statistics collected during a collection run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryStats {
    /// When collection started
    pub started_at: Option<DateTime<Utc>>,

    /// When collection completed
    pub completed_at: Option<DateTime<Utc>>,

    /// Identifiers returned by the paginator
    pub listed: usize,

    /// Records in the active state
    pub active: usize,

    /// Records in any other provider state
    pub inactive: usize,

    /// Records whose describe call was denied
    pub not_authorized: usize,

    /// Records whose describe call failed otherwise
    pub errors: usize,
}

impl InventoryStats {
    /// Create a new stats tracker with the current time as start time.
    pub fn new() -> Self {
        Self {
            started_at: Some(Utc::now()),
            ..Default::default()
        }
    }

    /// Mark collection as complete with the current time.
    pub fn complete(&mut self) {
        self.completed_at = Some(Utc::now());
    }

    /// Count one enriched record.
    pub fn record(&mut self, status: &RecordStatus) {
        match status {
            RecordStatus::Active(_) => self.active += 1,
            RecordStatus::Inactive(_) => self.inactive += 1,
            RecordStatus::NotAuthorized => self.not_authorized += 1,
            RecordStatus::Error(_) => self.errors += 1,
        }
    }

    /// Total records counted.
    pub fn total(&self) -> usize {
        self.active + self.inactive + self.not_authorized + self.errors
    }

    /// Get the duration of the collection run.
    pub fn duration(&self) -> Option<Duration> {
        match (self.started_at, self.completed_at) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    /// Calculate the throughput in resources per second.
    pub fn resources_per_second(&self) -> Option<f64> {
        self.duration().map(|d| {
            let secs = d.num_milliseconds() as f64 / 1000.0;
            if secs > 0.0 {
                self.total() as f64 / secs
            } else {
                0.0
            }
        })
    }
}
