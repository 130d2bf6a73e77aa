//! Enriched record types.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Days from 0001-01-01 (CE) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Outcome of enriching one resource.
///
/// Exactly one value per record; it decides which other record fields are
/// populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum RecordStatus {
    /// Fully usable; carries the provider state verbatim (e.g. `Enabled`)
    Active(String),

    /// Any other provider state (e.g. `Disabled`, `PendingDeletion`)
    Inactive(String),

    /// The detail lookup was denied
    NotAuthorized,

    /// The detail lookup failed for another reason
    Error(String),
}

impl RecordStatus {
    /// Returns true for [`RecordStatus::Active`].
    pub fn is_active(&self) -> bool {
        matches!(self, RecordStatus::Active(_))
    }

    /// Returns true for [`RecordStatus::NotAuthorized`].
    pub fn is_not_authorized(&self) -> bool {
        matches!(self, RecordStatus::NotAuthorized)
    }

    /// Returns true for [`RecordStatus::Error`].
    pub fn is_error(&self) -> bool {
        matches!(self, RecordStatus::Error(_))
    }

    /// The raw provider state, when the detail lookup succeeded.
    pub fn state(&self) -> Option<&str> {
        match self {
            RecordStatus::Active(state) | RecordStatus::Inactive(state) => Some(state),
            RecordStatus::NotAuthorized | RecordStatus::Error(_) => None,
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordStatus::Active(state) | RecordStatus::Inactive(state) => f.write_str(state),
            RecordStatus::NotAuthorized => f.write_str("Not Authorized"),
            RecordStatus::Error(message) => write!(f, "Error: {}", message),
        }
    }
}

/// The normalized unit of output.
///
/// Created once by the enricher and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    /// Resource identifier, unique within a run
    pub id: String,

    /// Enrichment outcome
    pub status: RecordStatus,

    /// Creation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Last access, truncated to a UTC day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_accessed: Option<NaiveDate>,

    /// Resource sub-type (Active records only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,

    /// Description; `Some("")` is kept distinct from `None`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Tags (Active records only)
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub tags: BTreeMap<String, String>,
}

impl EnrichedRecord {
    /// Create a record with the given status and no metadata.
    pub fn new(id: impl Into<String>, status: RecordStatus) -> Self {
        Self {
            id: id.into(),
            status,
            created_at: None,
            last_accessed: None,
            classification: None,
            description: None,
            tags: BTreeMap::new(),
        }
    }

    /// A record whose detail lookup was denied.
    pub fn not_authorized(id: impl Into<String>) -> Self {
        Self::new(id, RecordStatus::NotAuthorized)
    }

    /// A record whose detail lookup failed.
    pub fn failed(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(id, RecordStatus::Error(message.into()))
    }

    /// Set the creation timestamp.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Set the last-accessed date.
    pub fn with_last_accessed(mut self, date: NaiveDate) -> Self {
        self.last_accessed = Some(date);
        self
    }

    /// Set the classification.
    pub fn with_classification(mut self, classification: impl Into<String>) -> Self {
        self.classification = Some(classification.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a tag.
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Look up a tag value.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

/// Truncate a timestamp to its UTC day.
///
/// Equivalent to `floor(epoch_seconds / 86400)`; the time of day is dropped.
pub fn truncate_to_day(ts: &DateTime<Utc>) -> NaiveDate {
    ts.date_naive()
}

/// Whole UTC days between 1970-01-01 and `date`.
pub fn days_since_epoch(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

/// Inverse of [`days_since_epoch`].
pub fn date_from_epoch_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?)
}
