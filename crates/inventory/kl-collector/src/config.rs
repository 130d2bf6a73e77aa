//! Configuration types for the collector.

use kl_error::AccessDenialClassifier;
use serde::{Deserialize, Serialize};

/// Provider state that marks a resource as fully usable.
pub const DEFAULT_ACTIVE_STATE: &str = "Enabled";

/// Configuration for a collection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Maximum in-flight enrichments (1 = sequential)
    pub concurrency: usize,

    /// Drop resources managed by another party during listing
    pub owned_only: bool,

    /// Provider state treated as active
    pub active_state: String,

    /// Access-denial signatures
    pub classifier: AccessDenialClassifier,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            concurrency: 1,
            owned_only: true,
            active_state: DEFAULT_ACTIVE_STATE.to_string(),
            classifier: AccessDenialClassifier::default(),
        }
    }
}

impl CollectorConfig {
    /// Create a new collector configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum in-flight enrichments.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Enable or disable the ownership filter.
    pub fn with_owned_only(mut self, owned_only: bool) -> Self {
        self.owned_only = owned_only;
        self
    }

    /// Set the provider state treated as active.
    pub fn with_active_state(mut self, state: impl Into<String>) -> Self {
        self.active_state = state.into();
        self
    }

    /// Set the access-denial classifier.
    pub fn with_classifier(mut self, classifier: AccessDenialClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Options for the paginator.
    pub fn list_options(&self) -> ListOptions {
        ListOptions {
            owned_only: self.owned_only,
            classifier: self.classifier.clone(),
        }
    }

    /// Policy for the enricher.
    pub fn enrich_policy(&self) -> EnrichPolicy {
        EnrichPolicy {
            active_state: self.active_state.clone(),
            classifier: self.classifier.clone(),
        }
    }
}

/// Options for [`list_resources`](crate::list_resources).
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Describe each listed item and drop foreign-managed ones
    pub owned_only: bool,

    /// Decides whether a first-page failure is an authorization denial
    pub classifier: AccessDenialClassifier,
}

/// Policy for [`enrich`](crate::enrich).
#[derive(Debug, Clone)]
pub struct EnrichPolicy {
    /// Provider state treated as active
    pub active_state: String,

    /// Decides whether a describe failure is an authorization denial
    pub classifier: AccessDenialClassifier,
}

impl Default for EnrichPolicy {
    fn default() -> Self {
        Self {
            active_state: DEFAULT_ACTIVE_STATE.to_string(),
            classifier: AccessDenialClassifier::default(),
        }
    }
}
