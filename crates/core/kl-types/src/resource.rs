//! Resource types as seen through the listing and detail APIs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The class of managed resource being inventoried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Customer managed cryptographic keys
    Key,

    /// Stored secrets
    Secret,
}

impl ResourceKind {
    /// Column header used for the resource identifier.
    pub fn id_label(&self) -> &'static str {
        match self {
            ResourceKind::Key => "Key ID",
            ResourceKind::Secret => "Secret Name",
        }
    }

    /// Column header used for the classification field.
    pub fn classification_label(&self) -> &'static str {
        match self {
            ResourceKind::Key => "Key Type",
            ResourceKind::Secret => "Type",
        }
    }

    /// Plural, upper-case noun for report banners and tallies.
    pub fn plural(&self) -> &'static str {
        match self {
            ResourceKind::Key => "KEYS",
            ResourceKind::Secret => "SECRETS",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Key => write!(f, "key"),
            ResourceKind::Secret => write!(f, "secret"),
        }
    }
}

/// Opaque handle returned by the listing API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the handle, returning the raw identifier.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One page of a listing response.
#[derive(Debug, Clone, Default)]
pub struct ListPage {
    /// Identifiers on this page
    pub items: Vec<ResourceId>,

    /// Whether the listing API reports more pages
    pub has_more: bool,

    /// Token for the next page (present when `has_more` is set)
    pub next_token: Option<String>,
}

impl ListPage {
    /// A final page with no continuation.
    pub fn last(items: Vec<ResourceId>) -> Self {
        Self {
            items,
            has_more: false,
            next_token: None,
        }
    }

    /// A page followed by another one reachable through `token`.
    pub fn with_next(items: Vec<ResourceId>, token: impl Into<String>) -> Self {
        Self {
            items,
            has_more: true,
            next_token: Some(token.into()),
        }
    }
}

/// Who manages a resource.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ownership {
    /// Managed by the caller's account
    #[default]
    Account,

    /// Managed on the caller's behalf by another party (e.g. `AWS`, `rds`)
    Foreign(String),
}

/// Metadata returned by the detail API for a single resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceDetail {
    /// Provider state, passed through verbatim (e.g. `Enabled`, `PendingDeletion`)
    pub state: String,

    /// When the resource was created
    pub created_at: Option<DateTime<Utc>>,

    /// When the resource was last accessed
    pub last_accessed_at: Option<DateTime<Utc>>,

    /// Resource sub-type (e.g. key spec)
    pub classification: Option<String>,

    /// Free-form description
    pub description: Option<String>,

    /// Who manages the resource
    pub ownership: Ownership,
}

impl ResourceDetail {
    /// Create a detail with only the state set.
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            ..Default::default()
        }
    }

    /// Set the creation timestamp.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Set the last-accessed timestamp.
    pub fn with_last_accessed_at(mut self, last_accessed_at: DateTime<Utc>) -> Self {
        self.last_accessed_at = Some(last_accessed_at);
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

    /// Set the ownership.
    pub fn with_ownership(mut self, ownership: Ownership) -> Self {
        self.ownership = ownership;
        self
    }
}

/// A single key/value tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag key
    pub key: String,

    /// Tag value
    pub value: String,
}

impl Tag {
    /// Create a tag.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
