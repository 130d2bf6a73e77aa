//! Inventory source trait.

use async_trait::async_trait;
use kl_error::ApiError;
use kl_types::{ListPage, ResourceDetail, ResourceId, ResourceKind, Tag};

/// Result type for inventory source calls.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Trait for inventory backends.
///
/// One implementation per resource kind and provider:
/// - KMS keys and Secrets Manager secrets (production)
/// - In-memory source (testing)
///
/// # Call Flow
///
/// 1. The paginator calls [`list_page`](InventorySource::list_page) until the
///    listing is exhausted, optionally calling
///    [`describe`](InventorySource::describe) to drop foreign-managed items
/// 2. The enricher calls [`describe`](InventorySource::describe) once per
///    identifier
/// 3. For active resources only, the enricher calls
///    [`list_tags`](InventorySource::list_tags)
///
/// Errors are returned as [`ApiError`] so callers can classify authorization
/// denials without knowing the provider SDK.
#[async_trait]
pub trait InventorySource: Send + Sync {
    /// The kind of resource this source lists.
    fn kind(&self) -> ResourceKind;

    /// Fetches one page of identifiers.
    ///
    /// `token` is `None` for the first page and the previous page's
    /// `next_token` afterwards.
    async fn list_page(&self, token: Option<&str>) -> ApiResult<ListPage>;

    /// Fetches metadata for a single resource.
    async fn describe(&self, id: &ResourceId) -> ApiResult<ResourceDetail>;

    /// Fetches all tags for a single resource.
    async fn list_tags(&self, id: &ResourceId) -> ApiResult<Vec<Tag>>;
}
