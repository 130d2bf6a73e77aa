//! In-memory inventory source.

use async_trait::async_trait;
use kl_error::ApiError;
use kl_types::{ListPage, ResourceDetail, ResourceId, ResourceKind, Tag};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::source::{ApiResult, InventorySource};

/// Calls observed by a [`MemorySource`].
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    /// Tokens passed to `list_page`, in call order
    pub list: Vec<Option<String>>,

    /// Identifiers passed to `describe`, in call order
    pub describe: Vec<String>,

    /// Identifiers passed to `list_tags`, in call order
    pub list_tags: Vec<String>,
}

impl CallLog {
    /// Number of `describe` calls made for `id`.
    pub fn describe_count(&self, id: &str) -> usize {
        self.describe.iter().filter(|d| d.as_str() == id).count()
    }

    /// Number of `list_tags` calls made for `id`.
    pub fn tag_count(&self, id: &str) -> usize {
        self.list_tags.iter().filter(|d| d.as_str() == id).count()
    }
}

/// Inventory source backed by in-memory tables.
///
/// Pages are keyed by the token that requests them (`None` for the first
/// page). Identifiers without a registered detail answer `describe` with a
/// `NotFoundException`; identifiers without registered tags have none.
pub struct MemorySource {
    kind: ResourceKind,
    pages: HashMap<Option<String>, ApiResult<ListPage>>,
    details: HashMap<String, ApiResult<ResourceDetail>>,
    tags: HashMap<String, ApiResult<Vec<Tag>>>,
    calls: Mutex<CallLog>,
}

impl MemorySource {
    /// Create an empty source whose first page is empty.
    pub fn new(kind: ResourceKind) -> Self {
        let mut pages = HashMap::new();
        pages.insert(None, Ok(ListPage::last(Vec::new())));

        Self {
            kind,
            pages,
            details: HashMap::new(),
            tags: HashMap::new(),
            calls: Mutex::new(CallLog::default()),
        }
    }

    /// Serve all `ids` as a single page.
    pub fn with_resources<I, S>(self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = ids.into_iter().map(ResourceId::new).collect();
        self.with_page(None, ListPage::last(items))
    }

    /// Serve `page` when `token` is requested.
    pub fn with_page(mut self, token: Option<&str>, page: ListPage) -> Self {
        self.pages.insert(token.map(str::to_string), Ok(page));
        self
    }

    /// Fail the listing call for `token`.
    pub fn with_list_error(mut self, token: Option<&str>, error: ApiError) -> Self {
        self.pages.insert(token.map(str::to_string), Err(error));
        self
    }

    /// Answer `describe(id)` with `detail`.
    pub fn with_detail(mut self, id: impl Into<String>, detail: ResourceDetail) -> Self {
        self.details.insert(id.into(), Ok(detail));
        self
    }

    /// Fail `describe(id)` with `error`.
    pub fn with_detail_error(mut self, id: impl Into<String>, error: ApiError) -> Self {
        self.details.insert(id.into(), Err(error));
        self
    }

    /// Answer `list_tags(id)` with `tags`.
    pub fn with_tags<I, K, V>(mut self, id: impl Into<String>, tags: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let tags = tags.into_iter().map(|(k, v)| Tag::new(k, v)).collect();
        self.tags.insert(id.into(), Ok(tags));
        self
    }

    /// Fail `list_tags(id)` with `error`.
    pub fn with_tag_error(mut self, id: impl Into<String>, error: ApiError) -> Self {
        self.tags.insert(id.into(), Err(error));
        self
    }

    /// Snapshot of the calls made so far.
    pub fn calls(&self) -> CallLog {
        self.lock_calls().clone()
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, CallLog> {
        // A poisoned log only means a test thread panicked mid-record
        self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl InventorySource for MemorySource {
    fn kind(&self) -> ResourceKind {
        self.kind
    }

    async fn list_page(&self, token: Option<&str>) -> ApiResult<ListPage> {
        let key = token.map(str::to_string);
        self.lock_calls().list.push(key.clone());

        self.pages.get(&key).cloned().unwrap_or_else(|| {
            Err(ApiError::new(
                "InvalidMarkerException",
                format!("unknown continuation token: {}", token.unwrap_or("<none>")),
            ))
        })
    }

    async fn describe(&self, id: &ResourceId) -> ApiResult<ResourceDetail> {
        self.lock_calls().describe.push(id.to_string());

        self.details.get(id.as_str()).cloned().unwrap_or_else(|| {
            Err(ApiError::new(
                "NotFoundException",
                format!("{} '{}' does not exist", self.kind, id),
            ))
        })
    }

    async fn list_tags(&self, id: &ResourceId) -> ApiResult<Vec<Tag>> {
        self.lock_calls().list_tags.push(id.to_string());

        self.tags
            .get(id.as_str())
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
