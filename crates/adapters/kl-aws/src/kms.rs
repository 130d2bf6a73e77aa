//! KMS key source.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_kms::Client;
use aws_sdk_kms::types::{KeyManagerType, KeyMetadata};
use kl_error::ApiError;
use kl_traits::{ApiResult, InventorySource};
use kl_types::{ListPage, Ownership, ResourceDetail, ResourceId, ResourceKind, Tag};
use tracing::debug;

use crate::convert::{api_error, to_utc};

/// Owner reported for keys managed by AWS on the account's behalf.
pub const AWS_MANAGED_OWNER: &str = "AWS";

/// Inventory source over KMS keys.
///
/// - `list_page` → `ListKeys` (marker / truncated)
/// - `describe` → `DescribeKey`
/// - `list_tags` → `ListResourceTags`, following every page
#[derive(Debug, Clone)]
pub struct KmsSource {
    client: Client,
}

impl KmsSource {
    /// Create a source from a resolved SDK configuration.
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }

    /// Create a source around an existing client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl InventorySource for KmsSource {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Key
    }

    async fn list_page(&self, token: Option<&str>) -> ApiResult<ListPage> {
        let output = self
            .client
            .list_keys()
            .set_marker(token.map(str::to_string))
            .send()
            .await
            .map_err(api_error)?;

        let items: Vec<ResourceId> = output
            .keys()
            .iter()
            .filter_map(|entry| entry.key_id())
            .map(ResourceId::from)
            .collect();

        debug!(count = items.len(), truncated = output.truncated(), "Listed keys");

        Ok(ListPage {
            items,
            has_more: output.truncated(),
            next_token: output.next_marker().map(str::to_string),
        })
    }

    async fn describe(&self, id: &ResourceId) -> ApiResult<ResourceDetail> {
        let output = self
            .client
            .describe_key()
            .key_id(id.as_str())
            .send()
            .await
            .map_err(api_error)?;

        let metadata = output
            .key_metadata()
            .ok_or_else(|| ApiError::without_code(format!("no metadata returned for key {}", id)))?;

        Ok(key_detail(metadata))
    }

    async fn list_tags(&self, id: &ResourceId) -> ApiResult<Vec<Tag>> {
        let mut tags = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let output = self
                .client
                .list_resource_tags()
                .key_id(id.as_str())
                .set_marker(marker.take())
                .send()
                .await
                .map_err(api_error)?;

            tags.extend(
                output
                    .tags()
                    .iter()
                    .map(|tag| Tag::new(tag.tag_key(), tag.tag_value())),
            );

            match output.next_marker() {
                Some(next) if output.truncated() => marker = Some(next.to_string()),
                _ => break,
            }
        }

        Ok(tags)
    }
}

fn key_detail(metadata: &KeyMetadata) -> ResourceDetail {
    let state = metadata
        .key_state()
        .map(|s| s.as_str().to_string())
        .unwrap_or_default();

    let mut detail = ResourceDetail::new(state);
    detail.created_at = metadata.creation_date().and_then(to_utc);
    detail.classification = metadata.key_spec().map(|s| s.as_str().to_string());
    detail.description = metadata.description().map(str::to_string);

    if metadata.key_manager() == Some(&KeyManagerType::Aws) {
        detail.ownership = Ownership::Foreign(AWS_MANAGED_OWNER.to_string());
    }

    detail
}
