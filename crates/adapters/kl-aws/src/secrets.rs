//! Secrets Manager source.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_secretsmanager::Client;
use aws_sdk_secretsmanager::operation::describe_secret::DescribeSecretOutput;
use kl_traits::{ApiResult, InventorySource};
use kl_types::{ListPage, Ownership, ResourceDetail, ResourceId, ResourceKind, Tag};
use tracing::debug;

use crate::convert::{api_error, to_utc};

/// State reported for secrets that are usable.
pub const SECRET_ENABLED: &str = "Enabled";

/// State reported for secrets scheduled for deletion.
pub const SECRET_PENDING_DELETION: &str = "PendingDeletion";

/// Inventory source over Secrets Manager secrets, keyed by name.
///
/// Secrets Manager has no key-style state field: a secret is
/// [`SECRET_ENABLED`] unless it carries a deletion date. Secrets with
/// rotation turned on are classified `Rotating`, all others `Static`.
#[derive(Debug, Clone)]
pub struct SecretsSource {
    client: Client,
}

impl SecretsSource {
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

    async fn describe_secret(&self, id: &ResourceId) -> ApiResult<DescribeSecretOutput> {
        self.client
            .describe_secret()
            .secret_id(id.as_str())
            .send()
            .await
            .map_err(api_error)
    }
}

#[async_trait]
impl InventorySource for SecretsSource {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Secret
    }

    async fn list_page(&self, token: Option<&str>) -> ApiResult<ListPage> {
        let output = self
            .client
            .list_secrets()
            .set_next_token(token.map(str::to_string))
            .send()
            .await
            .map_err(api_error)?;

        let items: Vec<ResourceId> = output
            .secret_list()
            .iter()
            .filter_map(|entry| entry.name())
            .map(ResourceId::from)
            .collect();

        debug!(count = items.len(), "Listed secrets");

        let next_token = output.next_token().map(str::to_string);
        Ok(ListPage {
            items,
            has_more: next_token.is_some(),
            next_token,
        })
    }

    async fn describe(&self, id: &ResourceId) -> ApiResult<ResourceDetail> {
        let output = self.describe_secret(id).await?;
        Ok(secret_detail(&output))
    }

    // Tags come back with DescribeSecret; there is no separate tag API.
    async fn list_tags(&self, id: &ResourceId) -> ApiResult<Vec<Tag>> {
        let output = self.describe_secret(id).await?;
        Ok(secret_tags(&output))
    }
}

fn secret_detail(output: &DescribeSecretOutput) -> ResourceDetail {
    let state = if output.deleted_date().is_some() {
        SECRET_PENDING_DELETION
    } else {
        SECRET_ENABLED
    };

    let mut detail = ResourceDetail::new(state);
    detail.created_at = output.created_date().and_then(to_utc);
    detail.last_accessed_at = output.last_accessed_date().and_then(to_utc);
    detail.description = output.description().map(str::to_string);
    detail.classification = Some(
        if output.rotation_enabled() == Some(true) {
            "Rotating"
        } else {
            "Static"
        }
        .to_string(),
    );

    if let Some(service) = output.owning_service().filter(|s| !s.is_empty()) {
        detail.ownership = Ownership::Foreign(service.to_string());
    }

    detail
}

fn secret_tags(output: &DescribeSecretOutput) -> Vec<Tag> {
    output
        .tags()
        .iter()
        .filter_map(|tag| Some(Tag::new(tag.key()?, tag.value().unwrap_or_default())))
        .collect()
}
