//! LocalStack test context and utilities.

use aws_sdk_kms::Client as KmsClient;
use aws_sdk_secretsmanager::Client as SecretsClient;
use kl_aws::AwsConfig;

/// LocalStack test context providing KMS and Secrets Manager clients.
pub struct LocalStackTestContext {
    pub kms: KmsClient,
    pub secrets: SecretsClient,
    pub endpoint: String,
    pub region: String,
}

impl LocalStackTestContext {
    /// Create a new LocalStack test context.
    ///
    /// Uses the `LOCALSTACK_ENDPOINT` environment variable if set,
    /// otherwise defaults to `http://localhost:4566`.
    pub async fn new() -> Self {
        let endpoint = std::env::var("LOCALSTACK_ENDPOINT")
            .unwrap_or_else(|_| "http://localhost:4566".to_string());
        let region = "us-east-1".to_string();

        let config = kl_aws::load_sdk_config(&Self::aws_config_for(&endpoint, &region))
            .await
            .unwrap();

        Self {
            kms: KmsClient::new(&config),
            secrets: SecretsClient::new(&config),
            endpoint,
            region,
        }
    }

    fn aws_config_for(endpoint: &str, region: &str) -> AwsConfig {
        AwsConfig::new()
            .with_region(region)
            .with_endpoint(endpoint)
            .with_credentials("test", "test")
    }

    /// Configuration the sources under test should use.
    pub fn aws_config(&self) -> AwsConfig {
        Self::aws_config_for(&self.endpoint, &self.region)
    }

    /// Check if LocalStack is available and healthy.
    pub async fn is_available(&self) -> bool {
        self.kms.list_keys().limit(1).send().await.is_ok()
    }

    /// Create a customer-managed key with tags, returning its ID.
    pub async fn create_key(
        &self,
        description: &str,
        tags: &[(&str, &str)],
    ) -> Result<String, aws_sdk_kms::Error> {
        let mut request = self.kms.create_key().description(description);
        for (key, value) in tags {
            let tag = aws_sdk_kms::types::Tag::builder()
                .tag_key(*key)
                .tag_value(*value)
                .build()
                .expect("tag key and value are set");
            request = request.tags(tag);
        }

        let output = request.send().await?;
        Ok(output
            .key_metadata()
            .map(|m| m.key_id().to_string())
            .unwrap_or_default())
    }

    /// Disable a key.
    pub async fn disable_key(&self, key_id: &str) -> Result<(), aws_sdk_kms::Error> {
        self.kms.disable_key().key_id(key_id).send().await?;
        Ok(())
    }

    /// Create a secret with tags, replacing any secret with the same name.
    pub async fn create_secret(
        &self,
        name: &str,
        tags: &[(&str, &str)],
    ) -> Result<(), aws_sdk_secretsmanager::Error> {
        let _ = self
            .secrets
            .delete_secret()
            .secret_id(name)
            .force_delete_without_recovery(true)
            .send()
            .await;

        let mut request = self
            .secrets
            .create_secret()
            .name(name)
            .secret_string("integration-test");
        for (key, value) in tags {
            request = request.tags(
                aws_sdk_secretsmanager::types::Tag::builder()
                    .key(*key)
                    .value(*value)
                    .build(),
            );
        }

        request.send().await?;
        Ok(())
    }
}
