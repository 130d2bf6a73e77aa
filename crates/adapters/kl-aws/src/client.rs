//! AWS configuration loading.

use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use kl_error::{KlError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Connection settings shared by every AWS-backed source.
///
/// Anything left unset falls back to the default provider chain
/// (environment, shared config files, instance metadata).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwsConfig {
    /// AWS region
    pub region: Option<String>,

    /// Named profile from the shared config files
    pub profile: Option<String>,

    /// Custom endpoint URL (for LocalStack)
    pub endpoint: Option<String>,

    /// Explicit AWS access key (optional)
    pub access_key: Option<String>,

    /// Explicit AWS secret key (optional)
    pub secret_key: Option<String>,

    /// Session token for temporary credentials (optional)
    pub session_token: Option<String>,

    /// Per-operation timeout in seconds
    pub timeout_secs: u64,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            region: None,
            profile: None,
            endpoint: None,
            access_key: None,
            secret_key: None,
            session_token: None,
            timeout_secs: 30,
        }
    }
}

impl AwsConfig {
    /// Create a configuration that relies entirely on the default chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the AWS region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set the AWS profile.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Set a custom endpoint (for LocalStack).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set explicit credentials.
    pub fn with_credentials(
        mut self,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.access_key = Some(access_key.into());
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Set a session token to go with explicit credentials.
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    /// Set the per-operation timeout in seconds.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Resolve an [`SdkConfig`] from configuration.
///
/// Fails with [`KlError::Config`] when no region can be resolved, before any
/// API call is made.
pub async fn load_sdk_config(config: &AwsConfig) -> Result<SdkConfig> {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    if let Some(region) = &config.region {
        loader = loader.region(Region::new(region.clone()));
    }

    if let Some(profile) = &config.profile {
        loader = loader.profile_name(profile);
    }

    if let Some(endpoint) = &config.endpoint {
        loader = loader.endpoint_url(endpoint);
    }

    match (&config.access_key, &config.secret_key) {
        (Some(access_key), Some(secret_key)) => {
            let credentials = aws_sdk_kms::config::Credentials::new(
                access_key,
                secret_key,
                config.session_token.clone(),
                None,
                "keyledger",
            );
            loader = loader.credentials_provider(credentials);
        }
        (None, None) => {}
        _ => {
            return Err(KlError::Config(
                "both an access key and a secret key are required for explicit credentials"
                    .to_string(),
            ));
        }
    }

    if config.timeout_secs > 0 {
        loader = loader.timeout_config(
            TimeoutConfig::builder()
                .operation_timeout(Duration::from_secs(config.timeout_secs))
                .build(),
        );
    }

    let sdk_config = loader.load().await;

    match sdk_config.region() {
        Some(region) => debug!(region = %region, "Resolved AWS configuration"),
        None => {
            return Err(KlError::Config(
                "no AWS region configured; pass --region or set AWS_REGION".to_string(),
            ));
        }
    }

    Ok(sdk_config)
}
