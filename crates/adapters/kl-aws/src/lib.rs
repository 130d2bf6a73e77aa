//! kl-aws - AWS inventory sources for keyledger.
//!
//! Implements [`InventorySource`](kl_traits::InventorySource) over:
//!
//! - KMS keys ([`KmsSource`]); AWS-managed keys are reported as foreign
//! - Secrets Manager secrets ([`SecretsSource`]); service-owned secrets are
//!   reported as foreign
//!
//! # Example
//!
//! ```ignore
//! use kl_aws::{AwsConfig, KmsSource, load_sdk_config};
//!
//! let config = AwsConfig::new()
//!     .with_region("us-east-1")
//!     .with_endpoint("http://localhost:4566");
//!
//! let sdk_config = load_sdk_config(&config).await?;
//! let source = KmsSource::new(&sdk_config);
//! ```

pub mod client;
mod convert;
pub mod kms;
pub mod secrets;

pub use client::{AwsConfig, load_sdk_config};
pub use kms::KmsSource;
pub use secrets::SecretsSource;
