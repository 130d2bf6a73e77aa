//! AWS adapter integration tests using LocalStack.
//!
//! These tests verify that the KMS and Secrets Manager sources page, describe
//! and tag resources correctly against a real API surface.

use crate::common::LocalStackTestContext;
use kl_aws::{KmsSource, SecretsSource, load_sdk_config};
use kl_collector::{Collector, CollectorConfig};
use kl_export::ParquetExporter;
use kl_report::render_report;
use kl_traits::InventorySource;
use kl_types::{RecordStatus, ResourceId};
use tempfile::TempDir;

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_kms_inventory() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let key_id = ctx
        .create_key("keyledger integration", &[("Team", "core")])
        .await
        .unwrap();

    let sdk_config = load_sdk_config(&ctx.aws_config()).await.unwrap();
    let collector = Collector::new(KmsSource::new(&sdk_config), CollectorConfig::new());
    let inventory = collector.collect().await.unwrap();

    let record = inventory
        .records
        .iter()
        .find(|r| r.id == key_id)
        .expect("created key is listed");

    assert_eq!(record.status, RecordStatus::Active("Enabled".to_string()));
    assert_eq!(record.description.as_deref(), Some("keyledger integration"));
    assert_eq!(record.tag("Team"), Some("core"));
    assert!(record.created_at.is_some());

    assert!(inventory.tag_columns().contains(&"Team".to_string()));
    assert!(render_report(&inventory).contains(&key_id));
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_kms_disabled_key_has_no_tags() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let key_id = ctx.create_key("disabled", &[("Env", "test")]).await.unwrap();
    ctx.disable_key(&key_id).await.unwrap();

    let sdk_config = load_sdk_config(&ctx.aws_config()).await.unwrap();
    let inventory = Collector::new(KmsSource::new(&sdk_config), CollectorConfig::new())
        .collect()
        .await
        .unwrap();

    let record = inventory.records.iter().find(|r| r.id == key_id).unwrap();
    assert_eq!(record.status, RecordStatus::Inactive("Disabled".to_string()));
    assert!(record.tags.is_empty());
    assert!(record.classification.is_none());
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_kms_describe_unknown_key_fails() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let sdk_config = load_sdk_config(&ctx.aws_config()).await.unwrap();
    let source = KmsSource::new(&sdk_config);

    let err = source
        .describe(&ResourceId::new("00000000-0000-0000-0000-000000000000"))
        .await
        .unwrap_err();
    assert!(err.code.is_some());
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_secrets_inventory_to_parquet() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let name = "keyledger/integration";
    ctx.create_secret(name, &[("Owner", "ops")]).await.unwrap();

    let sdk_config = load_sdk_config(&ctx.aws_config()).await.unwrap();
    let inventory = Collector::new(SecretsSource::new(&sdk_config), CollectorConfig::new())
        .collect()
        .await
        .unwrap();

    let record = inventory.records.iter().find(|r| r.id == name).unwrap();
    assert_eq!(record.status, RecordStatus::Active("Enabled".to_string()));
    assert_eq!(record.tag("Owner"), Some("ops"));

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("secrets.parquet");
    let summary = ParquetExporter::default()
        .export(&inventory.records, &path)
        .unwrap();
    assert_eq!(summary.rows, inventory.records.len());
}
