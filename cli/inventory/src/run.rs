//! Main execution logic for the keyledger CLI.

use anyhow::{Context, Result};
use kl_aws::{AwsConfig, KmsSource, SecretsSource, load_sdk_config};
use kl_collector::{Collector, CollectorConfig, Inventory, InventoryStats};
use kl_error::AccessDenialClassifier;
use kl_export::{ExportConfig, ExportSummary, ParquetExporter};
use kl_report::render_report;
use kl_traits::InventorySource;
use kl_types::ResourceKind;
use std::io::Write;
use tracing::info;

use crate::args::{Cli, FormatArg, ResourceArg};

/// What a successful run produced.
#[derive(Debug)]
pub struct RunSummary {
    /// Kind of resource inventoried
    pub kind: ResourceKind,

    /// Collection statistics
    pub stats: InventoryStats,

    /// Set when a Parquet file was written
    pub export: Option<ExportSummary>,
}

/// Execute an inventory run with the provided arguments.
pub async fn execute(args: Cli) -> Result<RunSummary> {
    let aws_config = build_aws_config(&args);
    let sdk_config = load_sdk_config(&aws_config).await?;

    let config = build_collector_config(&args);

    let inventory = match args.resource {
        ResourceArg::Key => collect(KmsSource::new(&sdk_config), config).await?,
        ResourceArg::Secret => collect(SecretsSource::new(&sdk_config), config).await?,
    };

    let export = match args.format {
        FormatArg::Table => {
            write_report(&inventory)?;
            None
        }
        FormatArg::Parquet => Some(export(&args, &inventory)?),
    };

    Ok(RunSummary {
        kind: inventory.kind,
        stats: inventory.stats,
        export,
    })
}

/// Build AWS configuration from CLI arguments.
fn build_aws_config(args: &Cli) -> AwsConfig {
    let mut config = AwsConfig::new();

    if let Some(region) = &args.region {
        config = config.with_region(region);
    }

    if let Some(profile) = &args.profile {
        config = config.with_profile(profile);
    }

    if let Some(endpoint) = &args.endpoint {
        config = config.with_endpoint(endpoint);
    }

    if let (Some(access_key), Some(secret_key)) = (&args.access_key, &args.secret_key) {
        config = config.with_credentials(access_key, secret_key);
        if let Some(token) = &args.session_token {
            config = config.with_session_token(token);
        }
    }

    config
}

/// Build collector configuration from CLI arguments.
fn build_collector_config(args: &Cli) -> CollectorConfig {
    CollectorConfig::new()
        .with_concurrency(args.concurrency)
        .with_owned_only(args.filter_foreign())
        .with_classifier(build_classifier(args))
}

/// Default denial signatures plus any given on the command line.
fn build_classifier(args: &Cli) -> AccessDenialClassifier {
    let mut classifier = AccessDenialClassifier::new();
    for code in &args.denial_codes {
        classifier = classifier.with_code(code);
    }
    for phrase in &args.denial_phrases {
        classifier = classifier.with_phrase(phrase);
    }
    classifier
}

async fn collect<S: InventorySource>(source: S, config: CollectorConfig) -> Result<Inventory> {
    let collector = Collector::new(source, config);
    let inventory = collector
        .collect()
        .await
        .with_context(|| format!("failed to inventory {}s", collector.source().kind()))?;
    Ok(inventory)
}

fn write_report(inventory: &Inventory) -> Result<()> {
    let report = render_report(inventory);

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(report.as_bytes())
        .and_then(|_| stdout.flush())
        .context("failed to write report")?;

    Ok(())
}

fn export(args: &Cli, inventory: &Inventory) -> Result<ExportSummary> {
    let config = ExportConfig::new()
        .with_timestamp_encoding(args.timestamp_encoding.into())
        .with_compression(args.compression.into());

    let path = args.output_path();
    info!(path = %path.display(), rows = inventory.records.len(), "Exporting inventory");

    let summary = ParquetExporter::new(config).export(&inventory.records, &path)?;
    Ok(summary)
}
