//! End-to-end export tests against the in-memory source.

use crate::common::{read_parquet, scenario_source};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{Date32Type, TimestampMillisecondType};
use chrono::{DateTime, NaiveDate};
use kl_collector::{Collector, CollectorConfig};
use kl_export::{ENCODING_METADATA_KEY, ExportConfig, ParquetExporter, TimestampEncoding};
use kl_traits::MemorySource;
use kl_types::{ResourceDetail, ResourceKind, days_since_epoch};
use tempfile::TempDir;

#[tokio::test]
async fn test_three_key_scenario_export() {
    let inventory = Collector::new(scenario_source(), CollectorConfig::new())
        .collect()
        .await
        .unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keys.parquet");
    let summary = ParquetExporter::default()
        .export(&inventory.records, &path)
        .unwrap();
    assert_eq!(summary.rows, 3);

    let batches = read_parquet(&path);
    assert_eq!(batches.len(), 1);
    let batch = &batches[0];
    assert_eq!(batch.num_rows(), 3);

    let names = batch.column_by_name("name").unwrap().as_string::<i32>();
    let statuses = batch.column_by_name("status").unwrap().as_string::<i32>();
    assert_eq!(names.value(2), "C");
    assert_eq!(statuses.value(0), "Enabled");
    assert_eq!(statuses.value(2), "Not Authorized");

    for column in ["created_date", "classification", "last_accessed_date", "tags"] {
        assert!(batch.column_by_name(column).unwrap().is_null(2), "{column}");
    }

    let created = batch
        .column_by_name("created_date")
        .unwrap()
        .as_primitive::<TimestampMillisecondType>();
    assert_eq!(created.value(0), 1_700_000_000_000);

    let tags = batch.column_by_name("tags").unwrap().as_map();
    let a_tags = tags.value(0);
    assert_eq!(a_tags.column(0).as_string::<i32>().value(0), "Team");
    assert_eq!(a_tags.column(1).as_string::<i32>().value(0), "core");
}

#[tokio::test]
async fn test_last_accessed_truncated_to_day() {
    // 2024-03-15T18:30:00Z
    let accessed = DateTime::from_timestamp(1_710_527_400, 0).unwrap();
    let source = MemorySource::new(ResourceKind::Secret)
        .with_resources(["db/password"])
        .with_detail(
            "db/password",
            ResourceDetail::new("Enabled")
                .with_created_at(DateTime::from_timestamp(1_710_527_400, 0).unwrap())
                .with_last_accessed_at(accessed),
        );

    let inventory = Collector::new(source, CollectorConfig::new())
        .collect()
        .await
        .unwrap();

    let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    assert_eq!(inventory.records[0].last_accessed, Some(day));

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("secrets.parquet");
    let exporter = ParquetExporter::new(
        ExportConfig::new().with_timestamp_encoding(TimestampEncoding::Day),
    );
    exporter.export(&inventory.records, &path).unwrap();

    let batch = &read_parquet(&path)[0];
    assert_eq!(
        batch.schema().metadata().get(ENCODING_METADATA_KEY).map(String::as_str),
        Some("date")
    );

    let last = batch
        .column_by_name("last_accessed_date")
        .unwrap()
        .as_primitive::<Date32Type>();
    assert_eq!(last.value(0), days_since_epoch(day));
    assert_eq!(last.value(0) as i64, 1_710_527_400 / 86_400);

    let created = batch
        .column_by_name("created_date")
        .unwrap()
        .as_primitive::<Date32Type>();
    assert_eq!(created.value(0), last.value(0));
}

#[tokio::test]
async fn test_export_is_not_filtered_by_status() {
    let source = MemorySource::new(ResourceKind::Key)
        .with_resources(["k1", "k2"])
        .with_detail("k1", ResourceDetail::new("Disabled"));

    let inventory = Collector::new(source, CollectorConfig::new())
        .collect()
        .await
        .unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keys.parquet");
    ParquetExporter::default()
        .export(&inventory.records, &path)
        .unwrap();

    let batch = &read_parquet(&path)[0];
    let statuses = batch.column_by_name("status").unwrap().as_string::<i32>();
    assert_eq!(statuses.value(0), "Disabled");
    assert!(statuses.value(1).starts_with("Error: "));
}
