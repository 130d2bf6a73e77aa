//! Fixture sources and helpers.

use arrow::record_batch::RecordBatch;
use chrono::DateTime;
use kl_error::ApiError;
use kl_traits::MemorySource;
use kl_types::{ResourceDetail, ResourceKind};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use std::fs::File;
use std::path::Path;

/// An enabled key created at `secs` past the epoch.
pub fn enabled(secs: i64) -> ResourceDetail {
    ResourceDetail::new("Enabled")
        .with_created_at(DateTime::from_timestamp(secs, 0).unwrap())
        .with_classification("SYMMETRIC_DEFAULT")
}

/// A KMS-style access denial.
pub fn denied() -> ApiError {
    ApiError::new(
        "AccessDeniedException",
        "User: arn:aws:iam::111122223333:user/audit is not authorized to perform: kms:DescribeKey",
    )
}

/// Three keys: A and B enabled with one tag each, C denied.
pub fn scenario_source() -> MemorySource {
    MemorySource::new(ResourceKind::Key)
        .with_resources(["A", "B", "C"])
        .with_detail("A", enabled(1_700_000_000).with_description("payments"))
        .with_detail("B", enabled(1_700_086_400))
        .with_detail_error("C", denied())
        .with_tags("A", [("Team", "core")])
        .with_tags("B", [("Owner", "ops")])
}

/// Read every batch of a Parquet file.
pub fn read_parquet(path: &Path) -> Vec<RecordBatch> {
    let file = File::open(path).unwrap();
    ParquetRecordBatchReaderBuilder::try_new(file)
        .unwrap()
        .build()
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}
