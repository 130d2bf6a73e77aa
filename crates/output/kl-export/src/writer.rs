//! Parquet writer for enriched records.

use arrow::array::{
    ArrayRef, Date32Array, StringArray, TimestampMillisecondArray,
};
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use kl_error::{ExportError, Result};
use kl_types::{EnrichedRecord, days_since_epoch, truncate_to_day};
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::{ExportConfig, TimestampEncoding};
use crate::schema::{UTC, inventory_schema, tags_builder};

/// Outcome of a successful export.
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// File that was written
    pub path: PathBuf,

    /// Rows written
    pub rows: usize,

    /// Record batches written
    pub batches: usize,
}

/// Writes enriched records to a Parquet file.
///
/// The file is truncated and rewritten on every export. If writing fails
/// after the file was created, the partial file is removed before the error
/// is returned.
#[derive(Debug, Clone, Default)]
pub struct ParquetExporter {
    config: ExportConfig,
}

impl ParquetExporter {
    /// Create an exporter.
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// The exporter configuration.
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Schema of the files this exporter writes.
    pub fn schema(&self) -> SchemaRef {
        inventory_schema(self.config.timestamp_encoding)
    }

    /// Export `records` to the file at `path`.
    pub fn export(&self, records: &[EnrichedRecord], path: impl AsRef<Path>) -> Result<ExportSummary> {
        let path = path.as_ref();

        let file = File::create(path)
            .map_err(|e| ExportError::Create(format!("{}: {}", path.display(), e)))?;

        match self.write(records, file) {
            Ok(batches) => {
                info!(
                    path = %path.display(),
                    rows = records.len(),
                    encoding = %self.config.timestamp_encoding,
                    "Wrote inventory file"
                );
                Ok(ExportSummary {
                    path: path.to_path_buf(),
                    rows: records.len(),
                    batches,
                })
            }
            Err(e) => {
                if let Err(remove_err) = fs::remove_file(path) {
                    warn!(
                        path = %path.display(),
                        error = %remove_err,
                        "Failed to remove partial output file"
                    );
                }
                Err(e.into())
            }
        }
    }

    /// Write `records` as Parquet into `sink`, returning the batch count.
    ///
    /// The writer is closed (footer written) as the last step.
    pub fn write<W>(&self, records: &[EnrichedRecord], sink: W) -> std::result::Result<usize, ExportError>
    where
        W: Write + Send,
    {
        let schema = self.schema();
        let props = WriterProperties::builder()
            .set_compression(self.config.compression.into())
            .build();

        let mut writer = ArrowWriter::try_new(sink, schema.clone(), Some(props))
            .map_err(|e| ExportError::Create(e.to_string()))?;

        let mut batches = 0;
        for chunk in records.chunks(self.config.batch_size.max(1)) {
            let batch = self.build_batch(&schema, chunk)?;
            writer
                .write(&batch)
                .map_err(|e| ExportError::Write(e.to_string()))?;
            batches += 1;
            debug!(rows = chunk.len(), "Wrote record batch");
        }

        writer
            .close()
            .map_err(|e| ExportError::Finalize(e.to_string()))?;

        Ok(batches)
    }

    /// Convert a slice of records into a [`RecordBatch`].
    pub fn build_batch(
        &self,
        schema: &SchemaRef,
        records: &[EnrichedRecord],
    ) -> std::result::Result<RecordBatch, ExportError> {
        let names = StringArray::from_iter_values(records.iter().map(|r| r.id.as_str()));
        let statuses = StringArray::from_iter_values(records.iter().map(|r| r.status.to_string()));
        let descriptions: StringArray = records.iter().map(|r| r.description.as_deref()).collect();
        let classifications: StringArray =
            records.iter().map(|r| r.classification.as_deref()).collect();

        let created: ArrayRef = match self.config.timestamp_encoding {
            TimestampEncoding::Millis => Arc::new(
                records
                    .iter()
                    .map(|r| r.created_at.map(|ts| ts.timestamp_millis()))
                    .collect::<TimestampMillisecondArray>()
                    .with_timezone(UTC),
            ),
            TimestampEncoding::Day => Arc::new(
                records
                    .iter()
                    .map(|r| r.created_at.as_ref().map(|ts| days_since_epoch(truncate_to_day(ts))))
                    .collect::<Date32Array>(),
            ),
        };

        let last_accessed: Date32Array = records
            .iter()
            .map(|r| r.last_accessed.map(days_since_epoch))
            .collect();

        let mut tags = tags_builder();
        for record in records {
            for (key, value) in &record.tags {
                tags.keys().append_value(key);
                tags.values().append_value(value);
            }
            // Empty tag sets are null, not empty maps
            tags.append(!record.tags.is_empty())
                .map_err(|e| ExportError::Write(e.to_string()))?;
        }

        let columns: Vec<ArrayRef> = vec![
            Arc::new(names),
            Arc::new(statuses),
            Arc::new(descriptions),
            Arc::new(classifications),
            created,
            Arc::new(last_accessed),
            Arc::new(tags.finish()),
        ];

        RecordBatch::try_new(schema.clone(), columns).map_err(|e| ExportError::Write(e.to_string()))
    }
}
