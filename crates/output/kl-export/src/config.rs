//! Export configuration.

use parquet::basic::{Compression, GzipLevel, ZstdLevel};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the creation timestamp is encoded.
///
/// Applied to the whole file; downstream queries depend on knowing which
/// granularity to expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampEncoding {
    /// Millisecond-precision UTC timestamp
    #[default]
    Millis,

    /// Whole UTC days since the epoch (time of day dropped)
    Day,
}

impl TimestampEncoding {
    /// Value stored in the file metadata.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimestampEncoding::Millis => "timestamp_millis",
            TimestampEncoding::Day => "date",
        }
    }
}

impl fmt::Display for TimestampEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Block compression for the Parquet file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportCompression {
    /// Zstandard (default level)
    #[default]
    Zstd,

    /// Snappy
    Snappy,

    /// Gzip (default level)
    Gzip,

    /// No compression
    None,
}

impl From<ExportCompression> for Compression {
    fn from(compression: ExportCompression) -> Self {
        match compression {
            ExportCompression::Zstd => Compression::ZSTD(ZstdLevel::default()),
            ExportCompression::Snappy => Compression::SNAPPY,
            ExportCompression::Gzip => Compression::GZIP(GzipLevel::default()),
            ExportCompression::None => Compression::UNCOMPRESSED,
        }
    }
}

/// Configuration for [`ParquetExporter`](crate::ParquetExporter).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Encoding of `created_date`
    pub timestamp_encoding: TimestampEncoding,

    /// Block compression
    pub compression: ExportCompression,

    /// Rows per record batch
    pub batch_size: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            timestamp_encoding: TimestampEncoding::default(),
            compression: ExportCompression::default(),
            batch_size: 8192,
        }
    }
}

impl ExportConfig {
    /// Create a new export configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timestamp encoding.
    pub fn with_timestamp_encoding(mut self, encoding: TimestampEncoding) -> Self {
        self.timestamp_encoding = encoding;
        self
    }

    /// Set the compression codec.
    pub fn with_compression(mut self, compression: ExportCompression) -> Self {
        self.compression = compression;
        self
    }

    /// Set the rows per record batch (clamped to at least 1).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }
}
