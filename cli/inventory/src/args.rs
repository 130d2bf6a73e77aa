//! CLI argument definitions for keyledger.

use clap::{Parser, ValueEnum};
use kl_cli_common::LogLevel;
use kl_export::{ExportCompression, TimestampEncoding};
use kl_types::ResourceKind;
use std::path::PathBuf;

/// Inventory KMS keys or Secrets Manager secrets.
///
/// Lists every resource in the account and region, looks up its details and
/// tags, and either prints text tables or writes a Parquet file.
///
/// ## Examples
///
/// Tables on stdout:
///   keyledger --region eu-west-1
///
/// Secrets to Parquet:
///   keyledger --resource secret --format parquet -o secrets.parquet
///
/// Against LocalStack:
///   keyledger --endpoint http://localhost:4566 --access-key test --secret-key test
#[derive(Parser, Debug)]
#[command(name = "keyledger")]
#[command(version, about, long_about = None)]
pub struct Cli {
    // === AWS Configuration ===
    /// AWS profile name
    #[arg(long, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// AWS region
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Custom endpoint URL (for LocalStack)
    #[arg(long, env = "KEYLEDGER_ENDPOINT")]
    pub endpoint: Option<String>,

    /// AWS access key ID
    #[arg(long, env = "AWS_ACCESS_KEY_ID", requires = "secret_key")]
    pub access_key: Option<String>,

    /// AWS secret access key
    #[arg(long, env = "AWS_SECRET_ACCESS_KEY", requires = "access_key")]
    pub secret_key: Option<String>,

    /// AWS session token
    #[arg(long, env = "AWS_SESSION_TOKEN")]
    pub session_token: Option<String>,

    // === Inventory Options ===
    /// Resource kind to inventory
    #[arg(long, value_enum, default_value = "key")]
    pub resource: ResourceArg,

    /// Also list resources managed by AWS or another service
    #[arg(long)]
    pub include_foreign: bool,

    /// Drop resources managed by AWS or another service (default for keys)
    #[arg(long, conflicts_with = "include_foreign")]
    pub owned_only: bool,

    /// Maximum concurrent detail lookups (must be >= 1)
    #[arg(long, default_value = "1", value_parser = parse_positive_usize)]
    pub concurrency: usize,

    /// Extra error code to treat as an authorization denial (repeatable)
    #[arg(long = "denial-code")]
    pub denial_codes: Vec<String>,

    /// Extra message phrase to treat as an authorization denial (repeatable)
    #[arg(long = "denial-phrase")]
    pub denial_phrases: Vec<String>,

    // === Output Options ===
    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: FormatArg,

    /// Output file (parquet format only)
    #[arg(short, long, env = "KEYLEDGER_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Encoding of the creation date column (parquet format only)
    #[arg(long, value_enum, default_value = "millis")]
    pub timestamp_encoding: TimestampEncodingArg,

    /// Compression codec (parquet format only)
    #[arg(long, value_enum, default_value = "zstd")]
    pub compression: CompressionArg,

    // === Logging Options ===
    /// Log level
    #[arg(long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

impl Cli {
    /// Whether foreign-managed resources are filtered out.
    ///
    /// On by default for keys, off by default for secrets.
    pub fn filter_foreign(&self) -> bool {
        if self.include_foreign {
            return false;
        }
        self.owned_only || self.resource == ResourceArg::Key
    }

    /// The output path, falling back to a per-kind default.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.resource.default_output()))
    }
}

/// Resource kind argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceArg {
    /// KMS keys
    Key,
    /// Secrets Manager secrets
    Secret,
}

impl ResourceArg {
    fn default_output(self) -> &'static str {
        match self {
            ResourceArg::Key => "keys.parquet",
            ResourceArg::Secret => "secrets.parquet",
        }
    }
}

impl From<ResourceArg> for ResourceKind {
    fn from(arg: ResourceArg) -> Self {
        match arg {
            ResourceArg::Key => ResourceKind::Key,
            ResourceArg::Secret => ResourceKind::Secret,
        }
    }
}

/// Output format argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Fixed-width text tables on stdout
    Table,
    /// Parquet file
    Parquet,
}

/// Creation date encoding argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TimestampEncodingArg {
    /// Millisecond UTC timestamp
    Millis,
    /// Day-precision date
    Day,
}

impl From<TimestampEncodingArg> for TimestampEncoding {
    fn from(arg: TimestampEncodingArg) -> Self {
        match arg {
            TimestampEncodingArg::Millis => TimestampEncoding::Millis,
            TimestampEncodingArg::Day => TimestampEncoding::Day,
        }
    }
}

/// Compression codec argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CompressionArg {
    /// Zstandard
    Zstd,
    /// Snappy
    Snappy,
    /// Gzip
    Gzip,
    /// Uncompressed
    None,
}

impl From<CompressionArg> for ExportCompression {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::Zstd => ExportCompression::Zstd,
            CompressionArg::Snappy => ExportCompression::Snappy,
            CompressionArg::Gzip => ExportCompression::Gzip,
            CompressionArg::None => ExportCompression::None,
        }
    }
}

/// Parse a positive usize (>= 1).
fn parse_positive_usize(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if value < 1 {
        return Err(format!("{} is not in 1..", value));
    }
    Ok(value)
}
