//! Error types and classification for keyledger.
//!
//! This crate provides:
//! - [`KlError`] - Top-level error enum for fatal pipeline errors
//! - Stage-specific errors ([`ListingError`], [`ExportError`])
//! - [`ApiError`] - Provider-neutral error returned by inventory sources
//! - [`AccessDenialClassifier`] - Decides whether an [`ApiError`] is an
//!   authorization denial

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level error type for keyledger.
///
/// Every variant is fatal for a run. Per-record enrichment failures are
/// never raised as errors; they are captured in the record status instead.
#[derive(Error, Debug)]
pub enum KlError {
    /// Credentials or region could not be resolved
    #[error("Configuration error: {0}")]
    Config(String),

    /// Listing failed (transport, authorization after the first page, ...)
    #[error("Listing error: {0}")]
    Listing(#[from] ListingError),

    /// Writing the output file failed
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Generic errors (wrapped anyhow)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Listing-related errors.
#[derive(Error, Debug)]
pub enum ListingError {
    /// The listing API call failed
    #[error("List request failed: {0}")]
    Request(ApiError),

    /// The listing API handed back a continuation token it had already issued
    #[error("Continuation token repeated: {0}")]
    RepeatedToken(String),

    /// A page reported more results but carried no continuation token
    #[error("More pages reported but no continuation token returned")]
    MissingToken,
}

/// Export-related errors.
///
/// Creation, mid-write and finalize failures are kept apart so callers can
/// tell an unopened file from a half-written one.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Output file could not be created or truncated
    #[error("Failed to create output file: {0}")]
    Create(String),

    /// Building or writing a batch failed
    #[error("Failed to write records: {0}")]
    Write(String),

    /// Closing the writer (footer write) failed
    #[error("Failed to finalize output file: {0}")]
    Finalize(String),
}

/// Error reported by an inventory source API call.
///
/// Carries the provider error code when one is known, plus the rendered
/// message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", describe(.code.as_deref(), .message))]
pub struct ApiError {
    /// Provider error code (e.g. `AccessDeniedException`)
    pub code: Option<String>,

    /// Human-readable message
    pub message: String,
}

impl ApiError {
    /// Create an error with a provider code.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }

    /// Create an error that carries no provider code.
    pub fn without_code(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }
}

/// `code: message`, unless the message already carries the code.
fn describe(code: Option<&str>, message: &str) -> String {
    match code {
        // SDK messages often already lead with the code
        Some(code) if !message.contains(code) => format!("{}: {}", code, message),
        _ => message.to_string(),
    }
}

/// Classifies [`ApiError`]s as authorization denials.
///
/// Error codes are provider-specific, so every list is extensible. An error
/// is a denial when its code is listed exactly, when its code contains one of
/// the code fragments, or when its message contains one of the phrases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessDenialClassifier {
    /// Error codes that always mean "access denied"
    pub codes: Vec<String>,

    /// Substrings matched against the error code
    pub code_fragments: Vec<String>,

    /// Substrings matched against the error message
    pub phrases: Vec<String>,
}

impl Default for AccessDenialClassifier {
    fn default() -> Self {
        Self {
            codes: vec![
                "AccessDeniedException".to_string(),
                "UnauthorizedOperation".to_string(),
                "UnauthorizedException".to_string(),
            ],
            code_fragments: vec!["NotAuthorized".to_string(), "AccessDenied".to_string()],
            phrases: vec!["AccessDenied".to_string(), "not authorized".to_string()],
        }
    }
}

impl AccessDenialClassifier {
    /// Create a classifier with the default AWS denial signatures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an exact error code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.codes.push(code.into());
        self
    }

    /// Add a code fragment.
    pub fn with_code_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.code_fragments.push(fragment.into());
        self
    }

    /// Add a message phrase.
    pub fn with_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.phrases.push(phrase.into());
        self
    }

    /// Returns true if the error carries an authorization-denial signature.
    pub fn is_denied(&self, error: &ApiError) -> bool {
        if let Some(code) = &error.code {
            if self.codes.iter().any(|c| c == code) {
                return true;
            }
            if self
                .code_fragments
                .iter()
                .any(|f| code.contains(f.as_str()))
            {
                return true;
            }
        }

        self.phrases
            .iter()
            .any(|p| error.message.contains(p.as_str()))
    }
}

/// Result type alias using KlError.
pub type Result<T> = std::result::Result<T, KlError>;
