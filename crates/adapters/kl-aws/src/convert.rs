//! Conversions from SDK types.

use aws_smithy_types::error::display::DisplayErrorContext;
use aws_smithy_types::error::metadata::ProvideErrorMetadata;
use chrono::{DateTime, Utc};
use kl_error::ApiError;

/// Convert an SDK timestamp to UTC.
pub(crate) fn to_utc(ts: &aws_smithy_types::DateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts.secs(), ts.subsec_nanos())
}

/// Convert an SDK operation error into an [`ApiError`].
///
/// Keeps the service error code when the response carried one. Transport
/// failures have no code and keep the full error chain as the message.
pub(crate) fn api_error<E>(err: E) -> ApiError
where
    E: ProvideErrorMetadata + std::error::Error,
{
    let message = match err.message() {
        Some(message) => message.to_string(),
        None => DisplayErrorContext(&err).to_string(),
    };

    match err.code() {
        Some(code) => ApiError::new(code, message),
        None => ApiError::without_code(message),
    }
}
