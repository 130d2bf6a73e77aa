//! Arrow schema of the exported file.

use arrow::array::{Array, MapBuilder, StringBuilder};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef, TimeUnit};
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::TimestampEncoding;

/// Schema metadata key recording the `created_date` encoding.
pub const ENCODING_METADATA_KEY: &str = "keyledger.created_date.encoding";

/// Timezone attached to `created_date` timestamps.
pub(crate) const UTC: &str = "UTC";

/// Schema for the inventory file under the given encoding.
///
/// | column | type | nullable |
/// |---|---|---|
/// | `name` | Utf8 | no |
/// | `status` | Utf8 | no |
/// | `description` | Utf8 | yes |
/// | `classification` | Utf8 | yes |
/// | `created_date` | Timestamp(ms, UTC) or Date32 | yes |
/// | `last_accessed_date` | Date32 | yes |
/// | `tags` | Map<Utf8, Utf8> | yes |
pub fn inventory_schema(encoding: TimestampEncoding) -> SchemaRef {
    let created_type = match encoding {
        TimestampEncoding::Millis => DataType::Timestamp(TimeUnit::Millisecond, Some(UTC.into())),
        TimestampEncoding::Day => DataType::Date32,
    };

    let metadata = HashMap::from([(
        ENCODING_METADATA_KEY.to_string(),
        encoding.as_str().to_string(),
    )]);

    Arc::new(
        Schema::new(vec![
            Field::new("name", DataType::Utf8, false),
            Field::new("status", DataType::Utf8, false),
            Field::new("description", DataType::Utf8, true),
            Field::new("classification", DataType::Utf8, true),
            Field::new("created_date", created_type, true),
            Field::new("last_accessed_date", DataType::Date32, true),
            Field::new("tags", tags_type(), true),
        ])
        .with_metadata(metadata),
    )
}

/// A fresh builder for the `tags` column.
pub(crate) fn tags_builder() -> MapBuilder<StringBuilder, StringBuilder> {
    MapBuilder::new(None, StringBuilder::new(), StringBuilder::new())
}

/// Map type exactly as [`tags_builder`] produces it.
fn tags_type() -> DataType {
    tags_builder().finish().data_type().clone()
}
