//! SQL for each entity family. Timestamps are RFC 3339 TEXT columns;
//! ids are UUID v4 strings.

pub mod note_crud;
pub mod reminder_ops;
pub mod tag_ops;

use chrono::{DateTime, Utc};

use noteworks_core::errors::NoteworksResult;

use crate::to_storage_err;

/// Parse an RFC 3339 TEXT column back into a UTC timestamp.
pub(crate) fn parse_dt(s: &str) -> NoteworksResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("parse datetime '{s}': {e}")))
}
