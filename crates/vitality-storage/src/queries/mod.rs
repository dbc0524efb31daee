//! SQL for each table. Every function takes a plain connection so it runs
//! equally inside or outside an explicit transaction.

pub mod badge_ops;
pub mod interaction_ops;
pub mod outcome_ops;
pub mod relationship_ops;

use chrono::{DateTime, NaiveDate, Utc};

use vitality_core::errors::{VitalityError, VitalityResult};

use crate::to_storage_err;

pub(crate) fn parse_timestamp(raw: &str) -> VitalityResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("bad timestamp {raw:?}: {e}")))
}

pub(crate) fn parse_optional_timestamp(
    raw: Option<String>,
) -> VitalityResult<Option<DateTime<Utc>>> {
    raw.as_deref().map(parse_timestamp).transpose()
}

pub(crate) fn parse_optional_date(raw: Option<String>) -> VitalityResult<Option<NaiveDate>> {
    raw.as_deref()
        .map(|d| {
            d.parse::<NaiveDate>()
                .map_err(|e| to_storage_err(format!("bad date {d:?}: {e}")))
        })
        .transpose()
}

/// Decode a wire-named enum column.
pub(crate) fn parse_wire<T>(
    column: &str,
    raw: &str,
    parse: impl FnOnce(&str) -> Option<T>,
) -> VitalityResult<T> {
    parse(raw).ok_or_else(|| {
        VitalityError::SerializationError(format!("unknown {column} value {raw:?}"))
    })
}
