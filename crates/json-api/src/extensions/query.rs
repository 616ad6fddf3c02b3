//! Timestamp parsing helpers.

use jiff::Timestamp;
use salvo::{oapi::extract::QueryParam, prelude::StatusError};

use crate::extensions::*;

pub(crate) trait TimestampQueryExt {
    /// Parse an optional RFC 3339 query parameter named `name`.
    fn into_timestamp(self, name: &str) -> Result<Option<Timestamp>, StatusError>;
}

impl TimestampQueryExt for QueryParam<String, false> {
    fn into_timestamp(self, name: &str) -> Result<Option<Timestamp>, StatusError> {
        self.into_inner()
            .as_deref()
            .map(|value| parse_timestamp(value, name))
            .transpose()
    }
}

/// Parse an RFC 3339 timestamp supplied in field `name`.
pub(crate) fn parse_timestamp(value: &str, name: &str) -> Result<Timestamp, StatusError> {
    value
        .parse::<Timestamp>()
        .or_400(&format!("could not parse \"{name}\" as an RFC 3339 timestamp"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339_with_offset() {
        let parsed = parse_timestamp("2026-03-01T09:30:00+01:00", "from").ok();

        assert_eq!(parsed.map(Timestamp::as_second), Some(1_772_353_800));
    }

    #[test]
    fn rejects_dates_without_time() {
        assert!(parse_timestamp("2026-03-01", "from").is_err());
    }
}
