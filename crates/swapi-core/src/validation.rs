//! Input checks shared by the authoring operations.

use crate::error::{SwapiError, SwapiResult};
use crate::global_id::{GlobalId, NodeKind};
use chrono::NaiveDate;

/// Date format accepted for `release_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Require a non-blank text field and return it trimmed.
pub fn required_text(field: &str, value: &str) -> SwapiResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(SwapiError::validation(field, format!("{} is required", field)));
    }
    Ok(value.to_string())
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_release_date(field: &str, value: &str) -> SwapiResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| SwapiError::validation(field, format!("{} must be in format YYYY-MM-DD", field)))
}

/// Decode a global id that must name a node of `kind`.
pub fn decode_reference(field: &str, token: &str, kind: NodeKind) -> SwapiResult<i64> {
    GlobalId::decode_as(token, kind)
        .map(|gid| gid.id)
        .map_err(|e| SwapiError::invalid_reference(field, format!("'{}': {}", token, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_date_format() {
        assert_eq!(
            parse_release_date("release_date", "2023-12-12").unwrap(),
            NaiveDate::from_ymd_opt(2023, 12, 12).unwrap()
        );
        let err = parse_release_date("release_date", "12-31-2020").unwrap_err();
        assert_eq!(err.field(), Some("release_date"));
        assert!(parse_release_date("release_date", "2021-02-30").is_err());
    }

    #[test]
    fn test_required_text() {
        assert_eq!(required_text("name", "  Hoth ").unwrap(), "Hoth");
        assert_eq!(required_text("name", "   ").unwrap_err().field(), Some("name"));
    }

    #[test]
    fn test_reference_of_wrong_kind() {
        let film = GlobalId::new(NodeKind::Film, 1).encode();
        let err = decode_reference("homeworld", &film, NodeKind::Planet).unwrap_err();
        assert!(matches!(err, SwapiError::InvalidReference { .. }));
        assert_eq!(err.field(), Some("homeworld"));
    }
}
