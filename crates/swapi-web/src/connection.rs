//! Relay-style connections over offset pagination.
//!
//! Cursors are base64 of `arrayconnection:<offset>`, the format used by the
//! graphql-relay reference implementation, so clients built against it can
//! page through these listings unchanged.

use crate::error::{ApiError, ApiResult};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;

const CURSOR_PREFIX: &str = "arrayconnection:";

/// Pagination arguments shared by every listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageArgs {
    pub limit: Option<i64>,
    pub offset: i64,
}

impl PageArgs {
    /// Validate `first` and `after` from a query string.
    pub fn parse(first: Option<i64>, after: Option<&str>) -> ApiResult<Self> {
        if let Some(first) = first {
            if first < 0 {
                return Err(ApiError::bad_request("first", "first must be a non-negative integer"));
            }
        }
        let offset = match after {
            Some(cursor) => decode_cursor(cursor)?
                .checked_add(1)
                .ok_or_else(|| ApiError::bad_request("after", format!("'{}' is out of range", cursor)))?,
            None => 0,
        };
        Ok(Self { limit: first, offset })
    }
}

pub fn encode_cursor(offset: i64) -> String {
    STANDARD.encode(format!("{}{}", CURSOR_PREFIX, offset))
}

pub fn decode_cursor(cursor: &str) -> ApiResult<i64> {
    let invalid = || ApiError::bad_request("after", format!("'{}' is not a valid cursor", cursor));

    let bytes = STANDARD.decode(cursor).map_err(|_| invalid())?;
    let raw = String::from_utf8(bytes).map_err(|_| invalid())?;
    raw.strip_prefix(CURSOR_PREFIX)
        .and_then(|n| n.parse::<i64>().ok())
        .filter(|n| *n >= 0)
        .ok_or_else(invalid)
}

#[derive(Debug, Serialize)]
pub struct Edge<T> {
    pub cursor: String,
    pub node: T,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
    pub page_info: PageInfo,
    pub total_count: i64,
}

impl<T> Connection<T> {
    /// Wrap one page of nodes fetched at `args.offset`.
    pub fn new(nodes: Vec<T>, args: PageArgs, total_count: i64) -> Self {
        let edges: Vec<Edge<T>> = nodes
            .into_iter()
            .enumerate()
            .map(|(i, node)| Edge {
                cursor: encode_cursor(args.offset.saturating_add(i as i64)),
                node,
            })
            .collect();

        let page_info = PageInfo {
            has_next_page: args.offset.saturating_add(edges.len() as i64) < total_count,
            has_previous_page: args.offset > 0,
            start_cursor: edges.first().map(|e| e.cursor.clone()),
            end_cursor: edges.last().map(|e| e.cursor.clone()),
        };

        Self {
            edges,
            page_info,
            total_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_format() {
        assert_eq!(encode_cursor(0), "YXJyYXljb25uZWN0aW9uOjA=");
        assert_eq!(decode_cursor("YXJyYXljb25uZWN0aW9uOjA=").unwrap(), 0);
        assert_eq!(decode_cursor(&encode_cursor(41)).unwrap(), 41);
    }

    #[test]
    fn test_bad_cursor_rejected() {
        assert!(decode_cursor("not base64!").is_err());
        assert!(decode_cursor(&STANDARD.encode("PlanetNode:1")).is_err());
        assert!(decode_cursor(&STANDARD.encode("arrayconnection:-1")).is_err());
    }

    #[test]
    fn test_last_representable_cursor_rejected() {
        let cursor = STANDARD.encode(format!("arrayconnection:{}", i64::MAX));
        assert_eq!(decode_cursor(&cursor).unwrap(), i64::MAX);

        let err = PageArgs::parse(Some(1), Some(&cursor)).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest { ref field, .. } if field == "after"));
    }

    #[test]
    fn test_page_info_near_offset_limit() {
        let conn = Connection::new(vec!["x", "y"], PageArgs { limit: None, offset: i64::MAX - 1 }, 3);
        assert_eq!(conn.page_info.end_cursor, Some(encode_cursor(i64::MAX)));
        assert!(!conn.page_info.has_next_page);
    }

    #[test]
    fn test_page_args() {
        let args = PageArgs::parse(Some(2), Some(&encode_cursor(1))).unwrap();
        assert_eq!(args.limit, Some(2));
        assert_eq!(args.offset, 2);

        assert!(PageArgs::parse(Some(-1), None).is_err());
        assert_eq!(PageArgs::parse(None, None).unwrap().offset, 0);
    }

    #[test]
    fn test_page_info() {
        let conn = Connection::new(vec!["b", "c"], PageArgs { limit: Some(2), offset: 1 }, 4);
        assert!(conn.page_info.has_next_page);
        assert!(conn.page_info.has_previous_page);
        assert_eq!(conn.page_info.end_cursor, Some(encode_cursor(2)));

        let last = Connection::new(vec!["d"], PageArgs { limit: Some(2), offset: 3 }, 4);
        assert!(!last.page_info.has_next_page);

        let empty: Connection<&str> = Connection::new(vec![], PageArgs::default(), 0);
        assert!(empty.page_info.end_cursor.is_none());
    }
}
