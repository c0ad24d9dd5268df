//! Response envelope decoding.

use serde_json::Value as Json;

use crate::error::ApiError;
use crate::model::Record;

/// One decoded page of rows.
///
/// List endpoints answer with either a bare JSON array or a `{ "data":
/// [...] }` envelope; the record total rides on the first row as
/// `totalRecords` and falls back to the page length when absent.
#[derive(Debug, Clone, Default)]
pub struct PageResponse {
    rows: Vec<Record>,
    total_records: u64,
}

impl PageResponse {
    /// Creates a page from already-decoded rows. Used by in-memory
    /// fetchers in tests and demos.
    pub fn new(rows: Vec<Record>, total_records: u64) -> Self {
        Self {
            rows,
            total_records,
        }
    }

    /// An empty page with zero records.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Decodes a response body.
    ///
    /// A null body is an empty page, not an error; a body that is neither
    /// an array nor a `data` envelope fails to parse.
    pub fn from_json(body: Json) -> Result<Self, ApiError> {
        let items = match body {
            Json::Null => return Ok(Self::empty()),
            Json::Array(items) => items,
            Json::Object(mut map) => match map.remove("data") {
                Some(Json::Array(items)) => items,
                Some(Json::Null) | None => {
                    return Err(ApiError::parse("expected an array or a data envelope"));
                }
                Some(_) => return Err(ApiError::parse("data field is not an array")),
            },
            _ => return Err(ApiError::parse("expected an array or a data envelope")),
        };

        let rows = items
            .into_iter()
            .map(|item| {
                Record::from_json(item).ok_or_else(|| ApiError::parse("row is not a JSON object"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let total_records = rows
            .first()
            .and_then(Record::total_records)
            .unwrap_or(rows.len() as u64);

        Ok(Self {
            rows,
            total_records,
        })
    }

    /// Returns the rows in this page.
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// Consumes the page and returns the rows.
    pub fn into_rows(self) -> Vec<Record> {
        self.rows
    }

    /// Returns the backend-reported record total.
    pub fn total_records(&self) -> u64 {
        self.total_records
    }

    /// Returns the number of rows in this page.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if this page has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_array() {
        let page = PageResponse::from_json(json!([{"id": 1}, {"id": 2}])).unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page.total_records(), 2);
    }

    #[test]
    fn data_envelope() {
        let page = PageResponse::from_json(json!({"data": [{"id": 1}]})).unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page.total_records(), 1);
    }

    #[test]
    fn total_from_first_row() {
        let page = PageResponse::from_json(json!([
            {"id": 1, "totalRecords": 412},
            {"id": 2},
        ]))
        .unwrap();
        assert_eq!(page.total_records(), 412);
    }

    #[test]
    fn null_body_is_empty_page() {
        let page = PageResponse::from_json(Json::Null).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_records(), 0);
    }

    #[test]
    fn envelope_without_data_fails() {
        assert!(PageResponse::from_json(json!({"message": "nope"})).is_err());
        assert!(PageResponse::from_json(json!(42)).is_err());
    }
}
