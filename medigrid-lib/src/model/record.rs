//! Dynamic grid record

use std::collections::HashMap;

use super::Value;

/// A dynamic row as returned by the list endpoints.
///
/// Records hold field values as a `HashMap<String, Value>`, allowing a
/// single grid implementation to display any entity (patients, doctors,
/// medicines, ...) without a typed row struct per screen.
///
/// # Example
///
/// ```
/// use medigrid_lib::model::Record;
///
/// let record = Record::new()
///     .set("id", 4i64)
///     .set("name", "Amoxicillin");
///
/// assert_eq!(record.id(), Some(4));
/// assert_eq!(record.get("name").and_then(|v| v.as_str()), Some("Amoxicillin"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: HashMap<String, Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field value, builder style.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Returns a field value, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns the numeric row identity from the `id` field.
    pub fn id(&self) -> Option<i64> {
        self.get("id").and_then(Value::as_i64)
    }

    /// Returns the backend-reported record total, carried on the first
    /// row of a page as `totalRecords`.
    pub fn total_records(&self) -> Option<u64> {
        self.get("totalRecords")
            .and_then(Value::as_i64)
            .and_then(|n| u64::try_from(n).ok())
    }

    /// Iterates over the field keys and values.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Builds a record from a JSON object, collapsing non-scalar field
    /// values to `Null`. Returns `None` when the JSON is not an object.
    pub fn from_json(json: serde_json::Value) -> Option<Self> {
        match json {
            serde_json::Value::Object(map) => Some(Self {
                fields: map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            }),
            _ => None,
        }
    }
}
