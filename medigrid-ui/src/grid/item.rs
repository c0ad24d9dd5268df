//! Column definitions and the row trait the grid is generic over.

use medigrid_lib::model::{Record, Value};

/// How a column's cells are rendered and edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnKind {
    /// Plain text cell.
    #[default]
    Text,
    /// Right-aligned numeric cell, eligible for sum rows.
    Number,
    /// Inline-editable input cell.
    Input,
    /// Image cell, rendered from a URL or path value.
    Image,
}

/// A grid column definition.
#[derive(Debug, Clone)]
pub struct Column {
    /// Field key projected out of each row.
    pub key: String,
    /// Header title.
    pub title: String,
    /// Cell kind.
    pub kind: ColumnKind,
    /// Hidden columns are skipped by rendering, search and sum rows.
    pub visible: bool,
    /// Whether the header toggles sorting.
    pub sortable: bool,
    /// Input columns marked read-only reject inline edits.
    pub read_only: bool,
}

impl Column {
    /// Create a visible, sortable text column.
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            kind: ColumnKind::Text,
            visible: true,
            sortable: true,
            read_only: false,
        }
    }

    /// Set the cell kind.
    pub fn kind(mut self, kind: ColumnKind) -> Self {
        self.kind = kind;
        self
    }

    /// Hide the column.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Disable header sorting.
    pub fn not_sortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Mark an input column read-only.
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }
}

/// A row the grid can display.
///
/// Only two things are required: a numeric identity and a dynamic field
/// projection. [`Record`] implements this directly; typed row structs
/// implement it by mapping their fields.
pub trait GridRow: Clone + Send + Sync + 'static {
    /// Numeric row identity, used for selection tracking.
    fn id(&self) -> i64;

    /// Project a field by column key. Unknown keys yield `Value::Null`.
    fn field(&self, key: &str) -> Value;
}

impl GridRow for Record {
    fn id(&self) -> i64 {
        Record::id(self).unwrap_or_default()
    }

    fn field(&self, key: &str) -> Value {
        self.get(key).cloned().unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let column = Column::new("name", "Name");
        assert!(column.visible);
        assert!(column.sortable);
        assert_eq!(column.kind, ColumnKind::Text);

        let hidden = Column::new("id", "Id").hidden().not_sortable();
        assert!(!hidden.visible);
        assert!(!hidden.sortable);
    }

    #[test]
    fn record_rows_project_fields() {
        let record = Record::new().set("id", 9i64).set("name", "Paracetamol");
        assert_eq!(GridRow::id(&record), 9);
        assert_eq!(record.field("name").as_str(), Some("Paracetamol"));
        assert!(record.field("missing").is_null());
    }
}
