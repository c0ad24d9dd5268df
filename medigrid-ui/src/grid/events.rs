//! Host-facing grid output events.

use medigrid_lib::model::Value;

/// Events the grid controller emits to its host over an unbounded
/// channel.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    /// A cell-level inline edit bubbled up.
    CellEdited {
        /// Edited field key.
        field: String,
        /// New cell value.
        value: Value,
    },
    /// A full-row replacement after an inline edit.
    RowChanged {
        /// Index of the replaced row within the current page.
        index: usize,
        /// The field that triggered the replacement.
        field: String,
    },
    /// The search form was submitted with its field values.
    SearchSubmitted(Vec<(String, String)>),
    /// The take/skip reset flag changed. When set, the next remote fetch
    /// starts over at page 1 with the default page size.
    TakeSkipReset(bool),
    /// A page fetch completed.
    Loaded {
        /// Backend-reported record total.
        total_records: u64,
    },
    /// The backend rejected the session; the host redirects to the
    /// application root.
    AuthRejected,
}
