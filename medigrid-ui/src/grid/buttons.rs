//! Per-row action buttons.

use std::sync::Arc;

type Handler<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// One per-row action button: a visibility flag and an optional handler.
pub struct ActionButton<T> {
    /// Whether the button is rendered for this grid.
    pub visible: bool,
    handler: Option<Handler<T>>,
}

impl<T> ActionButton<T> {
    /// A visible button with a handler.
    pub fn new(handler: impl Fn(&T) + Send + Sync + 'static) -> Self {
        Self {
            visible: true,
            handler: Some(Arc::new(handler)),
        }
    }

    /// Fire the handler for a row, if one is attached.
    pub fn fire(&self, row: &T) {
        if let Some(handler) = &self.handler {
            handler(row);
        }
    }
}

impl<T> Default for ActionButton<T> {
    fn default() -> Self {
        Self {
            visible: false,
            handler: None,
        }
    }
}

impl<T> Clone for ActionButton<T> {
    fn clone(&self) -> Self {
        Self {
            visible: self.visible,
            handler: self.handler.clone(),
        }
    }
}

/// The action-button column for one grid. Every button defaults to
/// hidden with no handler; hosts opt in per screen.
#[derive(Clone)]
pub struct RowActions<T> {
    /// Opens the row in the edit form.
    pub edit: ActionButton<T>,
    /// Deletes the row.
    pub delete: ActionButton<T>,
    /// Opens the row read-only.
    pub details: ActionButton<T>,
    /// Prints the row.
    pub print: ActionButton<T>,
    /// Approves the row.
    pub approve: ActionButton<T>,
}

impl<T> Default for RowActions<T> {
    fn default() -> Self {
        Self {
            edit: ActionButton::default(),
            delete: ActionButton::default(),
            details: ActionButton::default(),
            print: ActionButton::default(),
            approve: ActionButton::default(),
        }
    }
}

impl<T> RowActions<T> {
    /// Actions with every button hidden.
    pub fn none() -> Self {
        Self::default()
    }
}
