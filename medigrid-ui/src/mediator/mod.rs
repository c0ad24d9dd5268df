//! Cross-component action mediation.

mod channel;

pub use channel::{Channel, Subscription};

use crate::shared::Shared;

/// The channel hub between the grid, its toolbar and the host screens.
///
/// Each intent gets its own typed channel; nothing is buffered. The one
/// piece of shared state outside the channels is the checkbox selection
/// slot, which the grid overwrites on every selection change so that
/// bulk actions always publish the current ids.
///
/// `R` is the row payload type carried by the row-level intents.
pub struct ActionMediator<R> {
    /// Open a row in the edit form.
    pub edit: Channel<R>,
    /// Open a row read-only.
    pub details: Channel<R>,
    /// Create a new row.
    pub add: Channel<()>,
    /// Delete the published row ids.
    pub delete: Channel<Vec<i64>>,
    /// Approve the published row ids.
    pub approve: Channel<Vec<i64>>,
    /// Show or hide the search panel.
    pub search_toggle: Channel<()>,
    /// Send the published row ids back to sales confirmation.
    pub back_to_sales_confirm: Channel<Vec<i64>>,
    /// Generate the management report.
    pub generate_report: Channel<()>,
    /// Replace a row in the grid with fresh data.
    pub data_replace: Channel<R>,
    /// Current checkbox selection, written by the grid on every change.
    pub checkbox_selected: Shared<Vec<i64>>,
}

impl<R: 'static> ActionMediator<R> {
    /// Create a mediator with empty channels.
    pub fn new() -> Self {
        Self {
            edit: Channel::new(),
            details: Channel::new(),
            add: Channel::new(),
            delete: Channel::new(),
            approve: Channel::new(),
            search_toggle: Channel::new(),
            back_to_sales_confirm: Channel::new(),
            generate_report: Channel::new(),
            data_replace: Channel::new(),
            checkbox_selected: Shared::default(),
        }
    }

    /// Publish the current checkbox selection on the delete channel.
    pub fn delete_selected(&self) {
        self.delete.publish(&self.checkbox_selected.get());
    }

    /// Publish the current checkbox selection on the approve channel.
    pub fn approve_selected(&self) {
        self.approve.publish(&self.checkbox_selected.get());
    }

    /// Publish the current checkbox selection on the back-to-sales
    /// channel.
    pub fn back_to_sales_selected(&self) {
        self.back_to_sales_confirm
            .publish(&self.checkbox_selected.get());
    }

    /// Publish the add intent.
    pub fn add_new(&self) {
        self.add.publish(&());
    }

    /// Publish the search panel toggle.
    pub fn toggle_search(&self) {
        self.search_toggle.publish(&());
    }

    /// Publish the report-generation intent.
    pub fn request_report(&self) {
        self.generate_report.publish(&());
    }
}

impl<R> Clone for ActionMediator<R> {
    fn clone(&self) -> Self {
        Self {
            edit: self.edit.clone(),
            details: self.details.clone(),
            add: self.add.clone(),
            delete: self.delete.clone(),
            approve: self.approve.clone(),
            search_toggle: self.search_toggle.clone(),
            back_to_sales_confirm: self.back_to_sales_confirm.clone(),
            generate_report: self.generate_report.clone(),
            data_replace: self.data_replace.clone(),
            checkbox_selected: self.checkbox_selected.clone(),
        }
    }
}

impl<R: 'static> Default for ActionMediator<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn bulk_actions_publish_the_checkbox_slot() {
        let mediator: ActionMediator<i64> = ActionMediator::new();
        mediator.checkbox_selected.set(vec![4, 9]);

        let seen: Arc<Mutex<Vec<i64>>> = Arc::default();
        let captured = Arc::clone(&seen);
        mediator
            .delete
            .subscribe(move |ids| {
                *captured.lock().unwrap() = ids.clone();
            })
            .detach();

        mediator.delete_selected();
        assert_eq!(*seen.lock().unwrap(), vec![4, 9]);
    }
}
