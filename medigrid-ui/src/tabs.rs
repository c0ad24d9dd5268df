//! Toolbar tab state across route changes and mediator intents.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, warn};

use crate::mediator::ActionMediator;
use crate::shared::Shared;

/// The toolbar tabs a screen can sit on.
///
/// Approve is an intent, not a tab: approving routes through the
/// mediator and never changes the selected tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// The regular record list.
    #[default]
    List,
    /// The blank entry form.
    Form,
    /// The entry form loaded with an existing record.
    Edit,
    /// Read-only record view.
    Details,
    /// The pending/processing list.
    PList,
}

impl Tab {
    /// The route segment suffix this tab maps to.
    pub fn segment(self) -> &'static str {
        match self {
            Tab::List => "List",
            Tab::Form => "Form",
            Tab::Edit => "Edit",
            Tab::Details => "Details",
            Tab::PList => "PList",
        }
    }
}

/// Tracks the selected toolbar tab and the search-panel flag for the
/// lifetime of the process.
///
/// The tracker does no routing itself; it reacts to route-change
/// notifications and mediator intents.
#[derive(Clone, Default)]
pub struct TabTracker {
    current: Shared<Tab>,
    search_visible: Shared<bool>,
    toggling: Arc<AtomicBool>,
}

impl TabTracker {
    /// Create a tracker starting on the list tab.
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently selected tab.
    pub fn current(&self) -> Tab {
        self.current.get()
    }

    /// Whether the search panel is shown.
    pub fn search_visible(&self) -> bool {
        self.search_visible.get()
    }

    /// Explicit toolbar selection.
    pub fn select(&self, tab: Tab) {
        debug!("tab selected: {tab:?}");
        self.current.set(tab);
    }

    /// React to a completed navigation.
    ///
    /// A `do=<id>` query parameter while sitting on the form tab means
    /// the form was loaded with an existing record, so the tab becomes
    /// Edit. A route whose leading segment ends in `PList` always lands
    /// on the PList tab.
    pub fn on_route_change(&self, route: &str) {
        let (path, query) = match route.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (route, None),
        };

        if let Some(query) = query {
            let has_do = url::form_urlencoded::parse(query.as_bytes()).any(|(key, _)| key == "do");
            if has_do && self.current.get() == Tab::Form {
                self.current.set(Tab::Edit);
            }
        }

        if leading_segment(path).ends_with("PList") {
            self.current.set(Tab::PList);
        }
    }

    /// Wire the tracker to a mediator for the mediator's lifetime.
    ///
    /// A details emission forces the Details tab. A search toggle flips
    /// the panel flag; a toggle arriving while one is being applied is
    /// dropped.
    pub fn wire<R: 'static>(&self, mediator: &ActionMediator<R>) {
        let current = self.current.clone();
        mediator
            .details
            .subscribe(move |_| {
                current.set(Tab::Details);
            })
            .detach();

        let search_visible = self.search_visible.clone();
        let toggling = Arc::clone(&self.toggling);
        mediator
            .search_toggle
            .subscribe(move |_| {
                if toggling
                    .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
                    .is_err()
                {
                    warn!("search toggle dropped, previous toggle still applying");
                    return;
                }
                search_visible.update(|visible| *visible = !*visible);
                toggling.store(false, Ordering::SeqCst);
            })
            .detach();
    }
}

/// Rewrites a route for a tab switch.
///
/// The leading segment's minor tab (`PList`, `Form` or `List`, in that
/// precedence) is replaced with the target tab's segment. Query
/// parameters are dropped, matching a fresh navigation.
pub fn redirect_route(route: &str, target: Tab) -> String {
    let path = route.split('?').next().unwrap_or(route);
    let segment = leading_segment(path);

    let minor = if segment.contains("PList") {
        "PList"
    } else if segment.contains("Form") {
        "Form"
    } else if segment.contains("List") {
        "List"
    } else {
        "PList"
    };

    format!("/{}", segment.replacen(minor, target.segment(), 1))
}

fn leading_segment(path: &str) -> &str {
    path.trim_start_matches('/').split('/').next().unwrap_or("")
}
