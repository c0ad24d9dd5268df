//! The paginated grid controller.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use log::{debug, error};
use medigrid_lib::error::ApiError;
use medigrid_lib::fetch::{FetchDescriptor, PageFetcher, PageResponse};
use medigrid_lib::model::{Record, Value};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::selection::Selection;
use crate::shared::Shared;

use super::events::GridEvent;
use super::item::{Column, GridRow};
use super::pages::{
    DEFAULT_MAX_VISIBLE_PAGES, DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZES, PageSizeOption, PageState,
    insert_page_size,
};
use super::sum::SumCell;

/// Settling window between a navigation and the page fetch it triggers.
///
/// Rapid page clicks collapse into one request: each navigation cancels
/// and replaces the single pending timer.
pub const SETTLE_DELAY: Duration = Duration::from_millis(500);

type Decode<T> = Arc<dyn Fn(Record) -> T + Send + Sync>;

/// Where the grid's rows come from.
enum DataMode<T> {
    /// The full data set is held client-side and sliced per page.
    Local,
    /// Pages are fetched on demand through a [`PageFetcher`].
    Remote {
        descriptor: FetchDescriptor,
        fetcher: Arc<dyn PageFetcher>,
        decode: Decode<T>,
    },
}

struct GridInner<T> {
    columns: Vec<Column>,
    mode: DataMode<T>,
    /// Local mode: the full data set. Remote mode: the last fetched page.
    data: Vec<T>,
    /// The rows currently materialized for display.
    page_rows: Vec<T>,
    page: PageState,
    page_sizes: Vec<PageSizeOption>,
    default_page_size: u64,
    max_visible_pages: u64,
    /// Current sort: column key and ascending flag.
    sort: Option<(String, bool)>,
    /// Lowercased free-text filter, empty when inactive.
    search_term: String,
    selection: Selection<i64>,
    all_selected: bool,
    loading: bool,
    /// When set, the next remote fetch starts over at page 1 with the
    /// default page size.
    take_skip_reset: bool,
}

impl<T> GridInner<T> {
    fn new(columns: Vec<Column>, mode: DataMode<T>, data: Vec<T>) -> Self {
        Self {
            columns,
            mode,
            data,
            page_rows: Vec::new(),
            page: PageState::default(),
            page_sizes: DEFAULT_PAGE_SIZES.to_vec(),
            default_page_size: DEFAULT_PAGE_SIZE,
            max_visible_pages: DEFAULT_MAX_VISIBLE_PAGES,
            sort: None,
            search_term: String::new(),
            selection: Selection::new(),
            all_selected: false,
            loading: false,
            take_skip_reset: false,
        }
    }
}

/// A paginated, sortable, multi-selectable grid over any [`GridRow`]
/// type.
///
/// The controller is a cheap-to-clone handle over shared state. Hosts
/// receive output events ([`GridEvent`]) over the channel returned by
/// the constructors.
///
/// Local grids slice a client-side data set; remote grids fetch one
/// page at a time through a [`PageFetcher`] after a settling delay,
/// discarding responses that a later navigation has made stale.
pub struct GridController<T: GridRow> {
    inner: Arc<RwLock<GridInner<T>>>,
    events: UnboundedSender<GridEvent>,
    fetch_token: Arc<AtomicU64>,
    pending: Arc<Mutex<Option<JoinHandle<()>>>>,
    checkbox_slot: Shared<Vec<i64>>,
}

impl<T: GridRow> GridController<T> {
    /// Create a grid over a client-side data set.
    pub fn local(columns: Vec<Column>, rows: Vec<T>) -> (Self, UnboundedReceiver<GridEvent>) {
        let (controller, rx) = Self::build(GridInner::new(columns, DataMode::Local, rows));
        controller.materialize_local();
        (controller, rx)
    }

    /// Create a grid fetching pages remotely, decoding rows with
    /// `T::from`.
    ///
    /// No fetch happens until the first [`reload`](Self::reload) or
    /// navigation.
    pub fn remote(
        columns: Vec<Column>,
        descriptor: FetchDescriptor,
        fetcher: Arc<dyn PageFetcher>,
    ) -> (Self, UnboundedReceiver<GridEvent>)
    where
        T: From<Record>,
    {
        let mode = DataMode::Remote {
            descriptor,
            fetcher,
            decode: Arc::new(T::from),
        };
        Self::build(GridInner::new(columns, mode, Vec::new()))
    }

    fn build(inner: GridInner<T>) -> (Self, UnboundedReceiver<GridEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                inner: Arc::new(RwLock::new(inner)),
                events: tx,
                fetch_token: Arc::new(AtomicU64::new(0)),
                pending: Arc::new(Mutex::new(None)),
                checkbox_slot: Shared::default(),
            },
            rx,
        )
    }

    /// Set the default page size, adding it to the size menu if absent.
    pub fn with_page_size(self, size: u64) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.default_page_size = size;
            guard.page.page_size = size;
            insert_page_size(&mut guard.page_sizes, size);
            let max_visible = guard.max_visible_pages;
            guard.page.recompute(max_visible);
        }
        self.rematerialize();
        self
    }

    /// Set the width of the page-number window.
    pub fn with_max_visible_pages(self, max_visible: u64) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.max_visible_pages = max_visible;
            guard.page.recompute(max_visible);
        }
        self
    }

    /// Share the mediator's checkbox slot, so every selection change is
    /// visible to bulk actions.
    pub fn with_checkbox_slot(mut self, slot: Shared<Vec<i64>>) -> Self {
        self.checkbox_slot = slot;
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The rows materialized for the current page.
    pub fn page_rows(&self) -> Vec<T> {
        self.inner
            .read()
            .map(|g| g.page_rows.clone())
            .unwrap_or_default()
    }

    /// The derived pagination state.
    pub fn page_state(&self) -> PageState {
        self.inner
            .read()
            .map(|g| g.page.clone())
            .unwrap_or_default()
    }

    /// The page-size menu.
    pub fn page_sizes(&self) -> Vec<PageSizeOption> {
        self.inner
            .read()
            .map(|g| g.page_sizes.clone())
            .unwrap_or_default()
    }

    /// The column definitions.
    pub fn columns(&self) -> Vec<Column> {
        self.inner
            .read()
            .map(|g| g.columns.clone())
            .unwrap_or_default()
    }

    /// Current sort: column key and ascending flag.
    pub fn sort(&self) -> Option<(String, bool)> {
        self.inner.read().ok().and_then(|g| g.sort.clone())
    }

    /// Whether a page fetch is pending.
    pub fn is_loading(&self) -> bool {
        self.inner.read().map(|g| g.loading).unwrap_or(false)
    }

    /// Selected row ids in selection order.
    pub fn selected_ids(&self) -> Vec<i64> {
        self.inner
            .read()
            .map(|g| g.selection.ids())
            .unwrap_or_default()
    }

    /// Whether every row on the current page is selected.
    pub fn is_all_selected(&self) -> bool {
        self.inner.read().map(|g| g.all_selected).unwrap_or(false)
    }

    /// Whether a row is selected.
    pub fn is_selected(&self, id: i64) -> bool {
        self.inner
            .read()
            .map(|g| g.selection.is_selected(&id))
            .unwrap_or(false)
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Jump to a page, clamped to `[1, total_pages]`.
    pub fn go_to_page(&self, page: u64) {
        if let Ok(mut guard) = self.inner.write() {
            let clamped = page.clamp(1, guard.page.total_pages);
            guard.page.current_page = clamped;
            let max_visible = guard.max_visible_pages;
            guard.page.recompute(max_visible);
        }
        self.reload();
    }

    /// Advance one page.
    pub fn next_page(&self) {
        let current = self.page_state().current_page;
        self.go_to_page(current + 1);
    }

    /// Go back one page.
    pub fn previous_page(&self) {
        let current = self.page_state().current_page;
        self.go_to_page(current.saturating_sub(1));
    }

    /// Change the page size and return to page 1.
    ///
    /// `All` resolves against the record total now; a total that grows
    /// later does not widen the page.
    pub fn change_page_size(&self, option: PageSizeOption) {
        if let Ok(mut guard) = self.inner.write() {
            guard.page.page_size = match option {
                PageSizeOption::Size(size) => size.max(1),
                PageSizeOption::All => guard.page.total_records.max(1),
            };
            guard.page.current_page = 1;
            let max_visible = guard.max_visible_pages;
            guard.page.recompute(max_visible);
        }
        self.reload();
    }

    /// Reload the current page: rematerialize locally, or schedule a
    /// fetch in remote mode.
    pub fn reload(&self) {
        let remote = self
            .inner
            .read()
            .map(|g| matches!(g.mode, DataMode::Remote { .. }))
            .unwrap_or(false);
        if remote {
            self.schedule_fetch();
        } else {
            self.materialize_local();
        }
    }

    // -------------------------------------------------------------------------
    // Search and sort
    // -------------------------------------------------------------------------

    /// Apply a free-text filter over the visible columns and return to
    /// page 1. Filtering is case-insensitive substring match over each
    /// cell's string rendering; null cells never match.
    pub fn search(&self, term: &str) {
        if let Ok(mut guard) = self.inner.write() {
            guard.search_term = term.to_lowercase();
            guard.page.current_page = 1;
            let max_visible = guard.max_visible_pages;
            guard.page.recompute(max_visible);
        }
        self.rematerialize();
    }

    /// Toggle sorting on a column: the same column flips direction, a
    /// new column starts ascending.
    pub fn sort_by(&self, key: &str) {
        if let Ok(mut guard) = self.inner.write() {
            let ascending = match &guard.sort {
                Some((current, asc)) if current == key => !*asc,
                _ => true,
            };
            guard.sort = Some((key.to_string(), ascending));

            guard.data.sort_by(|a, b| {
                let ordering = a.field(key).compare(&b.field(key));
                if ascending { ordering } else { ordering.reverse() }
            });
        }
        self.rematerialize();
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Select or deselect every row on the current page. Selections
    /// made on other pages are untouched, so toggling twice restores
    /// the prior state.
    pub fn toggle_select_all(&self) {
        let ids = if let Ok(mut guard) = self.inner.write() {
            let page_ids: Vec<i64> = guard.page_rows.iter().map(GridRow::id).collect();
            if guard.all_selected {
                guard.selection.deselect_many(&page_ids);
            } else {
                guard.selection.select_many(&page_ids);
            }
            guard.all_selected = guard.selection.contains_all(&page_ids);
            guard.selection.ids()
        } else {
            return;
        };
        self.checkbox_slot.set(ids);
    }

    /// Toggle one row's selection.
    pub fn toggle_row_selection(&self, id: i64) {
        let ids = if let Ok(mut guard) = self.inner.write() {
            guard.selection.toggle(id);
            let page_ids: Vec<i64> = guard.page_rows.iter().map(GridRow::id).collect();
            guard.all_selected = guard.selection.contains_all(&page_ids);
            guard.selection.ids()
        } else {
            return;
        };
        self.checkbox_slot.set(ids);
    }

    /// Clear the selection entirely.
    pub fn clear_selection(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.selection.clear();
            guard.all_selected = false;
        }
        self.checkbox_slot.set(Vec::new());
    }

    // -------------------------------------------------------------------------
    // Sum row and edits
    // -------------------------------------------------------------------------

    /// The footer sum row for the current page.
    pub fn sum_row(&self, sum_columns: &[&str]) -> Vec<SumCell> {
        self.inner
            .read()
            .map(|g| super::sum::sum_row(&g.columns, sum_columns, &g.page_rows))
            .unwrap_or_default()
    }

    /// Bubble a cell-level inline edit to the host.
    pub fn emit_cell_edit(&self, field: impl Into<String>, value: Value) {
        let _ = self.events.send(GridEvent::CellEdited {
            field: field.into(),
            value,
        });
    }

    /// Replace a row on the current page after an inline edit.
    pub fn replace_row(&self, index: usize, field: impl Into<String>, row: T) {
        if let Ok(mut guard) = self.inner.write() {
            if index >= guard.page_rows.len() {
                return;
            }
            let id = row.id();
            if let Some(existing) = guard.data.iter_mut().find(|r| r.id() == id) {
                *existing = row.clone();
            }
            guard.page_rows[index] = row;
        }
        let _ = self.events.send(GridEvent::RowChanged {
            index,
            field: field.into(),
        });
    }

    /// Forward a submitted search form to the host.
    pub fn submit_search(&self, form: Vec<(String, String)>) {
        let _ = self.events.send(GridEvent::SearchSubmitted(form));
    }

    /// Arm or disarm the take/skip reset: when armed, the next remote
    /// fetch starts over at page 1 with the default page size.
    pub fn set_take_skip_reset(&self, reset: bool) {
        if let Ok(mut guard) = self.inner.write() {
            guard.take_skip_reset = reset;
        }
        let _ = self.events.send(GridEvent::TakeSkipReset(reset));
    }

    /// Replace the data set of a local grid. The selection is kept.
    pub fn set_rows(&self, rows: Vec<T>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.data = rows;
        }
        self.rematerialize();
    }

    // -------------------------------------------------------------------------
    // Materialization
    // -------------------------------------------------------------------------

    fn rematerialize(&self) {
        let remote = self
            .inner
            .read()
            .map(|g| matches!(g.mode, DataMode::Remote { .. }))
            .unwrap_or(false);
        if remote {
            if let Ok(mut guard) = self.inner.write() {
                Self::materialize_remote_inner(&mut guard);
            }
        } else {
            self.materialize_local();
        }
    }

    /// Filter, page and slice the client-side data set.
    fn materialize_local(&self) {
        if let Ok(mut guard) = self.inner.write() {
            let filtered: Vec<T> = guard
                .data
                .iter()
                .filter(|row| row_matches(&guard.columns, &guard.search_term, *row))
                .cloned()
                .collect();

            guard.page.total_records = filtered.len() as u64;
            let max_visible = guard.max_visible_pages;
            guard.page.recompute(max_visible);

            let skip = guard.page.skip() as usize;
            let take = guard.page.page_size as usize;
            guard.page_rows = filtered.into_iter().skip(skip).take(take).collect();

            let page_ids: Vec<i64> = guard.page_rows.iter().map(GridRow::id).collect();
            guard.all_selected = guard.selection.contains_all(&page_ids);
        }
    }

    /// Filter the fetched page in place. Remote pages are already
    /// windowed by the backend, so no slicing happens here.
    fn materialize_remote_inner(guard: &mut GridInner<T>) {
        let filtered: Vec<T> = guard
            .data
            .iter()
            .filter(|row| row_matches(&guard.columns, &guard.search_term, *row))
            .cloned()
            .collect();
        guard.page_rows = filtered;
        let page_ids: Vec<i64> = guard.page_rows.iter().map(GridRow::id).collect();
        guard.all_selected = guard.selection.contains_all(&page_ids);
    }

    // -------------------------------------------------------------------------
    // Remote fetching
    // -------------------------------------------------------------------------

    /// Arm the settle timer and fetch the current page once it fires.
    ///
    /// A monotonically increasing token fences each fetch; a response
    /// carrying a token older than the latest navigation is discarded.
    fn schedule_fetch(&self) {
        let token = self.fetch_token.fetch_add(1, Ordering::SeqCst) + 1;

        let (descriptor, fetcher, decode, take, skip) = {
            let Ok(mut guard) = self.inner.write() else {
                return;
            };
            if guard.take_skip_reset {
                guard.take_skip_reset = false;
                guard.page.page_size = guard.default_page_size;
                guard.page.current_page = 1;
                guard.page.total_records = 0;
                let max_visible = guard.max_visible_pages;
                guard.page.recompute(max_visible);
            }
            let (descriptor, fetcher, decode) = match &guard.mode {
                DataMode::Remote {
                    descriptor,
                    fetcher,
                    decode,
                } => (
                    descriptor.clone(),
                    Arc::clone(fetcher),
                    Arc::clone(decode),
                ),
                DataMode::Local => return,
            };
            guard.loading = true;
            (
                descriptor,
                fetcher,
                decode,
                guard.page.page_size,
                guard.page.skip(),
            )
        };

        let this = self.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(SETTLE_DELAY).await;
            let result = fetcher.fetch_page(&descriptor, take, skip).await;
            if this.fetch_token.load(Ordering::SeqCst) != token {
                debug!("discarding stale page fetch (take={take} skip={skip})");
                return;
            }
            match result {
                Ok(page) => this.apply_page(page, &decode),
                Err(err) => this.apply_fetch_error(&err),
            }
        });

        if let Ok(mut pending) = self.pending.lock() {
            if let Some(previous) = pending.replace(handle) {
                previous.abort();
            }
        }
    }

    fn apply_page(&self, page: PageResponse, decode: &Decode<T>) {
        let total_records = page.total_records();
        let rows: Vec<T> = page.into_rows().into_iter().map(|r| decode(r)).collect();

        if let Ok(mut guard) = self.inner.write() {
            guard.data = rows;
            guard.page.total_records = total_records;
            let max_visible = guard.max_visible_pages;
            guard.page.recompute(max_visible);
            Self::materialize_remote_inner(&mut guard);
            guard.loading = false;
        }
        let _ = self.events.send(GridEvent::Loaded { total_records });
    }

    fn apply_fetch_error(&self, err: &ApiError) {
        error!("page fetch failed: {err}");
        if let Ok(mut guard) = self.inner.write() {
            guard.loading = false;
        }
        if err.is_auth_rejection() {
            let _ = self.events.send(GridEvent::AuthRejected);
        }
    }
}

impl<T: GridRow> Clone for GridController<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            events: self.events.clone(),
            fetch_token: Arc::clone(&self.fetch_token),
            pending: Arc::clone(&self.pending),
            checkbox_slot: self.checkbox_slot.clone(),
        }
    }
}

/// Case-insensitive substring match over the visible columns.
fn row_matches<T: GridRow>(columns: &[Column], term: &str, row: &T) -> bool {
    if term.is_empty() {
        return true;
    }
    columns.iter().filter(|c| c.visible).any(|column| {
        let value = row.field(&column.key);
        !value.is_null() && value.to_string().to_lowercase().contains(term)
    })
}
