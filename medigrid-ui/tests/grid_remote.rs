//! Remote-mode grid controller behavior, with a paused clock.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use medigrid_ui::grid::{Column, GridController, GridEvent, PageEntry};
use medigrid_ui::prelude::{ApiError, FetchDescriptor, PageFetcher, PageResponse, Record};
use tokio::sync::mpsc::UnboundedReceiver;

struct MockFetcher {
    rows: Vec<Record>,
    calls: AtomicUsize,
    windows: Mutex<Vec<(u64, u64)>>,
    fail_with: Option<(u16, String)>,
}

impl MockFetcher {
    fn with_rows(count: i64) -> Self {
        let rows = (1..=count)
            .map(|id| {
                Record::new()
                    .set("id", id)
                    .set("name", format!("Row {id}"))
            })
            .collect();
        Self {
            rows,
            calls: AtomicUsize::new(0),
            windows: Mutex::new(Vec::new()),
            fail_with: None,
        }
    }

    fn failing(status: u16, message: &str) -> Self {
        Self {
            fail_with: Some((status, message.to_string())),
            ..Self::with_rows(0)
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch_page(
        &self,
        _descriptor: &FetchDescriptor,
        take: u64,
        skip: u64,
    ) -> Result<PageResponse, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.windows.lock().unwrap().push((take, skip));

        if let Some((status, message)) = &self.fail_with {
            return Err(ApiError::Http {
                status: *status,
                message: message.clone(),
            });
        }

        let rows: Vec<Record> = self
            .rows
            .iter()
            .skip(skip as usize)
            .take(take as usize)
            .cloned()
            .collect();
        Ok(PageResponse::new(rows, self.rows.len() as u64))
    }
}

fn remote_grid(
    fetcher: Arc<MockFetcher>,
) -> (GridController<Record>, UnboundedReceiver<GridEvent>) {
    let columns = vec![Column::new("id", "Id"), Column::new("name", "Name")];
    let (grid, events) =
        GridController::<Record>::remote(columns, FetchDescriptor::get("Row/GetAll"), fetcher);
    (grid.with_page_size(10), events)
}

#[tokio::test(start_paused = true)]
async fn reload_fetches_after_the_settle_delay() {
    let fetcher = Arc::new(MockFetcher::with_rows(35));
    let (grid, mut events) = remote_grid(Arc::clone(&fetcher));

    grid.reload();
    assert!(grid.is_loading());

    assert_eq!(
        events.recv().await,
        Some(GridEvent::Loaded { total_records: 35 })
    );
    assert!(!grid.is_loading());
    assert_eq!(fetcher.calls(), 1);
    assert_eq!(grid.page_rows().len(), 10);
    assert_eq!(grid.page_state().total_pages, 4);
}

#[tokio::test(start_paused = true)]
async fn rapid_navigation_collapses_to_one_fetch() {
    let fetcher = Arc::new(MockFetcher::with_rows(35));
    let (grid, mut events) = remote_grid(Arc::clone(&fetcher));

    grid.reload();
    events.recv().await;

    // Two clicks inside one settle window: only the last page loads.
    grid.go_to_page(2);
    grid.go_to_page(3);
    events.recv().await;

    assert_eq!(fetcher.calls(), 2);
    assert_eq!(
        fetcher.windows.lock().unwrap().last().copied(),
        Some((10, 20))
    );
    let first_id = grid.page_rows()[0].id();
    assert_eq!(first_id, Some(21));
}

#[tokio::test(start_paused = true)]
async fn auth_rejection_surfaces_as_an_event() {
    let fetcher = Arc::new(MockFetcher::failing(
        401,
        "You are not authorized! Please log in to access this resource.",
    ));
    let (grid, mut events) = remote_grid(fetcher);

    grid.reload();
    assert_eq!(events.recv().await, Some(GridEvent::AuthRejected));
    assert!(!grid.is_loading());
    assert!(grid.page_rows().is_empty());
}

#[tokio::test(start_paused = true)]
async fn other_failures_only_clear_the_loading_flag() {
    let fetcher = Arc::new(MockFetcher::failing(500, "boom"));
    let (grid, mut events) = remote_grid(Arc::clone(&fetcher));

    grid.reload();
    tokio::time::sleep(std::time::Duration::from_secs(2)).await;

    assert!(!grid.is_loading());
    assert_eq!(fetcher.calls(), 1);
    assert!(events.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn take_skip_reset_starts_over_at_the_default_size() {
    let fetcher = Arc::new(MockFetcher::with_rows(60));
    let (grid, mut events) = remote_grid(Arc::clone(&fetcher));

    grid.reload();
    events.recv().await;
    grid.go_to_page(4);
    events.recv().await;
    assert_eq!(
        fetcher.windows.lock().unwrap().last().copied(),
        Some((10, 30))
    );

    grid.set_take_skip_reset(true);
    assert_eq!(events.recv().await, Some(GridEvent::TakeSkipReset(true)));

    grid.reload();
    assert_eq!(
        events.recv().await,
        Some(GridEvent::Loaded { total_records: 60 })
    );
    assert_eq!(
        fetcher.windows.lock().unwrap().last().copied(),
        Some((10, 0))
    );
    assert_eq!(grid.page_state().current_page, 1);
}

#[tokio::test(start_paused = true)]
async fn remote_search_resets_the_page_state() {
    let fetcher = Arc::new(MockFetcher::with_rows(60));
    let (grid, mut events) = remote_grid(Arc::clone(&fetcher));

    grid.reload();
    events.recv().await;
    grid.go_to_page(4);
    events.recv().await;
    assert_eq!(grid.page_state().start_item, 31);

    grid.search("row 3");
    let state = grid.page_state();
    assert_eq!(state.current_page, 1);
    assert_eq!(state.start_item, 1);
    assert_eq!(state.pages.first(), Some(&PageEntry::Number(1)));
    // Filtering the fetched page schedules no extra fetch.
    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn remote_search_filters_the_fetched_page() {
    let fetcher = Arc::new(MockFetcher::with_rows(10));
    let (grid, mut events) = remote_grid(Arc::clone(&fetcher));

    grid.reload();
    events.recv().await;

    grid.search("row 1");
    // Row 1 and Row 10 from the fetched page; no extra fetch.
    assert_eq!(grid.page_rows().len(), 2);
    assert_eq!(fetcher.calls(), 1);

    grid.search("");
    assert_eq!(grid.page_rows().len(), 10);
}
