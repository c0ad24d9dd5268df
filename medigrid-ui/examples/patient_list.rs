//! Patient list example - a remote grid over a simulated API
//!
//! Builds a paginated grid over an in-memory page fetcher, walks a few
//! pages, filters, selects rows and prints a footer sum, logging to
//! patient_list.log along the way.

use std::fs::File;
use std::sync::Arc;

use async_trait::async_trait;
use log::LevelFilter;
use medigrid_ui::prelude::*;
use simplelog::{Config, WriteLogger};
use tokio::sync::mpsc::UnboundedReceiver;

// =============================================================================
// Simulated API
// =============================================================================

const TOTAL_PATIENTS: i64 = 57;

struct DemoFetcher {
    rows: Vec<Record>,
}

impl DemoFetcher {
    fn new() -> Self {
        let rows = (1..=TOTAL_PATIENTS)
            .map(|id| {
                Record::new()
                    .set("id", id)
                    .set("name", format!("Patient {id:02}"))
                    .set("age", 20 + (id * 7) % 60)
                    .set("visits", (id * 3) % 11)
            })
            .collect();
        Self { rows }
    }
}

#[async_trait]
impl PageFetcher for DemoFetcher {
    async fn fetch_page(
        &self,
        _descriptor: &FetchDescriptor,
        take: u64,
        skip: u64,
    ) -> Result<PageResponse, ApiError> {
        // Simulate network delay
        tokio::time::sleep(tokio::time::Duration::from_millis(150)).await;

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

// =============================================================================
// Rendering helpers
// =============================================================================

fn render_strip(entries: &[PageEntry]) -> String {
    entries
        .iter()
        .map(|entry| match entry {
            PageEntry::Number(n) => n.to_string(),
            PageEntry::Ellipsis => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_page(grid: &GridController<Record>) {
    let state = grid.page_state();
    println!(
        "page {}/{} ({}-{} of {})  [{}]",
        state.current_page,
        state.total_pages,
        state.start_item,
        state.end_item,
        state.total_records,
        render_strip(&state.pages),
    );
    for row in grid.page_rows() {
        println!(
            "  #{:02}  {:12}  age {}  visits {}",
            GridRow::id(&row),
            row.field("name"),
            row.field("age"),
            row.field("visits"),
        );
    }
}

async fn wait_loaded(rx: &mut UnboundedReceiver<GridEvent>) {
    while let Some(event) = rx.recv().await {
        match event {
            GridEvent::Loaded { total_records } => {
                println!("loaded, {total_records} records total");
                return;
            }
            GridEvent::AuthRejected => {
                println!("not authorized, redirecting to /");
                return;
            }
            other => println!("event: {other:?}"),
        }
    }
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() {
    // Initialize file logging
    if let Ok(log_file) = File::create("patient_list.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file);
    }

    let columns = vec![
        Column::new("id", "Id").hidden(),
        Column::new("name", "Name"),
        Column::new("age", "Age").kind(ColumnKind::Number),
        Column::new("visits", "Visits").kind(ColumnKind::Number),
    ];

    let mediator: ActionMediator<Record> = ActionMediator::new();
    let tabs = TabTracker::new();
    tabs.wire(&mediator);

    let (grid, mut events) = GridController::<Record>::remote(
        columns,
        FetchDescriptor::get("Patient/GetAll"),
        Arc::new(DemoFetcher::new()),
    );
    let grid = grid
        .with_page_size(10)
        .with_checkbox_slot(mediator.checkbox_selected.clone());

    grid.reload();
    wait_loaded(&mut events).await;
    print_page(&grid);

    grid.go_to_page(4);
    wait_loaded(&mut events).await;
    print_page(&grid);

    // Select the whole page and fire a bulk delete intent.
    mediator
        .delete
        .subscribe(|ids| println!("delete requested for {ids:?}"))
        .detach();
    grid.toggle_select_all();
    mediator.delete_selected();

    // Debounced search over the fetched page.
    let (debouncer, mut search_rx) = SearchDebouncer::new();
    debouncer.input("pa");
    debouncer.input("patient 3");
    if let Some(SearchSignal::Query(term)) = search_rx.recv().await {
        grid.search(&term);
        println!("filtered by {term:?}:");
        print_page(&grid);
    }
    grid.search("");

    // Footer sums for the numeric columns.
    let sums = grid.sum_row(&["age", "visits"]);
    println!("sum row: {sums:?}");

    println!("tab after plist route: {:?}", {
        tabs.on_route_change("/orderPList");
        tabs.current()
    });
}
