//! The paginated data grid: controller, columns, page arithmetic,
//! search debouncing, sum rows and per-row actions.

pub mod buttons;
pub mod controller;
pub mod events;
pub mod item;
pub mod pages;
pub mod search;
pub mod sum;

pub use buttons::{ActionButton, RowActions};
pub use controller::{GridController, SETTLE_DELAY};
pub use events::GridEvent;
pub use item::{Column, ColumnKind, GridRow};
pub use pages::{
    DEFAULT_MAX_VISIBLE_PAGES, DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZES, PageEntry, PageSizeOption,
    PageState, insert_page_size, page_window,
};
pub use search::{MIN_SEARCH_LEN, SEARCH_DEBOUNCE, SearchDebouncer, SearchSignal};
pub use sum::{SumCell, column_sum, sum_row};
