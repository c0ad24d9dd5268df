//! Medigrid screen state
//!
//! State machinery behind the list screens: a paginated, sortable,
//! multi-selectable [`grid::GridController`] over local or remote data,
//! the [`mediator::ActionMediator`] channel hub between the grid and its
//! toolbar, and the [`tabs::TabTracker`] that follows route changes.
//!
//! Rendering is out of scope; hosts read the controller's state and
//! listen on its event channel.

pub mod grid;
pub mod mediator;
pub mod selection;
pub mod shared;
pub mod tabs;

/// Convenience re-exports for hosts.
pub mod prelude {
    pub use crate::grid::{
        Column, ColumnKind, GridController, GridEvent, GridRow, PageEntry, PageSizeOption,
        RowActions, SearchDebouncer, SearchSignal, SumCell,
    };
    pub use crate::mediator::{ActionMediator, Channel, Subscription};
    pub use crate::selection::Selection;
    pub use crate::shared::Shared;
    pub use crate::tabs::{Tab, TabTracker, redirect_route};
    pub use medigrid_lib::{
        ApiError, FetchDescriptor, FetchMode, HttpPageFetcher, PageFetcher, PageResponse, Record,
        Value,
    };
}
