//! Medigrid data client
//!
//! Async fetch layer backing the paginated list screens: fetch
//! descriptors shape `take`/`skip` page requests as either query-string
//! GETs or JSON-body POSTs, responses decode into dynamic [`model::Record`]s,
//! and [`fetch::PageFetcher`] is the seam the grid controller fetches
//! through.

pub mod error;
pub mod fetch;
pub mod model;

pub use error::ApiError;
pub use fetch::{FetchDescriptor, FetchMode, HttpPageFetcher, PageFetcher, PageResponse};
pub use model::{Record, Value};
