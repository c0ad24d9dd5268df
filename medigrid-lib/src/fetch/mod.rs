//! Page fetching: descriptors, response decoding and the HTTP fetcher.

mod client;
mod descriptor;
mod response;

pub use client::{HttpPageFetcher, PageFetcher};
pub use descriptor::{FetchDescriptor, FetchMode};
pub use response::PageResponse;
