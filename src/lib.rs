//! Helpers to consume a paginated REST API modeled on GitHub's.
//!
//! The [`RestExecutor`] runs one authenticated request, waiting out
//! `202 Accepted` answers, and decodes the JSON body into a caller target.
//! The [`Paginator`] drives it over the pages of an index endpoint, either
//! serially until an empty page or concurrently over a known number of pages.
//! The [`PreflightLister`] learns the page count from a summary endpoint first.

mod infrastructure;
mod interface;
mod model;

pub use infrastructure::*;
pub use interface::*;
pub use model::*;
