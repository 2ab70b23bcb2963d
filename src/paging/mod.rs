//! Lazy page-based entity iteration.
//!
//! Every "list" operation returns an `EntityIterator` built from a page
//! query capability. Pages are fetched one at a time, only when the consumer
//! asks for more; fetching a page is the only suspension point.

mod iterator;

pub use iterator::EntityIterator;

use std::future::Future;
use std::pin::Pin;

use crate::error_model::ApiError;

/// Boxed future of one fetched page.
pub type PageFuture<T> = Pin<Box<dyn Future<Output = Result<Page<T>, ApiError>> + Send>>;

/// Capability that fetches one page of entities. Consumed on use; the
/// fetched page carries the capability for the page after it.
pub type PageQuery<T> = Box<dyn FnOnce() -> PageFuture<T> + Send>;

/// One batch of entities plus the capability to fetch the next batch.
///
/// `next` is `None` iff this is the last page. `entities` is never mutated
/// after the page is built.
pub struct Page<T> {
    pub entities: Vec<T>,
    pub next: Option<PageQuery<T>>,
}
