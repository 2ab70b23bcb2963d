//! Single-owner cursor over consecutive pages.

use std::collections::VecDeque;

use crate::error_model::ApiError;

use super::{Page, PageQuery};

/// Forward-only cursor over a paged entity collection.
///
/// Exposes two views over the same position: entity-at-a-time
/// (`next_entity`) and page-at-a-time (`next_page`). Advancing either view
/// advances the shared cursor. The sequence is not restartable; build a new
/// iterator from a fresh query to start over.
pub struct EntityIterator<T> {
    state: CursorState<T>,
}

enum CursorState<T> {
    /// The next page has not been requested yet.
    Pending(PageQuery<T>),
    /// Entities of the current page not yet yielded, plus the query for the
    /// page after it (if any).
    Buffered {
        entities: VecDeque<T>,
        next: Option<PageQuery<T>>,
    },
    /// The last page has been fully yielded (or a page fetch failed).
    Finished,
}

impl<T> EntityIterator<T> {
    /// Builds an iterator from the query for the first page.
    pub fn new(first_page: PageQuery<T>) -> Self {
        Self {
            state: CursorState::Pending(first_page),
        }
    }

    /// Yields the next entity, fetching a new page when the current one is
    /// exhausted. Returns `None` once the last page has been consumed.
    ///
    /// Entities come out in the order their pages were fetched, then in
    /// within-page order.
    pub async fn next_entity(&mut self) -> Result<Option<T>, ApiError> {
        loop {
            match std::mem::replace(&mut self.state, CursorState::Finished) {
                CursorState::Finished => return Ok(None),
                CursorState::Pending(query) => {
                    let page = query().await?;
                    self.state = CursorState::Buffered {
                        entities: page.entities.into(),
                        next: page.next,
                    };
                }
                CursorState::Buffered { mut entities, next } => {
                    if let Some(entity) = entities.pop_front() {
                        self.state = CursorState::Buffered { entities, next };
                        return Ok(Some(entity));
                    }
                    self.state = match next {
                        Some(query) => CursorState::Pending(query),
                        None => CursorState::Finished,
                    };
                }
            }
        }
    }

    /// Yields the rest of the current page, or the whole next page when the
    /// current one is exhausted. Returns `None` once past the last page.
    ///
    /// Backed by the same cursor as `next_entity`; entities already taken
    /// one at a time are not repeated here.
    pub async fn next_page(&mut self) -> Result<Option<Vec<T>>, ApiError> {
        loop {
            match std::mem::replace(&mut self.state, CursorState::Finished) {
                CursorState::Finished => return Ok(None),
                CursorState::Pending(query) => {
                    let page = query().await?;
                    self.state = match page.next {
                        Some(next) => CursorState::Pending(next),
                        None => CursorState::Finished,
                    };
                    return Ok(Some(page.entities));
                }
                CursorState::Buffered { entities, next } => {
                    self.state = match next {
                        Some(query) => CursorState::Pending(query),
                        None => CursorState::Finished,
                    };
                    if !entities.is_empty() {
                        return Ok(Some(entities.into()));
                    }
                    // Exactly-exhausted page: advance to the next fetch
                    // instead of yielding an empty remainder.
                }
            }
        }
    }

    /// Drains all remaining entities into a vector.
    pub async fn collect_all(mut self) -> Result<Vec<T>, ApiError> {
        let mut all = Vec::new();
        while let Some(entity) = self.next_entity().await? {
            all.push(entity);
        }
        Ok(all)
    }
}
