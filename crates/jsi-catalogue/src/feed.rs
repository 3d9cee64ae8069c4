use jsi_api_types::MovieSummary;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use tracing::{debug, warn};

use crate::MAX_PAGE_REQUESTS;
use crate::source::PageSource;

/// "Load more" capability handed to a controller by its section loader.
///
/// Holds the next page to request and the items a previous request
/// returned beyond what was rendered, so no item is ever skipped.
pub struct PageFeed {
    source: Rc<dyn PageSource>,
    next_page: Cell<u32>,
    has_more: Cell<bool>,
    backlog: RefCell<VecDeque<MovieSummary>>,
}

impl PageFeed {
    pub fn new(
        source: Rc<dyn PageSource>,
        next_page: u32,
        has_more: bool,
        backlog: Vec<MovieSummary>,
    ) -> Self {
        Self {
            source,
            next_page: Cell::new(next_page.max(1)),
            has_more: Cell::new(has_more),
            backlog: RefCell::new(backlog.into()),
        }
    }

    pub fn next_page(&self) -> u32 {
        self.next_page.get()
    }

    /// Whether the remote listing is believed to have further pages.
    pub fn has_more(&self) -> bool {
        self.has_more.get()
    }

    pub fn backlog_len(&self) -> usize {
        self.backlog.borrow().len()
    }

    pub fn can_supply(&self) -> bool {
        self.has_more.get() || !self.backlog.borrow().is_empty()
    }

    /// Produce up to `count` items, draining the backlog before paging.
    ///
    /// Pages are requested one after another. An empty page, a missing
    /// `next` link or a failed request marks the feed exhausted; a failure
    /// is logged and whatever was gathered so far is still returned.
    pub async fn take_batch(&self, count: usize) -> Vec<MovieSummary> {
        let mut batch: Vec<MovieSummary> = {
            let mut backlog = self.backlog.borrow_mut();
            let take = count.min(backlog.len());
            backlog.drain(..take).collect()
        };

        let mut requests = 0;
        while batch.len() < count && self.has_more.get() && requests < MAX_PAGE_REQUESTS {
            requests += 1;
            let page = self.next_page.get();
            match self.source.fetch_page(page).await {
                Ok(data) if data.results.is_empty() => {
                    self.has_more.set(false);
                }
                Ok(data) => {
                    self.has_more.set(data.has_next());
                    self.next_page.set(page + 1);
                    batch.extend(data.results);
                }
                Err(err) => {
                    warn!(source = %self.source.label(), page, error = %err, "loading more items failed");
                    self.has_more.set(false);
                }
            }
        }

        if batch.len() > count {
            let overflow = batch.split_off(count);
            self.backlog.borrow_mut().extend(overflow);
        }

        debug!(
            source = %self.source.label(),
            taken = batch.len(),
            backlog = self.backlog_len(),
            has_more = self.has_more.get(),
            "feed batch"
        );
        batch
    }
}
