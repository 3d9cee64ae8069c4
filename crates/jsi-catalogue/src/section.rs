//! Initial population of a page section.
//!
//! Loading is split in two: [`SectionLoader::collect`] does the network
//! work, [`Collected::install`] renders into the grid and builds the
//! controller. Callers holding a stale load ticket drop the `Collected`
//! value instead of installing it, so superseded responses never reach the
//! DOM.

use jsi_api_types::MovieSummary;
use std::rc::Rc;
use tracing::{debug, warn};

use crate::MAX_PAGE_REQUESTS;
use crate::feed::PageFeed;
use crate::grid::{CardGrid, Placeholder};
use crate::source::PageSource;
use crate::viewport::VisibilityPolicy;
use crate::visibility::VisibilityController;

pub struct SectionLoader {
    source: Rc<dyn PageSource>,
    target: usize,
    skip: usize,
}

impl SectionLoader {
    pub fn new(source: Rc<dyn PageSource>, target: usize) -> Self {
        Self {
            source,
            target,
            skip: 0,
        }
    }

    /// Drop the first `skip` items of the listing (already shown elsewhere).
    pub fn skip_leading(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }

    /// Request pages in order until enough items are gathered or the
    /// listing runs out. A failing page ends the loop but keeps what was
    /// already collected.
    pub async fn collect(&self) -> Collected {
        let wanted = self.skip + self.target;
        let mut items: Vec<MovieSummary> = Vec::new();
        let mut page = 1;
        let mut has_more = false;
        let mut failed = false;
        let mut requests = 0;

        while items.len() < wanted && requests < MAX_PAGE_REQUESTS {
            requests += 1;
            match self.source.fetch_page(page).await {
                Ok(data) if data.results.is_empty() => {
                    has_more = false;
                    break;
                }
                Ok(data) => {
                    has_more = data.has_next();
                    items.extend(data.results);
                    page += 1;
                    if !has_more {
                        break;
                    }
                }
                Err(err) => {
                    warn!(source = %self.source.label(), page, error = %err, "page unavailable, keeping partial results");
                    failed = items.is_empty();
                    break;
                }
            }
        }

        let mut rest = items.into_iter().skip(self.skip);
        let shown: Vec<MovieSummary> = rest.by_ref().take(self.target).collect();
        let backlog: Vec<MovieSummary> = rest.collect();

        debug!(
            source = %self.source.label(),
            shown = shown.len(),
            backlog = backlog.len(),
            next_page = page,
            has_more,
            "section collected"
        );

        Collected {
            source: Rc::clone(&self.source),
            items: shown,
            backlog,
            next_page: page,
            has_more: has_more && !failed,
            failed,
        }
    }
}

/// Result of [`SectionLoader::collect`], not yet rendered.
pub struct Collected {
    source: Rc<dyn PageSource>,
    items: Vec<MovieSummary>,
    backlog: Vec<MovieSummary>,
    next_page: u32,
    has_more: bool,
    failed: bool,
}

impl Collected {
    pub fn items(&self) -> &[MovieSummary] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True when not a single page could be fetched.
    pub fn failed(&self) -> bool {
        self.failed
    }

    /// Replace the grid's content and hand it to a fresh controller.
    ///
    /// With nothing to show, the grid gets exactly one placeholder and the
    /// controller has no feed, so both reveal operations are no-ops.
    pub fn install<G: CardGrid>(
        self,
        grid: G,
        viewport_width: u32,
        policy: VisibilityPolicy,
    ) -> VisibilityController<G> {
        grid.clear();
        if self.items.is_empty() {
            let placeholder = if self.failed {
                Placeholder::Failed
            } else {
                Placeholder::Empty
            };
            grid.show_placeholder(placeholder);
            return VisibilityController::new(grid, viewport_width, policy, None);
        }

        grid.append_cards(&self.items);
        let feed = PageFeed::new(self.source, self.next_page, self.has_more, self.backlog);
        VisibilityController::new(grid, viewport_width, policy, Some(feed))
    }
}
