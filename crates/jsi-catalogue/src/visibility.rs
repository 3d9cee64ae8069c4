//! Show-more / show-less state machine for one grid of cards.
//!
//! Reveal is incremental: each "more" shows `step` further cards (fetching
//! them through the injected [`PageFeed`] once local cards run out) and each
//! "less" hides `step` cards, never going under the responsive default.
//!
//! All methods take `&self` so a controller can sit behind an `Rc` and be
//! driven by several event handlers; no borrow is held across an `.await`.

use std::cell::Cell;
use tracing::debug;

use crate::feed::PageFeed;
use crate::grid::CardGrid;
use crate::viewport::VisibilityPolicy;

/// Snapshot used to decide which buttons to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridState {
    pub visible: usize,
    pub total: usize,
    pub default_visible: usize,
    pub can_show_more: bool,
    pub can_show_less: bool,
}

pub struct VisibilityController<G> {
    grid: G,
    policy: VisibilityPolicy,
    default_visible: Cell<usize>,
    visible: Cell<usize>,
    feed: Option<PageFeed>,
    loading: Cell<bool>,
    retired: Cell<bool>,
}

struct LoadingGuard<'a>(&'a Cell<bool>);

impl<'a> LoadingGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl<G> VisibilityController<G> {
    pub fn grid(&self) -> &G {
        &self.grid
    }

    pub fn has_feed(&self) -> bool {
        self.feed.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    /// Mark this controller as superseded by a newer load of its section.
    pub fn retire(&self) {
        self.retired.set(true);
    }

    pub fn is_retired(&self) -> bool {
        self.retired.get()
    }
}

impl<G: CardGrid> VisibilityController<G> {
    pub fn new(grid: G, viewport_width: u32, policy: VisibilityPolicy, feed: Option<PageFeed>) -> Self {
        let default_visible = policy.default_visible(viewport_width);
        let visible = default_visible.min(grid.card_count());
        let controller = Self {
            grid,
            policy,
            default_visible: Cell::new(default_visible),
            visible: Cell::new(visible),
            feed,
            loading: Cell::new(false),
            retired: Cell::new(false),
        };
        controller.apply();
        controller
    }

    fn apply(&self) {
        self.grid.apply_visibility(self.visible.get());
    }

    fn floor(&self) -> usize {
        self.default_visible.get().min(self.grid.card_count())
    }

    /// Show more cards; returns how many became visible.
    ///
    /// Hidden local cards are revealed first. Only when every rendered
    /// card is visible does the feed get asked for a batch, whose cards
    /// are appended and shown. Returns 0 while another fetch is pending,
    /// once the feed is exhausted, or after [`retire`](Self::retire).
    pub async fn reveal_more(&self) -> usize {
        if self.retired.get() || self.loading.get() {
            return 0;
        }

        let total = self.grid.card_count();
        let visible = self.visible.get();
        if visible < total {
            let next = (visible + self.policy.step).min(total);
            self.visible.set(next);
            self.apply();
            return next - visible;
        }

        let Some(feed) = self.feed.as_ref().filter(|feed| feed.can_supply()) else {
            return 0;
        };

        let batch = {
            let _guard = LoadingGuard::enter(&self.loading);
            feed.take_batch(self.policy.step).await
        };
        if self.retired.get() {
            debug!(dropped = batch.len(), "controller retired while loading, batch discarded");
            return 0;
        }
        if batch.is_empty() {
            return 0;
        }

        let before = self.grid.card_count();
        self.grid.append_cards(&batch);
        let total = self.grid.card_count();
        let appended = total.saturating_sub(before);
        self.visible.set((self.visible.get() + appended).min(total));
        self.apply();
        appended
    }

    /// Hide up to one step of cards; returns how many were hidden.
    ///
    /// Refused (returns 0) while a batch is being fetched, since the batch
    /// is revealed on top of the count the fetch started from.
    pub fn reveal_less(&self) -> usize {
        if self.loading.get() {
            return 0;
        }
        let visible = self.visible.get();
        let next = visible
            .saturating_sub(self.policy.step)
            .max(self.floor())
            .min(visible);
        self.visible.set(next);
        self.apply();
        visible - next
    }

    pub fn state(&self) -> GridState {
        let total = self.grid.card_count();
        let visible = self.visible.get();
        let default_visible = self.default_visible.get();
        let remote = !self.retired.get() && self.feed.as_ref().is_some_and(PageFeed::can_supply);
        GridState {
            visible,
            total,
            default_visible,
            can_show_more: visible < total || remote,
            can_show_less: visible > default_visible && !self.loading.get(),
        }
    }

    /// Re-derive the default for a new viewport width.
    ///
    /// A grid at or under the new default snaps to it; anything above is
    /// left as the user arranged it.
    pub fn on_viewport_change(&self, viewport_width: u32) {
        let new_default = self.policy.default_visible(viewport_width);
        self.default_visible.set(new_default);

        if self.visible.get() <= new_default {
            self.visible.set(new_default.min(self.grid.card_count()));
        }
        self.apply();
    }
}
