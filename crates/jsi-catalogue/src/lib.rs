//! Target-independent core of the JustStreamIt catalogue front-end.
//!
//! Everything here is DOM-agnostic: the browser crate plugs a `fetch`-backed
//! [`HttpFetch`] and a DOM-backed [`CardGrid`] into these types.

pub mod card;
pub mod client;
pub mod config;
pub mod details;
pub mod error;
pub mod feed;
pub mod grid;
pub mod registry;
pub mod section;
pub mod source;
pub mod viewport;
pub mod visibility;

pub use client::{ApiClient, HttpFetch, HttpResponse, TitleQuery};
pub use config::CatalogueConfig;
pub use error::ApiError;
pub use feed::PageFeed;
pub use grid::{CardGrid, Placeholder};
pub use registry::{LoadTicket, RequestSequence, SectionRegistry};
pub use section::{Collected, SectionLoader};
pub use source::{PageSource, TitleListing};
pub use viewport::{ViewportTier, VisibilityPolicy};
pub use visibility::{GridState, VisibilityController};

/// Upper bound on page requests issued by any single pagination loop.
pub const MAX_PAGE_REQUESTS: u32 = 100;
