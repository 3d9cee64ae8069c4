use async_trait::async_trait;
use jsi_api_types::{MovieSummary, Page};
use std::rc::Rc;

use crate::client::{ApiClient, HttpFetch, TitleQuery};
use crate::error::ApiError;

/// A paged list of movies, addressed by 1-based page number.
#[async_trait(?Send)]
pub trait PageSource {
    async fn fetch_page(&self, page: u32) -> Result<Page<MovieSummary>, ApiError>;

    /// Short human-readable name used in log lines.
    fn label(&self) -> String {
        "page source".to_owned()
    }
}

/// One `/titles/` listing served by an [`ApiClient`].
pub struct TitleListing<H> {
    client: Rc<ApiClient<H>>,
    query: TitleQuery,
}

impl<H> TitleListing<H> {
    pub fn new(client: Rc<ApiClient<H>>, query: TitleQuery) -> Self {
        Self { client, query }
    }

    pub fn query(&self) -> &TitleQuery {
        &self.query
    }
}

#[async_trait(?Send)]
impl<H: HttpFetch> PageSource for TitleListing<H> {
    async fn fetch_page(&self, page: u32) -> Result<Page<MovieSummary>, ApiError> {
        self.client.titles_page(&self.query, page).await
    }

    fn label(&self) -> String {
        self.query.to_string()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;

    pub fn movie(id: u64) -> MovieSummary {
        MovieSummary {
            id,
            title: Some(format!("Movie {id}")),
            image_url: None,
            poster_url: None,
            genres: Vec::new(),
            imdb_score: None,
            description: None,
        }
    }

    /// Serves ids `1..=total` in fixed-size pages.
    pub struct FakeSource {
        pages: Vec<Vec<u64>>,
        fail_at: Option<u32>,
        suspend: bool,
        pub requests: RefCell<Vec<u32>>,
    }

    impl FakeSource {
        pub fn paged(total: u64, per_page: usize) -> Self {
            let ids: Vec<u64> = (1..=total).collect();
            Self {
                pages: ids.chunks(per_page.max(1)).map(<[u64]>::to_vec).collect(),
                fail_at: None,
                suspend: false,
                requests: RefCell::new(Vec::new()),
            }
        }

        pub fn failing_at(mut self, page: u32) -> Self {
            self.fail_at = Some(page);
            self
        }

        /// Suspend once per request, so concurrent callers interleave.
        pub fn yielding(mut self) -> Self {
            self.suspend = true;
            self
        }

        pub fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    #[async_trait(?Send)]
    impl PageSource for FakeSource {
        async fn fetch_page(&self, page: u32) -> Result<Page<MovieSummary>, ApiError> {
            self.requests.borrow_mut().push(page);
            if self.suspend {
                tokio::task::yield_now().await;
            }
            if self.fail_at == Some(page) {
                return Err(ApiError::transport(
                    format!("fake://titles/?page={page}"),
                    "connection reset",
                ));
            }

            let index = page.saturating_sub(1) as usize;
            let results = self
                .pages
                .get(index)
                .map(|ids| ids.iter().copied().map(movie).collect())
                .unwrap_or_default();
            let next = (index + 1 < self.pages.len())
                .then(|| format!("fake://titles/?page={}", page + 1));
            Ok(Page {
                count: self.pages.iter().map(Vec::len).sum::<usize>() as u64,
                next,
                previous: None,
                results,
            })
        }
    }

    #[tokio::test]
    async fn title_listing_pages_through_the_client() -> anyhow::Result<()> {
        use crate::client::tests::{BASE, FakeHttp};

        let http = FakeHttp::default().route(
            "http://127.0.0.1:8000/api/v1/titles/?title_contains=heat&page=3",
            200,
            r#"{"count": 1, "next": null, "previous": null,
                "results": [{"id": 42, "title": "Heat", "imdb_score": "8.3"}]}"#,
        );
        let client = Rc::new(ApiClient::new(BASE, http)?);
        let listing = TitleListing::new(client, TitleQuery::Search("heat".into()));

        let page = listing.fetch_page(3).await?;

        assert_eq!(page.results[0].id, 42);
        assert_eq!(page.results[0].imdb_score, Some(8.3));
        assert!(!page.has_next());
        assert_eq!(listing.label(), "search \"heat\"");
        Ok(())
    }
}
