//! HTTP client for the OCMovies REST API.
//!
//! The transport is abstracted behind [`HttpFetch`] so the same client runs
//! on `fetch` in the browser and on fakes in tests.

use async_trait::async_trait;
use jsi_api_types::{Genre, MovieDetails, MovieSummary, Page};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use tracing::debug;
use url::Url;

use crate::MAX_PAGE_REQUESTS;
use crate::error::ApiError;

const SORT_BY_SCORE: &str = "-imdb_score";

/// Raw response handed back by a transport.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

#[async_trait(?Send)]
pub trait HttpFetch {
    async fn get(&self, url: &str) -> Result<HttpResponse, ApiError>;
}

/// Which `/titles/` listing to page through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleQuery {
    TopRated,
    Genre(String),
    Search(String),
}

impl TitleQuery {
    fn pairs(&self) -> Vec<(&'static str, &str)> {
        match self {
            Self::TopRated => vec![("sort_by", SORT_BY_SCORE)],
            Self::Genre(genre) => vec![("genre", genre.as_str()), ("sort_by", SORT_BY_SCORE)],
            Self::Search(text) => vec![("title_contains", text.as_str())],
        }
    }
}

impl std::fmt::Display for TitleQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TopRated => write!(f, "top rated"),
            Self::Genre(genre) => write!(f, "genre {genre}"),
            Self::Search(text) => write!(f, "search \"{text}\""),
        }
    }
}

pub struct ApiClient<H> {
    base: Url,
    http: H,
}

impl<H: HttpFetch> ApiClient<H> {
    pub fn new(base: &str, http: H) -> Result<Self, ApiError> {
        let mut normalized = base.trim().trim_end_matches('/').to_owned();
        normalized.push('/');
        let base = Url::parse(&normalized).map_err(|source| ApiError::InvalidUrl {
            url: normalized.clone(),
            source,
        })?;
        Ok(Self { base, http })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, ApiError> {
        let mut url = self
            .base
            .join(path)
            .map_err(|source| ApiError::InvalidUrl {
                url: format!("{}{}", self.base, path),
                source,
            })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// GET `url` and decode the body, failing on any status >= 400.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, ApiError> {
        debug!(%url, "GET");
        let response = self.http.get(url.as_str()).await?;
        if response.status >= 400 {
            return Err(ApiError::Status {
                status: response.status,
                url: url.to_string(),
            });
        }
        serde_json::from_str(&response.body).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }

    pub async fn titles_page(
        &self,
        query: &TitleQuery,
        page: u32,
    ) -> Result<Page<MovieSummary>, ApiError> {
        let page = page.to_string();
        let mut pairs = query.pairs();
        pairs.push(("page", page.as_str()));
        let url = self.endpoint("titles/", &pairs)?;
        self.get_json(&url).await
    }

    pub async fn title_details(&self, id: u64) -> Result<MovieDetails, ApiError> {
        let url = self.endpoint(&format!("titles/{id}"), &[])?;
        self.get_json(&url).await
    }

    pub async fn genres_page(&self, page: u32) -> Result<Page<Genre>, ApiError> {
        let page = page.to_string();
        let url = self.endpoint("genres/", &[("page", page.as_str())])?;
        self.get_json(&url).await
    }

    /// Walk every genre page and return the distinct names, sorted A-Z.
    ///
    /// Names are compared case-insensitively; the first spelling seen wins.
    /// Any failing page aborts the walk so callers can fall back to a
    /// static list.
    pub async fn fetch_all_genres(&self) -> Result<Vec<String>, ApiError> {
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        let mut page = 1;

        for _ in 0..MAX_PAGE_REQUESTS {
            let data = self.genres_page(page).await?;
            for genre in &data.results {
                let name = genre.name.trim();
                if !name.is_empty() && seen.insert(name.to_lowercase()) {
                    names.push(name.to_owned());
                }
            }

            if !data.has_next() {
                break;
            }
            page = data
                .next
                .as_deref()
                .and_then(|link| next_page_from_link(&self.base, link))
                .unwrap_or(page + 1);
        }

        names.sort_by(|a, b| {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b))
        });
        Ok(names)
    }
}

/// Page number carried by a `next` link, resolved against `base`.
pub fn next_page_from_link(base: &Url, link: &str) -> Option<u32> {
    let url = base.join(link).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse().ok())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    pub const BASE: &str = "http://127.0.0.1:8000/api/v1";

    /// Canned responses keyed by full URL; unknown URLs answer 404.
    #[derive(Default)]
    pub struct FakeHttp {
        routes: HashMap<String, (u16, String)>,
        pub calls: RefCell<Vec<String>>,
    }

    impl FakeHttp {
        pub fn route(mut self, url: &str, status: u16, body: &str) -> Self {
            self.routes.insert(url.to_owned(), (status, body.to_owned()));
            self
        }
    }

    #[async_trait(?Send)]
    impl HttpFetch for FakeHttp {
        async fn get(&self, url: &str) -> Result<HttpResponse, ApiError> {
            self.calls.borrow_mut().push(url.to_owned());
            match self.routes.get(url) {
                Some((status, body)) => Ok(HttpResponse {
                    status: *status,
                    body: body.clone(),
                }),
                None => Ok(HttpResponse {
                    status: 404,
                    body: r#"{"detail": "Not found."}"#.to_owned(),
                }),
            }
        }
    }

    fn genre_page(names: &[&str], next: Option<&str>) -> String {
        let results: Vec<_> = names
            .iter()
            .enumerate()
            .map(|(i, name)| serde_json::json!({ "id": i + 1, "name": name }))
            .collect();
        serde_json::json!({
            "count": 0,
            "next": next,
            "previous": null,
            "results": results,
        })
        .to_string()
    }

    #[tokio::test]
    async fn genre_listing_url_is_encoded() -> anyhow::Result<()> {
        let http = FakeHttp::default().route(
            "http://127.0.0.1:8000/api/v1/titles/?genre=Film+Noir&sort_by=-imdb_score&page=2",
            200,
            r#"{"count": 0, "next": null, "previous": null, "results": []}"#,
        );
        let client = ApiClient::new("http://127.0.0.1:8000/api/v1/", http)?;

        let page = client
            .titles_page(&TitleQuery::Genre("Film Noir".into()), 2)
            .await?;

        assert!(page.results.is_empty());
        assert_eq!(client.http.calls.borrow().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn error_status_is_reported_with_url() -> anyhow::Result<()> {
        let client = ApiClient::new(BASE, FakeHttp::default())?;

        let err = client.title_details(99).await.unwrap_err();

        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("/api/v1/titles/99"));
        Ok(())
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() -> anyhow::Result<()> {
        let http = FakeHttp::default().route(
            "http://127.0.0.1:8000/api/v1/titles/5",
            200,
            "<html>oops</html>",
        );
        let client = ApiClient::new(BASE, http)?;

        let err = client.title_details(5).await.unwrap_err();

        assert!(matches!(err, ApiError::Decode { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn all_genres_are_merged_deduplicated_and_sorted() -> anyhow::Result<()> {
        let http = FakeHttp::default()
            .route(
                "http://127.0.0.1:8000/api/v1/genres/?page=1",
                200,
                &genre_page(
                    &["Western", "Drama", "Action"],
                    Some("http://127.0.0.1:8000/api/v1/genres/?page=2"),
                ),
            )
            .route(
                "http://127.0.0.1:8000/api/v1/genres/?page=2",
                200,
                &genre_page(&["comedy", " ", "Biography"], Some("/api/v1/genres/?page=3")),
            )
            .route(
                "http://127.0.0.1:8000/api/v1/genres/?page=3",
                200,
                &genre_page(&["drama", "Adventure"], None),
            );
        let client = ApiClient::new(BASE, http)?;

        let genres = client.fetch_all_genres().await?;

        assert_eq!(
            genres,
            vec!["Action", "Adventure", "Biography", "comedy", "Drama", "Western"]
        );
        assert_eq!(client.http.calls.borrow().len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn next_link_without_page_falls_back_to_increment() -> anyhow::Result<()> {
        let http = FakeHttp::default()
            .route(
                "http://127.0.0.1:8000/api/v1/genres/?page=1",
                200,
                &genre_page(&["Horror"], Some("http://127.0.0.1:8000/api/v1/genres/?cursor=abc")),
            )
            .route(
                "http://127.0.0.1:8000/api/v1/genres/?page=2",
                200,
                &genre_page(&["Crime"], None),
            );
        let client = ApiClient::new(BASE, http)?;

        let genres = client.fetch_all_genres().await?;

        assert_eq!(genres, vec!["Crime", "Horror"]);
        Ok(())
    }

    #[tokio::test]
    async fn genre_walk_stops_at_request_cap() -> anyhow::Result<()> {
        // A misbehaving server whose next link always points back to page 1.
        let http = FakeHttp::default().route(
            "http://127.0.0.1:8000/api/v1/genres/?page=1",
            200,
            &genre_page(&["Loop"], Some("http://127.0.0.1:8000/api/v1/genres/?page=1")),
        );
        let client = ApiClient::new(BASE, http)?;

        let genres = client.fetch_all_genres().await?;

        assert_eq!(genres, vec!["Loop"]);
        assert_eq!(client.http.calls.borrow().len(), MAX_PAGE_REQUESTS as usize);
        Ok(())
    }

    #[tokio::test]
    async fn failing_genre_page_propagates() -> anyhow::Result<()> {
        let http = FakeHttp::default().route(
            "http://127.0.0.1:8000/api/v1/genres/?page=1",
            200,
            &genre_page(&["Drama"], Some("http://127.0.0.1:8000/api/v1/genres/?page=2")),
        );
        let client = ApiClient::new(BASE, http)?;

        let err = client.fetch_all_genres().await.unwrap_err();

        assert_eq!(err.status(), Some(404));
        Ok(())
    }
}
