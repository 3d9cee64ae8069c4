//! Runtime settings of the catalogue page.
//!
//! Defaults match a locally running OCMovies API. The host page may override
//! a few of them through `data-*` attributes on `<body>`; the browser crate
//! passes those in through [`CatalogueConfig::from_lookup`].

use crate::viewport::VisibilityPolicy;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000/api/v1";

/// Genres offered when the `/genres/` endpoint cannot be walked.
pub const FALLBACK_GENRES: &[&str] = &[
    "Action",
    "Adventure",
    "Animation",
    "Biography",
    "Comedy",
    "Crime",
    "Drama",
    "Family",
    "Fantasy",
    "History",
    "Horror",
    "Mystery",
    "Romance",
    "Sci-Fi",
    "Sport",
    "Thriller",
    "War",
    "Western",
];

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogueConfig {
    pub api_base: String,
    pub visibility: VisibilityPolicy,
    /// Cards rendered by the initial load of each section.
    pub section_size: usize,
    /// Fixed genres of the two category sections, in page order.
    pub category_genres: [String; 2],
    pub fallback_genres: Vec<String>,
    pub resize_debounce_ms: u32,
    /// `EnvFilter` directives, e.g. `info` or `jsi_catalogue=debug`.
    pub log_level: String,
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            visibility: VisibilityPolicy::default(),
            section_size: 12,
            category_genres: ["Mystery".to_owned(), "Drama".to_owned()],
            fallback_genres: FALLBACK_GENRES.iter().map(|g| (*g).to_owned()).collect(),
            resize_debounce_ms: 150,
            log_level: "info".to_owned(),
        }
    }
}

impl CatalogueConfig {
    /// Defaults overridden by whatever `lookup` knows about.
    ///
    /// Recognised keys are `api-base` and `log-level`; blank values are
    /// ignored. The log level is not validated here since logging is not
    /// up yet when the configuration is read.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };

        if let Some(base) = value("api-base") {
            config.api_base = base;
        }
        if let Some(level) = value("log-level") {
            config.log_level = level;
        }
        config
    }
}
