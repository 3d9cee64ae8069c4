use jsi_api_types::MovieSummary;

/// Inline grey "Image unavailable" poster used when a movie has no artwork
/// or its artwork fails to load.
pub const PLACEHOLDER_POSTER: &str = "data:image/svg+xml;base64,PHN2ZyB4bWxucz0iaHR0cDovL3d3dy53My5vcmcvMjAwMC9zdmciIHdpZHRoPSIzMDAiIGhlaWdodD0iNDUwIj48cmVjdCBmaWxsPSIjZGRkIiB3aWR0aD0iMzAwIiBoZWlnaHQ9IjQ1MCIvPjx0ZXh0IGZpbGw9IiM5OTkiIGZvbnQtZmFtaWx5PSJzYW5zLXNlcmlmIiBmb250LXNpemU9IjE4IiB4PSI1MCUiIHk9IjUwJSIgZHk9Ii4zZW0iIHRleHQtYW5jaG9yPSJtaWRkbGUiPkltYWdlIHVuYXZhaWxhYmxlPC90ZXh0Pjwvc3ZnPg==";

pub const UNTITLED: &str = "Untitled movie";

/// What a single grid card displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardModel {
    pub id: u64,
    pub title: String,
    pub image_src: String,
}

impl CardModel {
    pub fn from_summary(movie: &MovieSummary) -> Self {
        Self {
            id: movie.id,
            title: display_title(movie.title.as_deref()),
            image_src: pick_image(movie.image_url.as_deref(), movie.poster_url.as_deref()),
        }
    }

    pub fn alt_text(&self) -> String {
        format!("Poster of {}", self.title)
    }
}

pub fn display_title(title: Option<&str>) -> String {
    match title.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_owned(),
        _ => UNTITLED.to_owned(),
    }
}

/// First non-blank of `image_url` and `poster_url`, else the placeholder.
pub fn pick_image(image_url: Option<&str>, poster_url: Option<&str>) -> String {
    [image_url, poster_url]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|url| !url.is_empty())
        .unwrap_or(PLACEHOLDER_POSTER)
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(title: Option<&str>, image: Option<&str>, poster: Option<&str>) -> MovieSummary {
        MovieSummary {
            id: 7,
            title: title.map(str::to_owned),
            image_url: image.map(str::to_owned),
            poster_url: poster.map(str::to_owned),
            genres: Vec::new(),
            imdb_score: None,
            description: None,
        }
    }

    #[test]
    fn image_url_wins_over_poster() {
        let card = CardModel::from_summary(&summary(
            Some("Heat"),
            Some("https://img/heat.jpg"),
            Some("https://img/heat-poster.jpg"),
        ));

        assert_eq!(card.id, 7);
        assert_eq!(card.title, "Heat");
        assert_eq!(card.image_src, "https://img/heat.jpg");
        assert_eq!(card.alt_text(), "Poster of Heat");
    }

    #[test]
    fn blank_image_falls_through_to_poster_then_placeholder() {
        assert_eq!(
            pick_image(Some("  "), Some("https://img/p.jpg")),
            "https://img/p.jpg"
        );
        assert_eq!(pick_image(None, Some("")), PLACEHOLDER_POSTER);
        assert!(PLACEHOLDER_POSTER.starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn missing_title_gets_generic_label() {
        let card = CardModel::from_summary(&summary(Some("   "), None, None));

        assert_eq!(card.title, UNTITLED);
        assert_eq!(card.image_src, PLACEHOLDER_POSTER);
    }
}
