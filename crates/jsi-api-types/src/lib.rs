use serde::{Deserialize, Deserializer, Serialize};

/// Paginated envelope returned by every list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default = "Vec::new", deserialize_with = "null_as_empty")]
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.next.as_deref().is_some_and(|n| !n.trim().is_empty())
    }
}

/// Entry of a `/titles/` listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub genres: Vec<String>,
    #[serde(default, deserialize_with = "lenient_score")]
    pub imdb_score: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Full record from `/titles/<id>`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub genres: Vec<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub date_published: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub rated: Option<String>,
    #[serde(default, deserialize_with = "lenient_score")]
    pub imdb_score: Option<f64>,
    #[serde(default, deserialize_with = "string_list")]
    pub directors: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub actors: Vec<String>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default, deserialize_with = "string_list")]
    pub countries: Vec<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub worldwide_gross_income: Option<u64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub usa_gross_income: Option<u64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub long_description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScalarRepr {
    Number(f64),
    Text(String),
}

// The API serialises scores as decimal strings ("9.6").
fn lenient_score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<ScalarRepr>::deserialize(deserializer)? {
        Some(ScalarRepr::Number(n)) if n.is_finite() => Some(n),
        Some(ScalarRepr::Text(s)) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    })
}

// Dollar amounts, as integers, floats or text such as "$1,234".
fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = match Option::<ScalarRepr>::deserialize(deserializer)? {
        Some(ScalarRepr::Number(n)) => Some(n),
        Some(ScalarRepr::Text(s)) => {
            let digits: String = s
                .chars()
                .filter(|c| !matches!(c, '$' | ',' | ' '))
                .collect();
            digits.parse::<f64>().ok()
        }
        None => None,
    };
    Ok(amount
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n.round() as u64))
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<ScalarRepr>::deserialize(deserializer)? {
        Some(ScalarRepr::Number(n)) => Some(n.to_string()),
        Some(ScalarRepr::Text(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListRepr {
    Many(Vec<String>),
    One(String),
}

fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<ListRepr>::deserialize(deserializer)? {
        Some(ListRepr::Many(items)) => items
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .collect(),
        Some(ListRepr::One(s)) if !s.trim().is_empty() => vec![s],
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_accepts_string_score_and_missing_fields() {
        let raw = r#"{"id": 42, "title": "Heat", "imdb_score": "8.3", "image_url": null}"#;
        let movie: MovieSummary = serde_json::from_str(raw).unwrap();

        assert_eq!(movie.id, 42);
        assert_eq!(movie.imdb_score, Some(8.3));
        assert_eq!(movie.image_url, None);
        assert!(movie.genres.is_empty());
    }

    #[test]
    fn details_tolerates_scalar_lists_and_numeric_text() {
        let raw = r#"{
            "id": 7,
            "genres": "Drama",
            "directors": ["Michael Mann", ""],
            "rated": 12,
            "imdb_score": 7.5,
            "duration": 170
        }"#;
        let details: MovieDetails = serde_json::from_str(raw).unwrap();

        assert_eq!(details.genres, vec!["Drama".to_string()]);
        assert_eq!(details.directors, vec!["Michael Mann".to_string()]);
        assert_eq!(details.rated.as_deref(), Some("12"));
        assert_eq!(details.imdb_score, Some(7.5));
        assert_eq!(details.duration, Some(170));
        assert!(details.countries.is_empty());
    }

    #[test]
    fn gross_income_accepts_text_and_floats() {
        let raw = r#"{"id": 3, "worldwide_gross_income": "$1,234,567", "usa_gross_income": 98765.0}"#;
        let details: MovieDetails = serde_json::from_str(raw).unwrap();

        assert_eq!(details.worldwide_gross_income, Some(1_234_567));
        assert_eq!(details.usa_gross_income, Some(98_765));

        let raw = r#"{"id": 4, "worldwide_gross_income": "unknown", "usa_gross_income": null}"#;
        let details: MovieDetails = serde_json::from_str(raw).unwrap();

        assert_eq!(details.worldwide_gross_income, None);
        assert_eq!(details.usa_gross_income, None);
    }

    #[test]
    fn null_results_decode_as_empty_page() {
        let raw = r#"{"count": 0, "next": null, "previous": null, "results": null}"#;
        let page: Page<MovieSummary> = serde_json::from_str(raw).unwrap();

        assert!(page.results.is_empty());
        assert!(!page.has_next());
    }

    #[test]
    fn page_without_next_link_has_no_next() {
        let raw = r#"{"count": 1, "next": null, "previous": null, "results": [{"id": 1, "name": "Drama"}]}"#;
        let page: Page<Genre> = serde_json::from_str(raw).unwrap();

        assert!(!page.has_next());
        assert_eq!(page.results[0].name, "Drama");
    }
}
