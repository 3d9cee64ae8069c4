//! View model of the details modal.

use jsi_api_types::MovieDetails;

use crate::card::pick_image;

pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_SUMMARY: &str = "No summary available.";
const FALLBACK_TITLE: &str = "Movie details";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailField {
    pub label: &'static str,
    pub value: String,
}

/// Everything the modal renders, with fallbacks already substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsView {
    pub title: String,
    pub image_src: String,
    pub fields: Vec<DetailField>,
    pub summary: String,
}

impl DetailsView {
    pub fn from_details(movie: &MovieDetails) -> Self {
        let title = movie
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(FALLBACK_TITLE)
            .to_owned();

        let fields = vec![
            field("Genres", join(&movie.genres)),
            field("Release date", text(movie.date_published.as_deref())),
            field("Rating", text(movie.rated.as_deref())),
            field("IMDb score", movie.imdb_score.map(|s| format!("{s}/10"))),
            field("Director(s)", join(&movie.directors)),
            field("Actors", join(&movie.actors)),
            field(
                "Duration",
                movie.duration.filter(|d| *d > 0).map(|d| format!("{d} min")),
            ),
            field("Countries", join(&movie.countries)),
            field(
                "Box office",
                movie
                    .worldwide_gross_income
                    .or(movie.usa_gross_income)
                    .map(format_dollars),
            ),
        ];

        Self {
            title,
            image_src: pick_image(movie.image_url.as_deref(), movie.poster_url.as_deref()),
            fields,
            summary: summary_of(movie.long_description.as_deref(), movie.description.as_deref()),
        }
    }
}

fn field(label: &'static str, value: Option<String>) -> DetailField {
    DetailField {
        label,
        value: value.unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
    }
}

fn join(values: &[String]) -> Option<String> {
    (!values.is_empty()).then(|| values.join(", "))
}

fn text(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_owned)
}

/// Long description, else the short one, else a fixed sentence.
pub fn summary_of(long: Option<&str>, short: Option<&str>) -> String {
    text(long)
        .or_else(|| text(short))
        .unwrap_or_else(|| NO_SUMMARY.to_owned())
}

/// `28815291` -> `$28,815,291`.
pub fn format_dollars(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> MovieDetails {
        serde_json::from_str(json).expect("valid details fixture")
    }

    fn value<'a>(view: &'a DetailsView, label: &str) -> &'a str {
        view.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
            .unwrap_or_else(|| panic!("no field {label}"))
    }

    #[test]
    fn full_record_renders_every_field() {
        let view = DetailsView::from_details(&decode(
            r#"{
                "id": 1508669,
                "title": "Hopeless Romantic",
                "image_url": "https://img/hr.jpg",
                "genres": ["Comedy", "Romance"],
                "date_published": "2016-06-18",
                "rated": "Not rated or unkown rating",
                "imdb_score": "7.9",
                "directors": ["Nate Taylor"],
                "actors": ["Alex Ross", "Erin Bennett"],
                "duration": 97,
                "countries": ["USA"],
                "worldwide_gross_income": 28815291,
                "usa_gross_income": 1000,
                "description": "Short.",
                "long_description": "Long."
            }"#,
        ));

        assert_eq!(view.title, "Hopeless Romantic");
        assert_eq!(view.image_src, "https://img/hr.jpg");
        assert_eq!(value(&view, "Genres"), "Comedy, Romance");
        assert_eq!(value(&view, "IMDb score"), "7.9/10");
        assert_eq!(value(&view, "Actors"), "Alex Ross, Erin Bennett");
        assert_eq!(value(&view, "Duration"), "97 min");
        assert_eq!(value(&view, "Box office"), "$28,815,291");
        assert_eq!(view.summary, "Long.");
        assert_eq!(view.fields.len(), 9);
    }

    #[test]
    fn sparse_record_falls_back_everywhere() {
        let view = DetailsView::from_details(&decode(r#"{"id": 3, "duration": 0}"#));

        assert_eq!(view.title, "Movie details");
        assert!(view.fields.iter().all(|f| f.value == NOT_AVAILABLE));
        assert_eq!(view.summary, NO_SUMMARY);
    }

    #[test]
    fn box_office_falls_back_to_usa_gross() {
        let view = DetailsView::from_details(&decode(
            r#"{"id": 4, "usa_gross_income": 950, "description": "Only short."}"#,
        ));

        assert_eq!(value(&view, "Box office"), "$950");
        assert_eq!(view.summary, "Only short.");
    }

    #[test]
    fn dollars_are_grouped_by_thousands() {
        assert_eq!(format_dollars(0), "$0");
        assert_eq!(format_dollars(999), "$999");
        assert_eq!(format_dollars(1_000), "$1,000");
        assert_eq!(format_dollars(123_456_789), "$123,456,789");
    }
}
