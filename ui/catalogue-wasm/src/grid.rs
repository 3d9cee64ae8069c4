use jsi_api_types::MovieSummary;
use jsi_catalogue::{CardGrid, Placeholder};
use tracing::warn;
use web_sys::Element;

use crate::cards::{self, CARD_ATTR};
use crate::dom;

/// [`CardGrid`] over a grid container element.
///
/// Only direct children marked as cards are counted and toggled, so
/// placeholders and the loading spinner never shift the visible range.
#[derive(Clone)]
pub struct DomGrid {
    container: Element,
}

impl DomGrid {
    pub fn new(container: Element) -> Self {
        Self { container }
    }

    fn cards(&self) -> Vec<Element> {
        dom::query_all_within(&self.container, &format!(":scope > [{CARD_ATTR}]"))
    }

    /// Replace the content with a spinner until the next `clear`.
    pub fn show_loading(&self) {
        self.clear();
        let spinner = || -> Result<Element, wasm_bindgen::JsValue> {
            let wrap = dom::element("div", "col-12 text-center", None)?;
            let spinner = dom::element("div", "spinner-border", None)?;
            spinner.set_attribute("role", "status")?;
            spinner.append_child(&dom::element("span", "visually-hidden", Some("Loading..."))?.into())?;
            wrap.append_child(&spinner)?;
            Ok(wrap)
        };
        if let Err(err) = spinner().and_then(|node| self.container.append_child(&node)) {
            warn!(error = ?err, "cannot render loading indicator");
        }
    }
}

impl CardGrid for DomGrid {
    fn card_count(&self) -> usize {
        self.cards().len()
    }

    fn apply_visibility(&self, visible: usize) {
        for (i, card) in self.cards().iter().enumerate() {
            dom::set_shown(card, i < visible);
        }
    }

    fn append_cards(&self, movies: &[MovieSummary]) {
        for movie in movies {
            let appended = cards::movie_card(movie).and_then(|card| self.container.append_child(&card));
            if let Err(err) = appended {
                warn!(id = movie.id, error = ?err, "card not rendered");
            }
        }
    }

    fn clear(&self) {
        self.container.set_text_content(None);
    }

    fn show_placeholder(&self, placeholder: Placeholder) {
        let class = match placeholder {
            Placeholder::Empty => "text-muted",
            Placeholder::Failed => "text-danger",
        };
        let node = dom::element("div", "col-12", None).and_then(|wrap| {
            wrap.set_attribute("data-placeholder", "")?;
            wrap.append_child(&dom::element("p", class, Some(placeholder.message()))?.into())?;
            Ok(wrap)
        });
        if let Err(err) = node.and_then(|wrap| self.container.append_child(&wrap)) {
            warn!(error = ?err, "cannot render placeholder");
        }
    }
}
