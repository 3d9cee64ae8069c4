//! Card markup.
//!
//! Nodes are built with `createElement` and `textContent` so API strings are
//! never parsed as HTML. Every clickable part carries `data-open-details`
//! and `data-movie-id`; one delegated listener opens the modal.

use jsi_api_types::MovieSummary;
use jsi_catalogue::card::{CardModel, PLACEHOLDER_POSTER};
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom;

/// Marks the top-level node of a card inside a grid.
pub const CARD_ATTR: &str = "data-card";
const FALLBACK_ATTR: &str = "data-fallback-src";

pub fn movie_card(movie: &MovieSummary) -> Result<Element, JsValue> {
    let card = CardModel::from_summary(movie);
    let id = card.id.to_string();

    let col = dom::element("div", "col-6 col-md-3 col-lg-2", None)?;
    col.set_attribute(CARD_ATTR, &id)?;

    let inner = dom::element("div", "card h-100", None)?;
    mark_opens_details(&inner, &id)?;
    inner.append_child(&poster(&card.image_src, &card.alt_text(), "card-img-top")?.into())?;

    let body = dom::element("div", "card-body d-flex flex-column", None)?;
    let title = dom::element("h3", "card-title", Some(&card.title))?;
    mark_opens_details(&title, &id)?;
    let button = dom::element(
        "button",
        "btn btn-primary btn-sm btn-details mt-auto",
        Some("Details"),
    )?;
    button.set_attribute("type", "button")?;
    mark_opens_details(&button, &id)?;
    body.append_child(&title)?;
    body.append_child(&button)?;

    inner.append_child(&body)?;
    col.append_child(&inner)?;
    Ok(col)
}

pub fn mark_opens_details(el: &Element, movie_id: &str) -> Result<(), JsValue> {
    el.set_attribute("data-open-details", "")?;
    el.set_attribute("data-movie-id", movie_id)
}

/// `<img>` that falls back to the placeholder poster if `src` fails.
pub fn poster(src: &str, alt: &str, class: &str) -> Result<Element, JsValue> {
    let img = dom::element("img", class, None)?;
    img.set_attribute("src", src)?;
    img.set_attribute("alt", alt)?;
    img.set_attribute("loading", "lazy")?;
    if src != PLACEHOLDER_POSTER {
        img.set_attribute(FALLBACK_ATTR, PLACEHOLDER_POSTER)?;
    }
    Ok(img)
}

/// Target of a captured `error` event: swap a broken poster for its
/// fallback, once.
pub fn swap_broken_image(target: &Element) {
    let Some(fallback) = target.get_attribute(FALLBACK_ATTR) else {
        return;
    };
    let _ = target.remove_attribute(FALLBACK_ATTR);
    let _ = target.set_attribute("src", &fallback);
}
