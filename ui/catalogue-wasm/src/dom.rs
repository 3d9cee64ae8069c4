//! DOM element bindings.
//!
//! All fields are resolved once at startup. A missing element aborts start
//! with an error naming its id; the search block is optional and only bound
//! when the page carries `#search-form`.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlInputElement, HtmlOptionElement, HtmlSelectElement,
    Window,
};

use crate::state::SectionId;

// ── Helpers ──

pub fn document() -> Document {
    gloo_utils::document()
}

pub fn window() -> Window {
    gloo_utils::window()
}

pub fn by_id(id: &str) -> Option<Element> {
    document().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

/// Query all matching elements within a parent element.
pub fn query_all_within(parent: &Element, selector: &str) -> Vec<Element> {
    let Ok(list) = parent.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// New `<tag class="...">` with optional text content.
pub fn element(tag: &str, class: &str, text: Option<&str>) -> Result<Element, JsValue> {
    let el = document().create_element(tag)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    if text.is_some() {
        el.set_text_content(text);
    }
    Ok(el)
}

pub fn create_option(value: &str, text: &str) -> Result<HtmlOptionElement, JsValue> {
    let opt: HtmlOptionElement = document().create_element("option")?.dyn_into()?;
    opt.set_value(value);
    opt.set_text_content(Some(text));
    Ok(opt)
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub fn remove_class(el: &Element, cls: &str) {
    let _ = el.class_list().remove_1(cls);
}

pub fn toggle_class(el: &Element, cls: &str, force: bool) {
    let _ = el.class_list().toggle_with_force(cls, force);
}

pub fn has_class(el: &Element, cls: &str) -> bool {
    el.class_list().contains(cls)
}

/// Show or hide with Bootstrap's `d-none` utility.
pub fn set_shown(el: &Element, shown: bool) {
    toggle_class(el, "d-none", !shown);
}

/// `data-<key>` attribute of `<body>`.
pub fn body_data(key: &str) -> Option<String> {
    document().body()?.get_attribute(&format!("data-{key}"))
}

/// Layout viewport width in CSS pixels, the value media queries test.
pub fn viewport_width() -> u32 {
    window()
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .map(|w| w.max(0.0) as u32)
        .unwrap_or(0)
}

pub fn alert(message: &str) {
    if let Err(err) = window().alert_with_message(message) {
        tracing::warn!(error = ?err, "alert blocked");
    }
}

// ── Elements struct ──

/// Grid plus its show more / show less buttons.
#[derive(Clone)]
pub struct SectionEls {
    pub grid: Element,
    pub more: HtmlButtonElement,
    pub less: HtmlButtonElement,
}

#[derive(Clone)]
pub struct SearchEls {
    pub form: Element,
    pub input: HtmlInputElement,
    /// Wrapper hidden while there is no active query.
    pub container: Element,
    pub results: SectionEls,
}

/// All DOM element references used by the catalogue page.
#[derive(Clone)]
pub struct Elements {
    pub best_banner: Element,
    pub top_rated: SectionEls,
    pub category_1: SectionEls,
    pub category_2: SectionEls,
    pub others: SectionEls,
    pub category_titles: [Option<Element>; 2],
    pub genre_select: HtmlSelectElement,

    pub details_modal: Element,
    pub details_label: Element,
    pub details_content: Element,

    pub search: Option<SearchEls>,
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

macro_rules! get_input {
    ($id:expr) => {
        by_id_typed::<HtmlInputElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing input #{}", $id)))?
    };
}

macro_rules! get_select {
    ($id:expr) => {
        by_id_typed::<HtmlSelectElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing select #{}", $id)))?
    };
}

macro_rules! get_button {
    ($id:expr) => {
        by_id_typed::<HtmlButtonElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing button #{}", $id)))?
    };
}

fn bind_section(id: SectionId) -> Result<SectionEls, JsValue> {
    Ok(SectionEls {
        grid: get_el!(id.grid_id()),
        more: get_button!(&id.more_button_id()),
        less: get_button!(&id.less_button_id()),
    })
}

fn bind_search() -> Result<Option<SearchEls>, JsValue> {
    let Some(form) = by_id("search-form") else {
        return Ok(None);
    };
    Ok(Some(SearchEls {
        form,
        input: get_input!("search-input"),
        container: get_el!("search-section"),
        results: bind_section(SectionId::Search)?,
    }))
}

impl Elements {
    /// Resolve all DOM references. Call once at start.
    pub fn bind() -> Result<Elements, JsValue> {
        Ok(Elements {
            best_banner: get_el!("best-movie-content"),
            top_rated: bind_section(SectionId::TopRated)?,
            category_1: bind_section(SectionId::Category1)?,
            category_2: bind_section(SectionId::Category2)?,
            others: bind_section(SectionId::Others)?,
            category_titles: [by_id("category-1-title"), by_id("category-2-title")],
            genre_select: get_select!("genre-select"),

            details_modal: get_el!("detailsModal"),
            details_label: get_el!("detailsModalLabel"),
            details_content: get_el!("modal-content"),

            search: bind_search()?,
        })
    }

    pub fn section(&self, id: SectionId) -> Option<&SectionEls> {
        match id {
            SectionId::TopRated => Some(&self.top_rated),
            SectionId::Category1 => Some(&self.category_1),
            SectionId::Category2 => Some(&self.category_2),
            SectionId::Others => Some(&self.others),
            SectionId::Search => self.search.as_ref().map(|s| &s.results),
        }
    }
}
