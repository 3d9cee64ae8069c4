//! Details modal.
//!
//! Opened through Bootstrap's JS API when `window.bootstrap` is loaded;
//! otherwise the modal is shown by toggling its classes and closed by the
//! delegated click handler on `[data-bs-dismiss="modal"]`.

use js_sys::{Function, Reflect};
use jsi_catalogue::details::DetailsView;
use tracing::{debug, error};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::cards;
use crate::dom::{self, Elements};
use crate::state::AppState;

const FALLBACK_OPEN: &str = "d-block";

pub async fn open_details(app: &AppState, id: u64) {
    let request = app.details_requests.issue();
    let fetched = app.client.title_details(id).await;
    if !app.details_requests.is_latest(request) {
        debug!(id, "details superseded by a later click");
        return;
    }

    let details = match fetched {
        Ok(details) => details,
        Err(err) => {
            error!(id, error = %err, "movie details unavailable");
            dom::alert("Error while loading movie details");
            return;
        }
    };

    let view = DetailsView::from_details(&details);
    if let Err(err) = render(&app.els, &view) {
        error!(id, error = ?err, "cannot render movie details");
        return;
    }
    show(&app.els.details_modal);
}

fn render(els: &Elements, view: &DetailsView) -> Result<(), JsValue> {
    els.details_label.set_text_content(Some(&view.title));

    let row = dom::element("div", "row g-3", None)?;

    let media = dom::element("div", "col-md-4", None)?;
    media.append_child(&cards::poster(&view.image_src, &view.title, "img-fluid rounded")?.into())?;

    let info = dom::element("div", "col-md-8", None)?;
    for field in &view.fields {
        let line = dom::element("div", "mb-2", None)?;
        let label = format!("{}: ", field.label);
        line.append_child(&dom::element("span", "info-label", Some(&label))?.into())?;
        line.append_child(&dom::element("span", "info-value", Some(&field.value))?.into())?;
        info.append_child(&line)?;
    }

    let summary = dom::element("div", "col-12", None)?;
    summary.append_child(&dom::element("div", "mb-2 info-label", Some("Summary:"))?.into())?;
    summary.append_child(&dom::element("p", "info-value", Some(&view.summary))?.into())?;

    row.append_child(&media)?;
    row.append_child(&info)?;
    row.append_child(&summary)?;

    let content = &els.details_content;
    content.set_text_content(None);
    content.append_child(&row)?;
    Ok(())
}

fn show(modal: &Element) {
    if let Err(err) = show_with_bootstrap(modal) {
        debug!(error = ?err, "bootstrap modal unavailable, toggling classes");
        dom::add_class(modal, "show");
        dom::add_class(modal, FALLBACK_OPEN);
        let _ = modal.set_attribute("aria-modal", "true");
        let _ = modal.remove_attribute("aria-hidden");
    }
}

/// Close a modal opened without Bootstrap; no-op otherwise.
pub fn hide_fallback(modal: &Element) {
    if !dom::has_class(modal, FALLBACK_OPEN) {
        return;
    }
    dom::remove_class(modal, "show");
    dom::remove_class(modal, FALLBACK_OPEN);
    let _ = modal.remove_attribute("aria-modal");
    let _ = modal.set_attribute("aria-hidden", "true");
}

// bootstrap.Modal.getOrCreateInstance(modal).show()
fn show_with_bootstrap(modal: &Element) -> Result<(), JsValue> {
    let bootstrap = Reflect::get(&js_sys::global(), &JsValue::from_str("bootstrap"))?;
    if bootstrap.is_undefined() {
        return Err(JsValue::from_str("bootstrap is not loaded"));
    }
    let modal_class = Reflect::get(&bootstrap, &JsValue::from_str("Modal"))?;
    let factory: Function =
        Reflect::get(&modal_class, &JsValue::from_str("getOrCreateInstance"))?.dyn_into()?;
    let instance = factory.call1(&modal_class, modal)?;
    let show: Function = Reflect::get(&instance, &JsValue::from_str("show"))?.dyn_into()?;
    show.call0(&instance)?;
    Ok(())
}
