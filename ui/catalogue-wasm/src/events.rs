//! Event binding.
//!
//! Handlers capture an `Rc<AppState>` and look the section's controller up
//! in the registry on every event, so a section reloaded in between is
//! driven through its new controller. Async work goes through
//! `wasm_bindgen_futures::spawn_local`.

use gloo_timers::callback::Timeout;
use jsi_catalogue::TitleQuery;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{AddEventListenerOptions, Element, Event};

use crate::cards;
use crate::dom;
use crate::modal;
use crate::sections;
use crate::state::{AppState, SectionId};

/// Attach `$handler` (an `FnMut(Event)`) for `$event` on `$target`.
macro_rules! listen {
    ($target:expr, $event:expr, $handler:expr) => {{
        let cb = Closure::wrap(Box::new($handler) as Box<dyn FnMut(Event)>);
        $target.add_event_listener_with_callback($event, cb.as_ref().unchecked_ref())?;
        cb.forget();
    }};
}

/// Bind all UI event listeners. Call once after `Elements::bind`.
pub fn bind_events(app: &Rc<AppState>) -> Result<(), JsValue> {
    for id in SectionId::ALL {
        bind_section_buttons(app, id)?;
        sections::sync_buttons(app, id);
    }
    bind_details_clicks(app)?;
    bind_genre_select(app)?;
    bind_resize(app)?;
    bind_search(app)?;
    bind_image_fallback()?;
    Ok(())
}

fn bind_section_buttons(app: &Rc<AppState>, id: SectionId) -> Result<(), JsValue> {
    let Some(section) = app.els.section(id) else {
        return Ok(());
    };

    let more_app = Rc::clone(app);
    listen!(section.more, "click", move |_: Event| {
        let app = Rc::clone(&more_app);
        spawn_local(async move {
            let Some(controller) = app.controller(id) else {
                return;
            };
            sections::set_busy(&app, id);
            let shown = controller.reveal_more().await;
            debug!(section = ?id, shown, "show more");
            sections::sync_buttons(&app, id);
        });
    });

    let less_app = Rc::clone(app);
    listen!(section.less, "click", move |_: Event| {
        if let Some(controller) = less_app.controller(id) {
            let hidden = controller.reveal_less();
            debug!(section = ?id, hidden, "show less");
        }
        sections::sync_buttons(&less_app, id);
    });
    Ok(())
}

/// One document-level listener serves every card, including cards appended
/// after start.
fn bind_details_clicks(app: &Rc<AppState>) -> Result<(), JsValue> {
    let app = Rc::clone(app);
    listen!(dom::document(), "click", move |event: Event| {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };

        if let Ok(Some(_)) = target.closest("[data-bs-dismiss=\"modal\"]") {
            modal::hide_fallback(&app.els.details_modal);
            return;
        }

        let Ok(Some(trigger)) = target.closest("[data-open-details]") else {
            return;
        };
        let raw = trigger.get_attribute("data-movie-id").unwrap_or_default();
        let Ok(id) = raw.trim().parse::<u64>() else {
            warn!(movie_id = %raw, "details trigger without a valid movie id");
            return;
        };
        let app = Rc::clone(&app);
        spawn_local(async move { modal::open_details(&app, id).await });
    });
    Ok(())
}

fn bind_genre_select(app: &Rc<AppState>) -> Result<(), JsValue> {
    let handler_app = Rc::clone(app);
    listen!(app.els.genre_select, "change", move |_: Event| {
        let genre = handler_app.els.genre_select.value();
        if genre.trim().is_empty() {
            return;
        }
        spawn_local(sections::load_section(
            Rc::clone(&handler_app),
            SectionId::Others,
            TitleQuery::Genre(genre),
        ));
    });
    Ok(())
}

fn bind_resize(app: &Rc<AppState>) -> Result<(), JsValue> {
    let app = Rc::clone(app);
    let pending: Rc<RefCell<Option<Timeout>>> = Rc::default();
    let delay = app.config.resize_debounce_ms;
    listen!(dom::window(), "resize", move |_: Event| {
        let app = Rc::clone(&app);
        let timeout = Timeout::new(delay, move || {
            sections::apply_viewport(&app, dom::viewport_width());
        });
        // Dropping the previous handle cancels it.
        pending.borrow_mut().replace(timeout);
    });
    Ok(())
}

fn bind_search(app: &Rc<AppState>) -> Result<(), JsValue> {
    let Some(search) = app.els.search.as_ref() else {
        return Ok(());
    };

    let submit_app = Rc::clone(app);
    listen!(search.form, "submit", move |event: Event| {
        event.prevent_default();
        let Some(search) = submit_app.els.search.as_ref() else {
            return;
        };
        let text = search.input.value();
        spawn_local(sections::search(Rc::clone(&submit_app), text));
    });

    // `search` fires when a type=search input is cleared with its button.
    let clear_app = Rc::clone(app);
    listen!(search.input, "search", move |_: Event| {
        let Some(search) = clear_app.els.search.as_ref() else {
            return;
        };
        if search.input.value().trim().is_empty() {
            spawn_local(sections::search(Rc::clone(&clear_app), String::new()));
        }
    });
    Ok(())
}

/// `error` does not bubble, so broken posters are caught in the capture
/// phase on the document.
fn bind_image_fallback() -> Result<(), JsValue> {
    let cb = Closure::wrap(Box::new(move |event: Event| {
        if let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) {
            cards::swap_broken_image(&target);
        }
    }) as Box<dyn FnMut(Event)>);
    let opts = AddEventListenerOptions::new();
    opts.set_capture(true);
    dom::document().add_event_listener_with_callback_and_add_event_listener_options(
        "error",
        cb.as_ref().unchecked_ref(),
        &opts,
    )?;
    cb.forget();
    Ok(())
}
