//! JustStreamIt catalogue WASM front-end.
//!
//! Binds the page, then loads the banner and every section concurrently.
//! All catalogue logic lives in `jsi-catalogue`; this crate supplies the
//! `fetch` transport, the DOM grid and the event wiring.

pub mod api;
pub mod cards;
pub mod dom;
pub mod events;
pub mod grid;
pub mod logging;
pub mod modal;
pub mod sections;
pub mod state;

use jsi_catalogue::{CatalogueConfig, TitleQuery};
use std::rc::Rc;
use tracing::info;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::state::{AppState, SectionId};

/// WASM entry point, called when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    let config = CatalogueConfig::from_lookup(dom::body_data);
    logging::init(&config.log_level);

    init(config).await
}

async fn init(config: CatalogueConfig) -> Result<(), JsValue> {
    let els = dom::Elements::bind()?;
    let app = AppState::new(els, config)?;
    info!(api = %app.client.base(), "catalogue starting");

    events::bind_events(&app)?;

    let [first, second] = app.config.category_genres.clone();
    for (title, genre) in app.els.category_titles.iter().zip([&first, &second]) {
        if let Some(title) = title {
            title.set_text_content(Some(genre));
        }
    }

    spawn_local(sections::render_best(Rc::clone(&app)));
    spawn_local(sections::load_section(
        Rc::clone(&app),
        SectionId::TopRated,
        TitleQuery::TopRated,
    ));
    spawn_local(sections::load_section(
        Rc::clone(&app),
        SectionId::Category1,
        TitleQuery::Genre(first),
    ));
    spawn_local(sections::load_section(
        Rc::clone(&app),
        SectionId::Category2,
        TitleQuery::Genre(second),
    ));

    // "Others" starts on the first genre of the picker, so it waits for it.
    let initial = sections::init_genre_select(&app).await;
    sections::load_section(app, SectionId::Others, TitleQuery::Genre(initial)).await;
    Ok(())
}
