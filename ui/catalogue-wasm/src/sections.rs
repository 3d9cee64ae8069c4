//! Population of the page sections.
//!
//! Each section load runs in its own spawned task. A load first takes a
//! ticket from the registry; if another load of the same section started
//! meanwhile, the collected results are dropped before touching the DOM.

use jsi_api_types::MovieSummary;
use jsi_catalogue::card::CardModel;
use jsi_catalogue::details::summary_of;
use jsi_catalogue::{CardGrid, PageSource, SectionLoader, TitleListing, TitleQuery};
use std::rc::Rc;
use tracing::{debug, error, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlSelectElement};

use crate::cards;
use crate::dom;
use crate::grid::DomGrid;
use crate::state::{AppState, SectionId};

/// Banner with the single best rated movie and its long summary.
pub async fn render_best(app: Rc<AppState>) {
    let banner = &app.els.best_banner;
    banner.set_text_content(None);

    let best = match app.client.titles_page(&TitleQuery::TopRated, 1).await {
        Ok(page) => page.results.into_iter().next(),
        Err(err) => {
            error!(error = %err, "best movie unavailable");
            show_message(banner, "Error while loading", "text-danger");
            return;
        }
    };
    let Some(best) = best else {
        show_message(banner, "No movie available", "text-muted");
        return;
    };

    let summary = match build_banner(banner, &best) {
        Ok(summary) => summary,
        Err(err) => {
            warn!(error = ?err, "cannot render best movie banner");
            return;
        }
    };

    let text = match app.client.title_details(best.id).await {
        Ok(details) => summary_of(
            details.long_description.as_deref(),
            details.description.as_deref(),
        ),
        Err(err) => {
            warn!(id = best.id, error = %err, "best movie details unavailable");
            summary_of(None, best.description.as_deref())
        }
    };
    summary.set_text_content(Some(&text));
}

/// Fills the banner and returns the summary paragraph, filled later.
fn build_banner(banner: &Element, best: &MovieSummary) -> Result<Element, JsValue> {
    let card = CardModel::from_summary(best);

    let media = dom::element("div", "col-12 col-md-5", None)?;
    let img = cards::poster(&card.image_src, "", "best-movie-img")?;
    img.set_attribute("role", "presentation")?;
    img.set_attribute("title", &card.title)?;
    media.append_child(&img)?;

    let info = dom::element("div", "col-12 col-md-7", None)?;
    info.append_child(&dom::element("h3", "best-movie-title", Some(&card.title))?.into())?;
    let summary = dom::element("p", "mb-3 text-muted", Some("Loading summary..."))?;
    summary.set_id("best-summary");
    info.append_child(&summary)?;
    let button = dom::element("button", "btn btn-primary", Some("View details"))?;
    button.set_attribute("type", "button")?;
    cards::mark_opens_details(&button, &card.id.to_string())?;
    info.append_child(&button)?;

    banner.append_child(&media)?;
    banner.append_child(&info)?;
    Ok(summary)
}

fn show_message(target: &Element, text: &str, class: &str) {
    target.set_text_content(None);
    let appended = dom::element("p", class, Some(text)).and_then(|p| target.append_child(&p));
    if let Err(err) = appended {
        warn!(error = ?err, "cannot render message");
    }
}

/// Fill the "others" genre picker and return the genre to show first.
///
/// The full `/genres/` walk is tried first; any failure or an empty result
/// falls back to the built-in list.
pub async fn init_genre_select(app: &AppState) -> String {
    let genres = match app.client.fetch_all_genres().await {
        Ok(genres) if !genres.is_empty() => genres,
        Ok(_) => {
            warn!("genre listing is empty, using built-in list");
            app.config.fallback_genres.clone()
        }
        Err(err) => {
            warn!(error = %err, "cannot list genres, using built-in list");
            app.config.fallback_genres.clone()
        }
    };

    if let Err(err) = fill_select(&app.els.genre_select, &genres) {
        warn!(error = ?err, "cannot fill genre picker");
    }
    debug!(count = genres.len(), "genre picker filled");
    genres.into_iter().next().unwrap_or_else(|| "Action".to_owned())
}

fn fill_select(select: &HtmlSelectElement, values: &[String]) -> Result<(), JsValue> {
    select.set_text_content(None);
    for value in values {
        select.append_child(&dom::create_option(value, value)?.into())?;
    }
    Ok(())
}

/// (Re)load one section from `query`.
pub async fn load_section(app: Rc<AppState>, id: SectionId, query: TitleQuery) {
    let Some(section) = app.els.section(id).cloned() else {
        debug!(section = ?id, "section not on this page");
        return;
    };

    let ticket = app.begin_load(id);
    sync_buttons(&app, id);
    let grid = DomGrid::new(section.grid);
    grid.show_loading();

    let label = query.to_string();
    let source: Rc<dyn PageSource> = Rc::new(TitleListing::new(Rc::clone(&app.client), query));
    let collected = SectionLoader::new(source, app.config.section_size)
        .skip_leading(id.skip())
        .collect()
        .await;

    if !app.is_current(&ticket) {
        debug!(section = ?id, generation = ticket.generation(), "superseded load dropped");
        return;
    }

    let controller = collected.install(grid, dom::viewport_width(), app.config.visibility);
    let state = controller.state();
    app.install(&ticket, Rc::new(controller));
    sync_buttons(&app, id);
    info!(section = ?id, listing = %label, cards = state.total, visible = state.visible, "section loaded");
}

/// Run a title search into the search section; a blank query closes it.
pub async fn search(app: Rc<AppState>, text: String) {
    let Some(search) = app.els.search.as_ref() else {
        return;
    };

    let text = text.trim();
    if text.is_empty() {
        app.begin_load(SectionId::Search);
        DomGrid::new(search.results.grid.clone()).clear();
        dom::set_shown(&search.container, false);
        sync_buttons(&app, SectionId::Search);
        return;
    }

    dom::set_shown(&search.container, true);
    load_section(
        Rc::clone(&app),
        SectionId::Search,
        TitleQuery::Search(text.to_owned()),
    )
    .await;
}

/// Re-derive every grid's default count after a resize.
pub fn apply_viewport(app: &AppState, width: u32) {
    for (id, controller) in app.controllers() {
        controller.on_viewport_change(width);
        sync_buttons(app, id);
    }
}

/// Show each button only when its action would change something.
pub fn sync_buttons(app: &AppState, id: SectionId) {
    let Some(section) = app.els.section(id) else {
        return;
    };
    let (more, less, busy) = match app.controller(id) {
        Some(controller) => {
            let state = controller.state();
            (state.can_show_more, state.can_show_less, controller.is_loading())
        }
        None => (false, false, false),
    };
    dom::set_shown(&section.more, more);
    dom::set_shown(&section.less, less);
    section.more.set_disabled(busy);
    section.less.set_disabled(busy);
}

/// Disable both buttons while a "show more" batch is in flight.
pub fn set_busy(app: &AppState, id: SectionId) {
    if let Some(section) = app.els.section(id) {
        section.more.set_disabled(true);
        section.less.set_disabled(true);
    }
}
