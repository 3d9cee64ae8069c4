//! Application context.
//!
//! One `AppState` is built at start and shared as `Rc<AppState>` by every
//! event handler and spawned task (WASM is single-threaded). The section
//! registry is only borrowed for the duration of a synchronous call, never
//! across an `.await`.

use jsi_catalogue::{
    ApiClient, CatalogueConfig, LoadTicket, RequestSequence, SectionRegistry,
    VisibilityController,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

use crate::api::GlooFetch;
use crate::dom::Elements;
use crate::grid::DomGrid;

/// Page regions that own a card grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    TopRated,
    Category1,
    Category2,
    Others,
    Search,
}

impl SectionId {
    pub const ALL: [SectionId; 5] = [
        SectionId::TopRated,
        SectionId::Category1,
        SectionId::Category2,
        SectionId::Others,
        SectionId::Search,
    ];

    fn key(self) -> &'static str {
        match self {
            SectionId::TopRated => "top",
            SectionId::Category1 => "cat1",
            SectionId::Category2 => "cat2",
            SectionId::Others => "others",
            SectionId::Search => "search",
        }
    }

    pub fn grid_id(self) -> &'static str {
        match self {
            SectionId::TopRated => "top-rated-grid",
            SectionId::Category1 => "category-1-grid",
            SectionId::Category2 => "category-2-grid",
            SectionId::Others => "others-grid",
            SectionId::Search => "search-grid",
        }
    }

    pub fn more_button_id(self) -> String {
        format!("btn-show-more-{}", self.key())
    }

    pub fn less_button_id(self) -> String {
        format!("btn-show-less-{}", self.key())
    }

    /// Leading items of the listing already shown elsewhere on the page.
    pub fn skip(self) -> usize {
        match self {
            // The best movie sits in the banner.
            SectionId::TopRated => 1,
            _ => 0,
        }
    }
}

pub type Controller = VisibilityController<DomGrid>;

pub struct AppState {
    pub els: Elements,
    pub config: CatalogueConfig,
    pub client: Rc<ApiClient<GlooFetch>>,
    registry: RefCell<SectionRegistry<SectionId, DomGrid>>,
    /// Details clicks; a slower earlier response must not replace a later one.
    pub details_requests: RequestSequence,
}

impl AppState {
    pub fn new(els: Elements, config: CatalogueConfig) -> Result<Rc<Self>, JsValue> {
        let client = ApiClient::new(&config.api_base, GlooFetch)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        Ok(Rc::new(Self {
            els,
            config,
            client: Rc::new(client),
            registry: RefCell::new(SectionRegistry::new()),
            details_requests: RequestSequence::new(),
        }))
    }

    /// Start a (re)load of `id`, retiring whatever it currently shows.
    pub fn begin_load(&self, id: SectionId) -> LoadTicket<SectionId> {
        self.registry.borrow_mut().begin(id)
    }

    pub fn is_current(&self, ticket: &LoadTicket<SectionId>) -> bool {
        self.registry.borrow().is_current(ticket)
    }

    pub fn install(&self, ticket: &LoadTicket<SectionId>, controller: Rc<Controller>) -> bool {
        self.registry.borrow_mut().install(ticket, controller)
    }

    pub fn controller(&self, id: SectionId) -> Option<Rc<Controller>> {
        self.registry.borrow().get(&id)
    }

    pub fn controllers(&self) -> Vec<(SectionId, Rc<Controller>)> {
        self.registry.borrow().controllers()
    }
}
