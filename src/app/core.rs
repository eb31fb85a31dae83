use std::sync::Arc;

use crate::catalog::{CatalogService, ListingEngine, ListingRequest, ListingState};
use crate::command::{Command, CommandOutcome};
use crate::config::Config;
use crate::dispatch::{Dispatcher, RoutingRequest};
use crate::error::{AppError, AppResult};
use crate::history::BrowserHistory;
use crate::query::{FilterModel, NavigableAddress};
use crate::store::{FilterSnapshot, FilterStore};
use crate::surface::{Drawer, FacetPanel, Pagination, SurfaceKind, render_listing};

/// One product-listing view: the address owner, the store projecting it,
/// the dispatcher writing it and the catalog engine answering it.
pub struct Storefront {
    history: BrowserHistory,
    store: FilterStore,
    dispatcher: Dispatcher,
    engine: ListingEngine,
    listing: ListingState,
    sidebar: FacetPanel,
    drawer: Drawer,
    pagination: Pagination,
    page_size: u32,
}

impl Storefront {
    pub fn new(
        config: &Config,
        service: Arc<dyn CatalogService>,
        initial: NavigableAddress,
    ) -> AppResult<Self> {
        let config = config.clone().sanitized();
        let history = BrowserHistory::with_capacity(initial, config.history.capacity);
        let store = FilterStore::new(history.subscribe());
        let engine =
            ListingEngine::new(service)?.with_cancel_superseded(config.catalog.cancel_superseded);

        Ok(Self {
            history,
            store,
            dispatcher: Dispatcher::new(config.history.mode),
            engine,
            listing: ListingState::default(),
            sidebar: FacetPanel::new(SurfaceKind::Sidebar),
            drawer: Drawer::default(),
            pagination: Pagination,
            page_size: config.catalog.page_size,
        })
    }

    /// Issues the query for the initial address.
    pub fn open(&mut self) {
        self.refresh();
    }

    /// Re-issues the query for the current address regardless of change.
    /// Returns `false` when the address is not a listing route.
    pub fn refresh(&mut self) -> bool {
        let snapshot = self.store.snapshot();
        self.query(&snapshot)
    }

    pub fn route(&mut self, request: &RoutingRequest) -> CommandOutcome {
        let outcome = self.dispatcher.dispatch(&mut self.history, request);
        self.sync();
        outcome
    }

    pub fn execute(&mut self, command: Command) -> AppResult<CommandOutcome> {
        tracing::debug!(command = command.id(), "executing command");
        let panel = self.active_panel();
        let outcome = match command {
            Command::Search { term } => self.route(&panel.submit_search(&term)),
            Command::ClearSearch => self.route(&panel.clear_search()),
            Command::Page { page } => {
                let request = self.pagination.select_page(page);
                self.route(&request)
            }
            Command::Toggle { key, value } => self.route(&panel.toggle_facet(&key, &value)),
            Command::Remove {
                key,
                index: Some(index),
            } => self.route(&panel.remove_chip(&key, index)),
            Command::Remove { key, index: None } | Command::Clear { key } => {
                self.route(&panel.clear_facet(&key))
            }
            Command::Refresh => changed_outcome(self.refresh()),
            Command::Back => {
                let outcome = self.history.back();
                self.sync();
                outcome
            }
            Command::Forward => {
                let outcome = self.history.forward();
                self.sync();
                outcome
            }
            Command::OpenDrawer => changed_outcome(self.drawer.open()),
            Command::CloseDrawer => changed_outcome(self.drawer.close()),
            Command::Retry => self.retry()?,
            Command::Show | Command::Help => CommandOutcome::Noop,
            Command::Quit => CommandOutcome::QuitRequested,
        };
        Ok(outcome)
    }

    /// Picks up an address change not yet queried; returns whether one was.
    pub fn sync(&mut self) -> bool {
        let Some(snapshot) = self.store.poll_change() else {
            return false;
        };
        self.query(&snapshot);
        true
    }

    /// Applies whatever answers have already arrived, without waiting.
    pub fn drain_background(&mut self) -> bool {
        let events = self.engine.drain_events();
        self.listing.apply_all(events)
    }

    /// Waits until the latest query has been answered.
    pub async fn settle(&mut self) {
        while self.listing.is_loading() {
            let Some(event) = self.engine.next_event().await else {
                break;
            };
            self.listing.apply(event);
        }
    }

    pub fn render(&self) -> String {
        render_listing(&self.listing, &self.store.current())
    }

    pub fn address(&self) -> NavigableAddress {
        self.store.snapshot().address
    }

    pub fn model(&self) -> FilterModel {
        self.store.current()
    }

    pub fn listing(&self) -> &ListingState {
        &self.listing
    }

    pub fn history(&self) -> &BrowserHistory {
        &self.history
    }

    pub fn drawer_open(&self) -> bool {
        self.drawer.is_open()
    }

    fn active_panel(&self) -> FacetPanel {
        if self.drawer.is_open() {
            *self.drawer.panel()
        } else {
            self.sidebar
        }
    }

    fn query(&mut self, snapshot: &FilterSnapshot) -> bool {
        let Some(scope) = snapshot.scope() else {
            tracing::debug!(path = %snapshot.address.path, "address is not a listing route");
            self.listing = ListingState::default();
            return false;
        };
        let request = ListingRequest::from_model(&snapshot.model, &scope, self.page_size);
        self.submit(request);
        true
    }

    fn submit(&mut self, request: ListingRequest) {
        let generation = self.engine.submit(request.clone());
        tracing::debug!(generation, page = request.page, "listing query issued");
        self.listing.begin(generation, request);
    }

    fn retry(&mut self) -> AppResult<CommandOutcome> {
        let Some(request) = self.listing.last_request().cloned() else {
            return Err(AppError::invalid_argument("no listing request to retry"));
        };
        self.submit(request);
        Ok(CommandOutcome::Applied)
    }
}

fn changed_outcome(changed: bool) -> CommandOutcome {
    if changed {
        CommandOutcome::Applied
    } else {
        CommandOutcome::Noop
    }
}
