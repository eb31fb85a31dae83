pub mod engine;
mod http;
mod service;
pub mod state;
mod types;

pub use engine::{ListingEngine, ListingEvent};
pub use http::HttpCatalogService;
pub use service::CatalogService;
pub use state::{ListingFailure, ListingPhase, ListingState};
pub use types::{
    FacetSummary, FacetValue, FilterValue, ListingMeta, ListingRequest, ListingResult, Product,
};
