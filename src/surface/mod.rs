mod render;

use crate::dispatch::{IntentValue, RoutingIntent, RoutingRequest};
use crate::query::ReservedKey;

pub use render::{render_listing, render_selection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    Sidebar,
    Drawer,
}

impl SurfaceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sidebar => "sidebar",
            Self::Drawer => "drawer",
        }
    }
}

/// Filter controls of one surface. Holds no filter state of its own; every
/// affordance only produces a routing request against the shared address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacetPanel {
    kind: SurfaceKind,
}

impl FacetPanel {
    pub fn new(kind: SurfaceKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> SurfaceKind {
        self.kind
    }

    pub fn toggle_facet(&self, key: &str, value: &str) -> RoutingRequest {
        RoutingIntent::facet(key).resetting_page().with_value(value)
    }

    /// Removal of one selected chip, addressed by its position under `key`.
    pub fn remove_chip(&self, key: &str, index: usize) -> RoutingRequest {
        RoutingIntent::facet(key)
            .at_position(index)
            .with_value(IntentValue::Absent)
    }

    pub fn clear_facet(&self, key: &str) -> RoutingRequest {
        RoutingIntent::facet(key).with_value(IntentValue::Absent)
    }

    pub fn submit_search(&self, term: &str) -> RoutingRequest {
        RoutingIntent::reserved(ReservedKey::Search)
            .resetting_page()
            .with_value(term)
    }

    pub fn clear_search(&self) -> RoutingRequest {
        RoutingIntent::reserved(ReservedKey::Search).with_value(IntentValue::Absent)
    }
}

/// Page selector; changing page never resets anything else.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination;

impl Pagination {
    pub fn select_page(&self, page: u32) -> RoutingRequest {
        RoutingIntent::reserved(ReservedKey::Page).with_value(page)
    }
}

/// Collapsible filter surface for narrow layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drawer {
    panel: FacetPanel,
    open: bool,
}

impl Default for Drawer {
    fn default() -> Self {
        Self {
            panel: FacetPanel::new(SurfaceKind::Drawer),
            open: false,
        }
    }
}

impl Drawer {
    pub fn open(&mut self) -> bool {
        let changed = !self.open;
        self.open = true;
        changed
    }

    pub fn close(&mut self) -> bool {
        let changed = self.open;
        self.open = false;
        changed
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn panel(&self) -> &FacetPanel {
        &self.panel
    }
}
