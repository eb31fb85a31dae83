use tokio::sync::watch;

use crate::error::{AppError, AppResult};
use crate::query::{FilterModel, ListingScope, NavigableAddress, decode};

/// Read-only projection of the live address.
///
/// There is no setter: the model changes only when the address does, so the
/// two can never disagree.
#[derive(Debug, Clone)]
pub struct FilterStore {
    receiver: watch::Receiver<NavigableAddress>,
}

/// Address and the model derived from it, taken together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSnapshot {
    pub address: NavigableAddress,
    pub model: FilterModel,
}

impl FilterSnapshot {
    pub fn scope(&self) -> Option<ListingScope> {
        ListingScope::from_path(&self.address.path)
    }
}

impl FilterStore {
    pub fn new(receiver: watch::Receiver<NavigableAddress>) -> Self {
        Self { receiver }
    }

    pub fn current(&self) -> FilterModel {
        decode(&self.receiver.borrow().query)
    }

    pub fn snapshot(&self) -> FilterSnapshot {
        let address = self.receiver.borrow().clone();
        let model = decode(&address.query);
        FilterSnapshot { address, model }
    }

    /// Returns the new snapshot if the address moved since the last call.
    pub fn poll_change(&mut self) -> Option<FilterSnapshot> {
        if !self.receiver.has_changed().unwrap_or(false) {
            return None;
        }
        let address = self.receiver.borrow_and_update().clone();
        let model = decode(&address.query);
        Some(FilterSnapshot { address, model })
    }

    /// Waits for the next address change.
    pub async fn changed(&mut self) -> AppResult<FilterSnapshot> {
        self.receiver
            .changed()
            .await
            .map_err(|_| AppError::unsupported("navigation history was dropped"))?;
        let address = self.receiver.borrow_and_update().clone();
        let model = decode(&address.query);
        Ok(FilterSnapshot { address, model })
    }
}
