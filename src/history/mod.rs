mod state;

use serde::Deserialize;

use crate::query::NavigableAddress;

pub use state::BrowserHistory;

/// How a navigation lands in history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigateMode {
    /// New back-navigable entry.
    Push,
    /// Overwrite the current entry.
    Replace,
}

/// Owner of the live address. Writes are linearized by `&mut self`.
pub trait Navigator {
    fn location(&self) -> &NavigableAddress;

    /// Returns `false` when the target equals the current location and
    /// nothing was recorded.
    fn navigate(&mut self, to: NavigableAddress, mode: NavigateMode) -> bool;
}
