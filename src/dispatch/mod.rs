mod intent;
mod mutate;

use crate::command::CommandOutcome;
use crate::history::{NavigateMode, Navigator};

pub use intent::{IntentValue, RoutingIntent, RoutingRequest};
pub use mutate::next_query;

/// Turns routing requests into navigations.
///
/// Always reads the navigator's live location at dispatch time, never a
/// cached copy, so requests from different surfaces serialize through the
/// navigator's own ordering.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher {
    mode: NavigateMode,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(NavigateMode::Push)
    }
}

impl Dispatcher {
    pub fn new(mode: NavigateMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> NavigateMode {
        self.mode
    }

    pub fn dispatch(
        &self,
        navigator: &mut dyn Navigator,
        request: &RoutingRequest,
    ) -> CommandOutcome {
        let live = navigator.location().clone();
        let Some(query) = next_query(&live.query, request) else {
            tracing::trace!(key = %request.intent.key, "routing request left address unchanged");
            return CommandOutcome::Noop;
        };

        let target = live.with_query(query);
        tracing::debug!(key = %request.intent.key, to = %target, "routing change");
        if navigator.navigate(target, self.mode) {
            CommandOutcome::Applied
        } else {
            CommandOutcome::Noop
        }
    }
}
