use super::engine::ListingEvent;
use super::types::{ListingRequest, ListingResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingPhase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingFailure {
    pub message: String,
    pub retryable: bool,
}

/// Display state of one listing view.
///
/// Only the answer to the most recently issued request is applied; a
/// failure keeps the previous result on screen.
#[derive(Debug, Clone)]
pub struct ListingState {
    phase: ListingPhase,
    generation: u64,
    request: Option<ListingRequest>,
    result: Option<ListingResult>,
    failure: Option<ListingFailure>,
    discarded: u64,
}

impl Default for ListingState {
    fn default() -> Self {
        Self {
            phase: ListingPhase::Idle,
            generation: 0,
            request: None,
            result: None,
            failure: None,
            discarded: 0,
        }
    }
}

impl ListingState {
    pub fn begin(&mut self, generation: u64, request: ListingRequest) {
        self.phase = ListingPhase::Loading;
        self.generation = generation;
        self.request = Some(request);
        self.failure = None;
    }

    /// Applies one engine event; returns whether the state changed.
    pub fn apply(&mut self, event: ListingEvent) -> bool {
        if event.generation() != self.generation {
            self.discarded += 1;
            tracing::debug!(
                stale = event.generation(),
                current = self.generation,
                "discarding stale listing response"
            );
            return false;
        }
        if self.phase != ListingPhase::Loading {
            return false;
        }

        match event {
            ListingEvent::Completed { result, .. } => {
                self.phase = ListingPhase::Loaded;
                self.result = Some(result);
                self.failure = None;
            }
            ListingEvent::Failed {
                message, retryable, ..
            } => {
                self.phase = ListingPhase::Failed;
                self.failure = Some(ListingFailure { message, retryable });
            }
        }
        true
    }

    pub fn apply_all(&mut self, events: impl IntoIterator<Item = ListingEvent>) -> bool {
        let mut changed = false;
        for event in events {
            changed |= self.apply(event);
        }
        changed
    }

    pub fn phase(&self) -> ListingPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == ListingPhase::Loading
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Request behind the latest generation, used to retry.
    pub fn last_request(&self) -> Option<&ListingRequest> {
        self.request.as_ref()
    }

    pub fn result(&self) -> Option<&ListingResult> {
        self.result.as_ref()
    }

    pub fn failure(&self) -> Option<&ListingFailure> {
        self.failure.as_ref()
    }

    /// Count of responses dropped because a newer request was issued.
    pub fn discarded(&self) -> u64 {
        self.discarded
    }
}
