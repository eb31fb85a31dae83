use std::collections::VecDeque;

use tokio::sync::watch;

use crate::command::CommandOutcome;
use crate::query::NavigableAddress;

use super::{NavigateMode, Navigator};

const DEFAULT_CAPACITY: usize = 64;

/// In-memory stand-in for the browser history stack.
///
/// Every change of the current entry is published on a watch channel so the
/// filter store can re-derive its model.
pub struct BrowserHistory {
    current: NavigableAddress,
    back_stack: VecDeque<NavigableAddress>,
    forward_stack: VecDeque<NavigableAddress>,
    capacity: usize,
    publisher: watch::Sender<NavigableAddress>,
}

impl BrowserHistory {
    pub fn new(initial: NavigableAddress) -> Self {
        Self::with_capacity(initial, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(initial: NavigableAddress, capacity: usize) -> Self {
        let (publisher, _) = watch::channel(initial.clone());
        Self {
            current: initial,
            back_stack: VecDeque::new(),
            forward_stack: VecDeque::new(),
            capacity: capacity.max(1),
            publisher,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<NavigableAddress> {
        self.publisher.subscribe()
    }

    pub fn back(&mut self) -> CommandOutcome {
        let Some(target) = self.back_stack.pop_back() else {
            return CommandOutcome::Noop;
        };

        let previous = std::mem::replace(&mut self.current, target);
        push_bounded(&mut self.forward_stack, previous, self.capacity);
        self.publish();
        tracing::debug!(address = %self.current, "history back");
        CommandOutcome::Applied
    }

    pub fn forward(&mut self) -> CommandOutcome {
        let Some(target) = self.forward_stack.pop_back() else {
            return CommandOutcome::Noop;
        };

        let previous = std::mem::replace(&mut self.current, target);
        push_bounded(&mut self.back_stack, previous, self.capacity);
        self.publish();
        tracing::debug!(address = %self.current, "history forward");
        CommandOutcome::Applied
    }

    pub fn can_go_back(&self) -> bool {
        !self.back_stack.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward_stack.is_empty()
    }

    /// Number of entries, current one included.
    pub fn entry_count(&self) -> usize {
        self.back_stack.len() + 1 + self.forward_stack.len()
    }

    fn publish(&self) {
        self.publisher.send_replace(self.current.clone());
    }
}

impl Navigator for BrowserHistory {
    fn location(&self) -> &NavigableAddress {
        &self.current
    }

    fn navigate(&mut self, to: NavigableAddress, mode: NavigateMode) -> bool {
        if to == self.current {
            return false;
        }

        let previous = std::mem::replace(&mut self.current, to);
        if mode == NavigateMode::Push {
            push_bounded(&mut self.back_stack, previous, self.capacity);
            self.forward_stack.clear();
        }
        self.publish();
        tracing::debug!(address = %self.current, ?mode, "navigated");
        true
    }
}

fn push_bounded(stack: &mut VecDeque<NavigableAddress>, entry: NavigableAddress, capacity: usize) {
    if stack.len() >= capacity {
        stack.pop_front();
    }
    stack.push_back(entry);
}

#[cfg(test)]
mod tests {
    use super::BrowserHistory;
    use crate::command::CommandOutcome;
    use crate::history::{NavigateMode, Navigator};
    use crate::query::NavigableAddress;

    fn addr(raw: &str) -> NavigableAddress {
        NavigableAddress::parse(raw)
    }

    #[test]
    fn push_records_back_entries_and_clears_forward() {
        let mut history = BrowserHistory::new(addr("/products"));
        assert!(history.navigate(addr("/products?color=red"), NavigateMode::Push));
        assert!(history.navigate(addr("/products?color=red&page=2"), NavigateMode::Push));
        assert_eq!(history.entry_count(), 3);

        assert_eq!(history.back(), CommandOutcome::Applied);
        assert_eq!(history.location(), &addr("/products?color=red"));
        assert!(history.can_go_forward());

        assert!(history.navigate(addr("/products?color=blue"), NavigateMode::Push));
        assert!(!history.can_go_forward());
        assert_eq!(history.forward(), CommandOutcome::Noop);
    }

    #[test]
    fn replace_overwrites_current_entry() {
        let mut history = BrowserHistory::new(addr("/products"));
        assert!(history.navigate(addr("/products?page=2"), NavigateMode::Replace));
        assert_eq!(history.entry_count(), 1);
        assert!(!history.can_go_back());
        assert_eq!(history.back(), CommandOutcome::Noop);
    }

    #[test]
    fn navigating_to_current_location_is_not_recorded() {
        let mut history = BrowserHistory::new(addr("/products?page=2"));
        assert!(!history.navigate(addr("/products?page=2"), NavigateMode::Push));
        assert_eq!(history.entry_count(), 1);
    }

    #[test]
    fn back_stack_is_bounded_by_capacity() {
        let mut history = BrowserHistory::with_capacity(addr("/products"), 2);
        for page in 2..=5 {
            history.navigate(addr(&format!("/products?page={page}")), NavigateMode::Push);
        }
        assert_eq!(history.entry_count(), 3);
        assert_eq!(history.back(), CommandOutcome::Applied);
        assert_eq!(history.back(), CommandOutcome::Applied);
        assert_eq!(history.back(), CommandOutcome::Noop);
        assert_eq!(history.location(), &addr("/products?page=3"));
    }

    #[test]
    fn subscribers_observe_every_location_change() {
        let mut history = BrowserHistory::new(addr("/products"));
        let mut receiver = history.subscribe();
        assert!(!receiver.has_changed().expect("sender alive"));

        history.navigate(addr("/products?color=red"), NavigateMode::Push);
        assert!(receiver.has_changed().expect("sender alive"));
        assert_eq!(*receiver.borrow_and_update(), addr("/products?color=red"));

        history.back();
        assert_eq!(*receiver.borrow_and_update(), addr("/products"));
    }
}
