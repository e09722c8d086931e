//! Coalescing of notification bursts and one-shot initialization.

use std::{cell::Cell, time::Duration};


/// Each notification arms a new ticket; only the ticket armed last is still
/// current when its delay elapses, so a burst runs the handler once.
#[derive(Debug, Default)]
pub struct DebounceGate {
    generation: Cell<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket(u64);

impl DebounceGate {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(150);

    pub fn arm(&self) -> DebounceTicket {
        let next = self.generation.get().wrapping_add(1);
        self.generation.set(next);
        DebounceTicket(next)
    }

    pub fn is_current(&self, ticket: DebounceTicket) -> bool {
        self.generation.get() == ticket.0
    }
}


/// Guards initialization of a single component instance.
#[derive(Debug, Default)]
pub struct InitGuard {
    started: Cell<bool>,
}

impl InitGuard {
    /// `true` the first time only.
    pub fn begin(&self) -> bool {
        !self.started.replace(true)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_last_ticket_fires() {
        let gate = DebounceGate::default();
        let first = gate.arm();
        let second = gate.arm();
        let third = gate.arm();
        assert!(!gate.is_current(first));
        assert!(!gate.is_current(second));
        assert!(gate.is_current(third));
    }

    #[test]
    fn guards_are_per_instance() {
        let a = InitGuard::default();
        let b = InitGuard::default();
        assert!(a.begin());
        assert!(!a.begin());
        assert!(b.begin());
    }
}
