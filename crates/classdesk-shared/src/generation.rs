//! Request generations.
//!
//! A view calls [`RequestGenerations::begin`] before each fetch and checks
//! [`Generation::is_current`] when the response lands; a response from a
//! superseded request is dropped.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
pub struct RequestGenerations {
    latest: Rc<Cell<u64>>,
}

impl PartialEq for RequestGenerations {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.latest, &other.latest)
    }
}

impl RequestGenerations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request, superseding every earlier one.
    pub fn begin(&self) -> Generation {
        let next = self.latest.get().wrapping_add(1);
        self.latest.set(next);
        Generation {
            value: next,
            latest: self.latest.clone(),
        }
    }

    /// Supersede in-flight requests without starting a new one.
    pub fn invalidate(&self) {
        self.latest.set(self.latest.get().wrapping_add(1));
    }
}

#[derive(Debug, Clone)]
pub struct Generation {
    value: u64,
    latest: Rc<Cell<u64>>,
}

impl Generation {
    pub fn is_current(&self) -> bool {
        self.latest.get() == self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_request_supersedes_earlier() {
        let generations = RequestGenerations::new();
        let first = generations.begin();
        assert!(first.is_current());
        let second = generations.clone().begin();
        assert!(!first.is_current());
        assert!(second.is_current());
    }

    #[test]
    fn test_invalidate() {
        let generations = RequestGenerations::new();
        let pending = generations.begin();
        generations.invalidate();
        assert!(!pending.is_current());
    }
}
