//! At-most-one outstanding operation per key.

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::{Mutex, PoisonError};

/// Keys with an operation currently outstanding.
#[derive(Debug)]
pub(crate) struct InFlight<K> {
    keys: Mutex<HashSet<K>>,
}

impl<K: Eq + Hash + Clone> InFlight<K> {
    pub(crate) fn new() -> Self {
        Self {
            keys: Mutex::new(HashSet::new()),
        }
    }

    /// Marks `key` as busy. Returns `None` if it already is.
    ///
    /// The mark is cleared when the returned guard drops, whichever way
    /// the operation ends.
    pub(crate) fn try_begin(&self, key: K) -> Option<InFlightGuard<'_, K>> {
        let inserted = self
            .keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.clone());
        inserted.then(|| InFlightGuard { owner: self, key })
    }

    pub(crate) fn contains(&self, key: &K) -> bool {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(key)
    }
}

pub(crate) struct InFlightGuard<'a, K: Eq + Hash + Clone> {
    owner: &'a InFlight<K>,
    key: K,
}

impl<K: Eq + Hash + Clone> Drop for InFlightGuard<'_, K> {
    fn drop(&mut self) {
        self.owner
            .keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_begin_on_same_key_is_refused() {
        let in_flight = InFlight::new();
        let _guard = in_flight.try_begin("a").unwrap();
        assert!(in_flight.try_begin("a").is_none());
        assert!(in_flight.try_begin("b").is_some());
    }

    #[test]
    fn dropping_guard_releases_key() {
        let in_flight = InFlight::new();
        let guard = in_flight.try_begin("a").unwrap();
        assert!(in_flight.contains(&"a"));
        drop(guard);
        assert!(!in_flight.contains(&"a"));
        assert!(in_flight.try_begin("a").is_some());
    }
}
