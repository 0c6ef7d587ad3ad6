//! Query tokens for latest-only results.
//!
//! Re-fetches (filter changes, page flips) can overlap in flight, and the
//! backend gives no ordering guarantee. Each logical query hands out
//! monotonically increasing tokens; only the newest token's result is
//! accepted, so a stale response cannot overwrite a fresher one.

use std::collections::HashMap;
use std::hash::Hash;

/// Opaque token for matching an async result to the query that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryToken(u64);

/// Tracks the newest issued token per query key and ignores stale results.
#[derive(Debug)]
pub struct LatestOnly<K> {
    next: u64,
    active: HashMap<K, QueryToken>,
}

impl<K: Eq + Hash> LatestOnly<K> {
    pub fn new() -> Self {
        Self {
            next: 0,
            active: HashMap::new(),
        }
    }

    /// Issues a token for `key`, superseding any earlier token.
    pub fn begin(&mut self, key: K) -> QueryToken {
        let token = QueryToken(self.next);
        self.next += 1;
        self.active.insert(key, token);
        token
    }

    /// Returns true if `token` is still the newest issued for `key`.
    pub fn is_current(&self, key: &K, token: QueryToken) -> bool {
        self.active.get(key) == Some(&token)
    }

    /// Finishes the query if `token` is still current.
    ///
    /// Returns true when the result should be applied; a stale token
    /// returns false and leaves the newest token undisturbed.
    pub fn accept(&mut self, key: &K, token: QueryToken) -> bool {
        if self.is_current(key, token) {
            self.active.remove(key);
            true
        } else {
            false
        }
    }

    /// Drops any in-flight token for `key`.
    pub fn cancel(&mut self, key: &K) {
        self.active.remove(key);
    }

    /// Returns true if `key` has an unfinished query.
    pub fn has_active(&self, key: &K) -> bool {
        self.active.contains_key(key)
    }
}

impl<K: Eq + Hash> Default for LatestOnly<K> {
    fn default() -> Self {
        Self::new()
    }
}
