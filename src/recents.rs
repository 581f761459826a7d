//! Recent searches
//!
//! The storefront keeps a short, most-recent-first list of search terms per
//! surface. The backing store is an explicit seam passed by reference, not
//! ambient global state, so the same logic runs against browser storage,
//! a session cache, or the in-memory store used in tests.

use rustc_hash::FxHashMap;

/// Storage seam for recent-search lists, keyed by surface name.
pub trait SearchStore {
    /// Load the saved entries for a key, if any.
    fn load(&self, key: &str) -> Option<Vec<String>>;

    /// Save the entries for a key, replacing any previous value.
    fn save(&mut self, key: &str, entries: &[String]);
}

/// An in-memory [`SearchStore`].
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: FxHashMap<String, Vec<String>>,
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SearchStore for InMemoryStore {
    fn load(&self, key: &str) -> Option<Vec<String>> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, entries: &[String]) {
        self.entries.insert(key.to_string(), entries.to_vec());
    }
}

/// A capped, deduplicated, most-recent-first list of search terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentSearches {
    key: String,
    cap: usize,
    entries: Vec<String>,
}

impl RecentSearches {
    /// Load the list for `key` from a store, keeping at most `cap` entries.
    pub fn load(store: &impl SearchStore, key: impl Into<String>, cap: usize) -> Self {
        let key = key.into();
        let mut entries = store.load(&key).unwrap_or_default();
        entries.truncate(cap);

        Self { key, cap, entries }
    }

    /// Record a search term at the front of the list.
    ///
    /// An existing occurrence of the same term moves to the front rather than
    /// duplicating; blank terms are ignored. The list stays within its cap.
    pub fn record(&mut self, term: &str) {
        let term = term.trim();

        if term.is_empty() {
            return;
        }

        self.entries.retain(|existing| existing != term);
        self.entries.insert(0, term.to_string());
        self.entries.truncate(self.cap);
    }

    /// Return the entries, most recent first.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Write the current list back to a store.
    pub fn persist(&self, store: &mut impl SearchStore) {
        store.save(&self.key, &self.entries);
    }
}
