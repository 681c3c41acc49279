//! Recent artist searches
//!
//! An ordered, most-recent-first list of distinct terms, mirrored to
//! [`Storage`] as a JSON array under a single key. Read once at startup,
//! written on every change.

use super::Storage;

pub const RECENT_SEARCHES_KEY: &str = "recentSearches";

pub struct RecentSearches {
    storage: Storage,
    terms: Vec<String>,
    limit: usize,
}

impl RecentSearches {
    /// Load persisted terms. Missing or malformed data yields an empty list.
    pub fn load(storage: Storage, limit: usize) -> Self {
        let terms = match storage.get(RECENT_SEARCHES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(mut terms) => {
                    terms.retain(|t| !t.trim().is_empty());
                    dedup_keep_first(&mut terms);
                    terms.truncate(limit);
                    terms
                }
                Err(e) => {
                    tracing::warn!("ignoring malformed recent searches: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("could not read recent searches: {e:#}");
                Vec::new()
            }
        };

        Self { storage, terms, limit }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Record a term. Blank terms and terms already present are ignored
    /// (existing entries are not moved). Returns whether the list changed.
    pub fn add(&mut self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() || self.terms.iter().any(|t| t == term) {
            return false;
        }

        self.terms.insert(0, term.to_string());
        self.terms.truncate(self.limit);
        self.persist();
        true
    }

    pub fn clear(&mut self) {
        self.terms.clear();
        if let Err(e) = self.storage.remove(RECENT_SEARCHES_KEY) {
            tracing::warn!("could not clear recent searches: {e:#}");
        }
    }

    fn persist(&self) {
        let raw = match serde_json::to_string(&self.terms) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("could not encode recent searches: {e}");
                return;
            }
        };
        if let Err(e) = self.storage.set(RECENT_SEARCHES_KEY, &raw) {
            tracing::warn!("could not save recent searches: {e:#}");
        }
    }
}

fn dedup_keep_first(terms: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    terms.retain(|t| seen.insert(t.clone()));
}
