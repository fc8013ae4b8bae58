//! Favorite interface ids.

use std::collections::BTreeSet;

use mhhs_catalogue::{FAVORITES_KEY, PreferenceStore};
use tracing::{debug, warn};

use crate::error::Result;

/// Set of favorited interface ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    ids: BTreeSet<String>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Add or remove `id`; returns true if it is now a favorite.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Replace the set with what `store` holds.
    ///
    /// A missing key leaves the set unchanged; so does a read or decode
    /// failure, which is logged.
    pub fn load<S: PreferenceStore>(&mut self, store: &S) {
        match store.read_json::<Vec<String>>(FAVORITES_KEY) {
            Ok(Some(ids)) => {
                self.ids = ids.into_iter().collect();
                debug!(count = self.ids.len(), "loaded favorites");
            }
            Ok(None) => {}
            Err(error) => warn!(%error, "could not load favorites"),
        }
    }

    /// Persist the set as a JSON array.
    pub fn save<S: PreferenceStore>(&self, store: &mut S) -> Result<()> {
        let ids: Vec<&str> = self.iter().collect();
        store.write_json(FAVORITES_KEY, &ids)?;
        debug!(count = ids.len(), "saved favorites");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mhhs_catalogue::MemoryPreferenceStore;

    #[test]
    fn toggle_adds_then_removes() {
        let mut favorites = Favorites::new();
        assert!(favorites.toggle("IF-001"));
        assert!(favorites.contains("IF-001"));
        assert!(!favorites.toggle("IF-001"));
        assert!(favorites.is_empty());
    }

    #[test]
    fn save_then_load() {
        let mut store = MemoryPreferenceStore::new();
        let mut favorites = Favorites::new();
        favorites.toggle("IF-002");
        favorites.toggle("IF-001");
        favorites.save(&mut store).unwrap();

        assert_eq!(
            store.read(FAVORITES_KEY).unwrap().as_deref(),
            Some(r#"["IF-001","IF-002"]"#)
        );

        let mut loaded = Favorites::new();
        loaded.load(&store);
        assert_eq!(loaded, favorites);
    }

    #[test]
    fn corrupt_value_leaves_set_unchanged() {
        let mut store = MemoryPreferenceStore::new();
        store.write(FAVORITES_KEY, "{not json").unwrap();

        let mut favorites = Favorites::new();
        favorites.toggle("IF-009");
        favorites.load(&store);

        assert_eq!(favorites.iter().collect::<Vec<_>>(), vec!["IF-009"]);
    }
}
