//! Explicit browsing state over a loaded catalogue.
//!
//! A [`Session`] owns the catalogue, its search index and everything the user
//! has chosen: query, category filter, selection and favorites. The result
//! list is recomputed whenever the query or filter changes; typed queries go
//! through a debouncer first.

use std::time::{Duration, Instant};

use mhhs_catalogue::{PreferenceStore, Settings};
use mhhs_form::Form;
use mhhs_model::{Catalogue, CategoryFilter, Interface, RejectionCode};
use mhhs_search::{
    ResolvedComposition, SearchIndex, apply, codes_for, resolve_in, search_rejection_codes,
    suggest,
};
use tracing::{debug, info, warn};

use crate::debounce::Debouncer;
use crate::error::{Result, SessionError};
use crate::favorites::Favorites;
use crate::params::SessionParams;

#[derive(Debug, Clone)]
pub struct Session {
    catalogue: Catalogue,
    index: SearchIndex,
    settings: Settings,
    search_term: String,
    filter: CategoryFilter,
    selected: Option<String>,
    favorites: Favorites,
    debouncer: Debouncer,
    results: Vec<String>,
}

impl Session {
    /// Start a session. A missing catalogue is fatal.
    pub fn initialize(catalogue: Option<Catalogue>, settings: Settings) -> Result<Self> {
        let catalogue = catalogue.ok_or(SessionError::CatalogueUnavailable)?;
        let index = SearchIndex::build(&catalogue)
            .with_recall_threshold(settings.search.search_threshold);
        let debouncer = Debouncer::new(Duration::from_millis(settings.search.debounce_ms));
        let mut session = Self {
            catalogue,
            index,
            settings,
            search_term: String::new(),
            filter: CategoryFilter::All,
            selected: None,
            favorites: Favorites::new(),
            debouncer,
            results: Vec::new(),
        };
        session.recompute();
        info!(
            interfaces = session.catalogue.interfaces.len(),
            "session initialized"
        );
        Ok(session)
    }

    /// Start a session from reflected query parameters.
    pub fn with_params(
        catalogue: Option<Catalogue>,
        settings: Settings,
        params: SessionParams,
    ) -> Result<Self> {
        let mut session = Self::initialize(catalogue, settings)?;
        session.search_term = params.search;
        session.filter = params.filter;
        session.recompute();
        if let Some(id) = params.selected
            && let Err(error) = session.select(&id)
        {
            debug!(%error, "ignoring selected parameter");
        }
        Ok(session)
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Current state for writing back into query parameters.
    pub fn params(&self) -> SessionParams {
        SessionParams {
            search: self.search_term.clone(),
            filter: self.filter,
            selected: self.selected.clone(),
        }
    }

    /// Record typed input; results refresh on a later [`Session::poll`].
    pub fn set_search_term(&mut self, term: impl Into<String>, now: Instant) {
        self.search_term = term.into();
        self.debouncer.schedule(now);
    }

    /// Refresh results if typed input has settled. Returns true if it did.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.debouncer.poll(now) {
            self.recompute();
            true
        } else {
            false
        }
    }

    /// Take a suggestion as the query and refresh immediately.
    pub fn apply_suggestion(&mut self, suggestion: &str) {
        self.debouncer.cancel();
        self.search_term = suggestion.to_string();
        self.recompute();
    }

    /// Set the query and refresh immediately.
    pub fn search_now(&mut self, term: impl Into<String>) {
        self.debouncer.cancel();
        self.search_term = term.into();
        self.recompute();
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
        self.recompute();
    }

    /// Completions for the current query.
    pub fn suggestions(&self) -> Vec<String> {
        suggest(
            &self.search_term,
            &self.catalogue.interfaces,
            self.settings.search.suggestion_limit,
            self.settings.search.match_threshold,
        )
    }

    /// Filtered and ranked interfaces.
    pub fn results(&self) -> Vec<&Interface> {
        self.results
            .iter()
            .filter_map(|id| self.catalogue.interface(id))
            .collect()
    }

    /// Select an interface by id. Unknown ids leave the selection unchanged.
    pub fn select(&mut self, id: &str) -> Result<&Interface> {
        let Some(interface) = self.catalogue.interface(id) else {
            return Err(SessionError::UnknownInterface { id: id.to_string() });
        };
        self.selected = Some(interface.id.clone());
        Ok(interface)
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&Interface> {
        self.selected
            .as_deref()
            .and_then(|id| self.catalogue.interface(id))
    }

    fn require_selected(&self) -> Result<&Interface> {
        self.selected().ok_or(SessionError::NothingSelected)
    }

    /// Data items of the selected interface.
    pub fn resolved_selected(&self) -> Result<ResolvedComposition<'_>> {
        let interface = self.require_selected()?;
        Ok(resolve_in(interface, &self.catalogue))
    }

    /// Rejection codes declared by the selected interface.
    pub fn selected_rejection_codes(&self) -> Result<Vec<(&str, &RejectionCode)>> {
        let interface = self.require_selected()?;
        Ok(codes_for(interface, &self.catalogue))
    }

    /// Search the whole rejection code reference.
    pub fn search_rejection_codes(&self, term: &str) -> Vec<(&str, &RejectionCode)> {
        search_rejection_codes(&self.catalogue, term)
    }

    /// Data entry form for the selected interface.
    pub fn form_for_selected(&self) -> Result<Form> {
        let interface = self.require_selected()?;
        Ok(Form::build(
            interface,
            &self.catalogue,
            &self.settings.export.schema_version,
        ))
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    /// Toggle a favorite and persist the set. Returns true if now a favorite.
    ///
    /// When the set cannot be saved the toggle is undone.
    pub fn toggle_favorite<S: PreferenceStore>(&mut self, id: &str, store: &mut S) -> Result<bool> {
        if self.catalogue.interface(id).is_none() {
            return Err(SessionError::UnknownInterface { id: id.to_string() });
        }
        let now_favorite = self.favorites.toggle(id);
        if let Err(error) = self.favorites.save(store) {
            self.favorites.toggle(id);
            warn!(interface = id, %error, "could not save favorites, toggle reverted");
            return Err(error);
        }
        info!(interface = id, favorite = now_favorite, "toggled favorite");
        Ok(now_favorite)
    }

    pub fn load_favorites<S: PreferenceStore>(&mut self, store: &S) {
        self.favorites.load(store);
    }

    pub fn save_favorites<S: PreferenceStore>(&self, store: &mut S) -> Result<()> {
        self.favorites.save(store)
    }

    /// Clear query, filter and selection. Catalogue and favorites are kept.
    pub fn reset(&mut self) {
        self.debouncer.cancel();
        self.search_term.clear();
        self.filter = CategoryFilter::All;
        self.selected = None;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.results = apply(
            &self.index,
            &self.catalogue.interfaces,
            self.filter,
            &self.search_term,
        )
        .into_iter()
        .map(|interface| interface.id.clone())
        .collect();
        debug!(
            query = %self.search_term,
            filter = %self.filter,
            results = self.results.len(),
            "recomputed results"
        );
    }
}
