//! Searchable content per interface and query ranking.

use std::collections::BTreeMap;

use mhhs_model::{Catalogue, Interface};
use tracing::debug;

use crate::resolver::resolve_in;
use crate::similarity::{DEFAULT_MATCH_THRESHOLD, SEARCH_RECALL_THRESHOLD, fuzzy_match};
use crate::utils::query_terms;

/// Lowercase text an interface is searched against.
///
/// Interface scalars come first, followed by ` {id} {name} {rule}` for every
/// data item the composition resolves to.
pub fn build_searchable_content(interface: &Interface, catalogue: &Catalogue) -> String {
    let mut content = [
        interface.id.as_str(),
        interface.name.as_str(),
        interface.description.as_str(),
        interface.sender.as_str(),
        interface.receiver.as_str(),
        interface.context.as_str(),
    ]
    .join(" ");

    for resolved in resolve_in(interface, catalogue).items() {
        content.push(' ');
        content.push_str(resolved.item_id);
        content.push(' ');
        content.push_str(&resolved.item.name);
        content.push(' ');
        content.push_str(&resolved.item.rule);
    }

    content.to_lowercase()
}

/// Cached searchable content for every interface in a catalogue.
///
/// Built once per catalogue; rebuild when the catalogue changes.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchIndex {
    content: BTreeMap<String, String>,
    recall_threshold: f64,
}

impl SearchIndex {
    /// Index every interface in `catalogue`.
    pub fn build(catalogue: &Catalogue) -> Self {
        let content: BTreeMap<String, String> = catalogue
            .interfaces
            .iter()
            .map(|interface| {
                (
                    interface.id.clone(),
                    build_searchable_content(interface, catalogue),
                )
            })
            .collect();
        debug!(interfaces = content.len(), "built search index");
        Self {
            content,
            recall_threshold: SEARCH_RECALL_THRESHOLD,
        }
    }

    /// Override the per-term recall threshold.
    pub fn with_recall_threshold(mut self, threshold: f64) -> Self {
        self.recall_threshold = threshold;
        self
    }

    pub fn recall_threshold(&self) -> f64 {
        self.recall_threshold
    }

    /// Cached content for an interface id.
    pub fn content(&self, interface_id: &str) -> Option<&str> {
        self.content.get(interface_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Score of the whole query against an interface, `0.0` when unindexed.
    pub fn score(&self, interface_id: &str, query: &str) -> f64 {
        self.content(interface_id)
            .map(|content| fuzzy_match(query, content, DEFAULT_MATCH_THRESHOLD).score)
            .unwrap_or(0.0)
    }

    /// Returns true if any query term reaches the recall threshold.
    pub fn matches(&self, interface_id: &str, terms: &[String]) -> bool {
        let Some(content) = self.content(interface_id) else {
            return false;
        };
        terms
            .iter()
            .any(|term| fuzzy_match(term, content, self.recall_threshold).matches)
    }

    /// Filter and order `interfaces` by `query`.
    ///
    /// A blank query returns the input unchanged. Otherwise interfaces with at
    /// least one matching term are kept and stable-sorted by the score of the
    /// full query, best first.
    pub fn rank<'a, I>(&self, interfaces: I, query: &str) -> Vec<&'a Interface>
    where
        I: IntoIterator<Item = &'a Interface>,
    {
        let terms = query_terms(query);
        if terms.is_empty() {
            return interfaces.into_iter().collect();
        }

        // Scored on the trimmed query so stray edge whitespace from typing
        // cannot cost a literal substring hit.
        let query = query.trim();
        let mut scored: Vec<(&'a Interface, f64)> = interfaces
            .into_iter()
            .filter(|interface| self.matches(&interface.id, &terms))
            .map(|interface| (interface, self.score(&interface.id, query)))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        debug!(query, matches = scored.len(), "ranked interfaces");
        scored.into_iter().map(|(interface, _)| interface).collect()
    }
}
