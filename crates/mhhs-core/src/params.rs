//! Round-tripping session state through query parameters.

use mhhs_model::CategoryFilter;
use tracing::warn;

pub const SEARCH_PARAM: &str = "search";
pub const FILTER_PARAM: &str = "filter";
pub const SELECTED_PARAM: &str = "selected";

/// The externally visible part of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionParams {
    pub search: String,
    pub filter: CategoryFilter,
    pub selected: Option<String>,
}

impl SessionParams {
    /// Read known parameters from key/value pairs; unknown keys are ignored.
    ///
    /// An unrecognised filter value falls back to `all`.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key {
                SEARCH_PARAM => params.search = value.to_string(),
                FILTER_PARAM => {
                    params.filter = value.parse().unwrap_or_else(|error| {
                        warn!(%error, "ignoring filter parameter");
                        CategoryFilter::All
                    });
                }
                SELECTED_PARAM if !value.trim().is_empty() => {
                    params.selected = Some(value.to_string());
                }
                _ => {}
            }
        }
        params
    }

    /// Pairs worth writing back: search when non-empty, filter when not
    /// `all`, selected when set.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.search.is_empty() {
            pairs.push((SEARCH_PARAM, self.search.clone()));
        }
        if !self.filter.is_all() {
            pairs.push((FILTER_PARAM, self.filter.as_str().to_string()));
        }
        if let Some(selected) = &self.selected {
            pairs.push((SELECTED_PARAM, selected.clone()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mhhs_model::SupplierType;

    #[test]
    fn reads_known_pairs() {
        let params = SessionParams::from_pairs([
            ("search", "meter read"),
            ("filter", "supplier_send"),
            ("selected", "IF-021"),
            ("utm", "ignored"),
        ]);
        assert_eq!(params.search, "meter read");
        assert_eq!(params.filter, CategoryFilter::Supplier(SupplierType::Send));
        assert_eq!(params.selected.as_deref(), Some("IF-021"));
    }

    #[test]
    fn bad_filter_falls_back_to_all() {
        let params = SessionParams::from_pairs([("filter", "sideways")]);
        assert_eq!(params.filter, CategoryFilter::All);
    }

    #[test]
    fn default_params_write_nothing() {
        assert!(SessionParams::default().to_pairs().is_empty());
    }

    #[test]
    fn writes_only_meaningful_pairs() {
        let params = SessionParams {
            search: String::new(),
            filter: CategoryFilter::Supplier(SupplierType::Both),
            selected: Some("IF-001".to_string()),
        };
        assert_eq!(
            params.to_pairs(),
            vec![
                ("filter", "supplier_both".to_string()),
                ("selected", "IF-001".to_string()),
            ]
        );
    }
}
