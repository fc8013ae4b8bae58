//! Query completions drawn from interface ids and names.

use std::collections::BTreeSet;

use mhhs_model::Interface;

use crate::similarity::fuzzy_match;
use crate::utils::normalize_text;

/// Up to `limit` distinct completions for `partial`.
///
/// Candidates whose normalised form starts with the normalised partial come
/// first in catalogue order, followed by fuzzy matches best score first.
/// Duplicates are dropped case-insensitively. A blank partial yields nothing.
pub fn suggest<'a, I>(partial: &str, interfaces: I, limit: usize, threshold: f64) -> Vec<String>
where
    I: IntoIterator<Item = &'a Interface>,
{
    let needle = normalize_text(partial);
    if needle.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut prefixed: Vec<&'a str> = Vec::new();
    let mut fuzzy: Vec<(&'a str, f64)> = Vec::new();

    for interface in interfaces {
        for candidate in [interface.id.as_str(), interface.name.as_str()] {
            if candidate.trim().is_empty() {
                continue;
            }
            if normalize_text(candidate).starts_with(&needle) {
                prefixed.push(candidate);
                continue;
            }
            let result = fuzzy_match(partial.trim(), candidate, threshold);
            if result.matches {
                fuzzy.push((candidate, result.score));
            }
        }
    }
    fuzzy.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut seen = BTreeSet::new();
    prefixed
        .into_iter()
        .chain(fuzzy.into_iter().map(|(candidate, _)| candidate))
        .filter(|candidate| seen.insert(candidate.to_lowercase()))
        .take(limit)
        .map(str::to_string)
        .collect()
}
