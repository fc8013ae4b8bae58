//! Rejection code lookup and search.

use mhhs_model::{Catalogue, Interface, RejectionCode};
use tracing::debug;

/// Rejection codes an interface declares, in declared order.
///
/// Ids without a catalogue entry are skipped.
pub fn codes_for<'a>(
    interface: &Interface,
    catalogue: &'a Catalogue,
) -> Vec<(&'a str, &'a RejectionCode)> {
    interface
        .rejection_code_ids
        .iter()
        .filter_map(|id| match catalogue.rejection_codes.get_key_value(id) {
            Some((key, code)) => Some((key.as_str(), code)),
            None => {
                debug!(interface = %interface.id, code = %id, "skipping missing rejection code");
                None
            }
        })
        .collect()
}

/// All rejection codes whose id, description, reason or resolution contains
/// `term` (case-insensitive). A blank term returns every code.
pub fn search_rejection_codes<'a>(
    catalogue: &'a Catalogue,
    term: &str,
) -> Vec<(&'a str, &'a RejectionCode)> {
    let term = term.trim().to_lowercase();
    catalogue
        .rejection_codes
        .iter()
        .filter(|(id, code)| term.is_empty() || searchable_text(id, code).contains(&term))
        .map(|(id, code)| (id.as_str(), code))
        .collect()
}

fn searchable_text(id: &str, code: &RejectionCode) -> String {
    format!(
        "{} {} {} {}",
        id,
        code.description,
        code.reason.as_deref().unwrap_or_default(),
        code.resolution.as_deref().unwrap_or_default()
    )
    .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalogue() -> Catalogue {
        let mut catalogue = Catalogue::default();
        catalogue.rejection_codes.insert(
            "REJ-002".to_string(),
            RejectionCode {
                description: "Invalid MPAN".to_string(),
                reason: Some("Checksum failed".to_string()),
                resolution: None,
            },
        );
        catalogue.rejection_codes.insert(
            "REJ-001".to_string(),
            RejectionCode {
                description: "Unknown meter".to_string(),
                reason: None,
                resolution: Some("Register the meter first".to_string()),
            },
        );
        catalogue
    }

    #[test]
    fn codes_follow_declared_order_and_skip_missing() {
        let catalogue = catalogue();
        let interface = Interface {
            id: "IF-001".to_string(),
            rejection_code_ids: vec![
                "REJ-002".to_string(),
                "REJ-404".to_string(),
                "REJ-001".to_string(),
            ],
            ..Interface::default()
        };

        let ids: Vec<&str> = codes_for(&interface, &catalogue)
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec!["REJ-002", "REJ-001"]);
    }

    #[test]
    fn blank_term_returns_all_codes_sorted_by_id() {
        let catalogue = catalogue();
        let ids: Vec<&str> = search_rejection_codes(&catalogue, " ")
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec!["REJ-001", "REJ-002"]);
    }

    #[test]
    fn term_searches_every_field() {
        let catalogue = catalogue();
        assert_eq!(search_rejection_codes(&catalogue, "checksum")[0].0, "REJ-002");
        assert_eq!(search_rejection_codes(&catalogue, "REGISTER")[0].0, "REJ-001");
        assert_eq!(search_rejection_codes(&catalogue, "rej-00").len(), 2);
        assert!(search_rejection_codes(&catalogue, "tariff").is_empty());
    }
}
