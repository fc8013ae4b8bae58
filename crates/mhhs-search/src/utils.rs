//! Text helpers shared by the search components.

/// Normalizes text for comparison by lowercasing and replacing separators with spaces.
pub fn normalize_text(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(['_', '-', '.', '/', '\\'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits a query into lowercase search terms, dropping empty ones.
pub fn query_terms(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_replaces_separators() {
        assert_eq!(normalize_text("  IF-021/Meter_Read "), "if 021 meter read");
    }

    #[test]
    fn query_terms_drop_blanks() {
        assert_eq!(query_terms("  Meter   READ "), vec!["meter", "read"]);
        assert!(query_terms("   ").is_empty());
    }
}
