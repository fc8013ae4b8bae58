//! Enumeration options from population notes.
//!
//! Notes arrive either as a list of literal codes or as free text written in
//! one of several conventions:
//!
//! ```text
//! C - Created          CODE - description
//! A = Active           CODE = description
//! 'X' Cancelled        quoted code
//! IF-001 - Legacy      code containing hyphens, spaced separator
//! A - Alpha, B - Beta  several entries on one line
//! _A, _B, _C           bare code list
//! ```
//!
//! Parsing never fails. Lines that fit no convention contribute nothing and an
//! empty result means the field falls back to free text. `CODE description`
//! with no separator is only trusted when the notes hold several entries and
//! every one of them has a code; a lone sentence such as `A valid MPAN` stays
//! free text.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use mhhs_model::PopulationNotes;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

/// One selectable value of an enumerated field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumerationOption {
    pub value: String,
    pub label: String,
}

impl EnumerationOption {
    fn new(value: impl Into<String>, description: Option<&str>) -> Self {
        let value = value.into();
        let label = match description.map(str::trim).filter(|d| !d.is_empty()) {
            Some(description) => format!("{value} - {description}"),
            None => value.clone(),
        };
        Self { value, label }
    }
}

/// `'CODE' description` with an optional separator after the quotes.
static QUOTED_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^['"]([^'"]+)['"]\s*(?:[-=:]\s*)?(.*)$"#).expect("Invalid quoted entry regex")
});

/// `CODE - description` with whitespace around the separator. The code is
/// the whole leading token, hyphens included.
static SPACED_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\S+?)\s+[-=]\s+(.*)$").expect("Invalid spaced entry regex")
});

/// `CODE-description` or `CODE=description`.
static SEPARATED_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_]+(?:[./][A-Za-z0-9_]+)*)\s*[-=]\s*(.*)$")
        .expect("Invalid separated entry regex")
});

/// `CODE description` without a separator. Codes here must not contain
/// lowercase letters so that ordinary prose is not read as a code.
static BARE_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z0-9_]+(?:[./][A-Z0-9_]+)*)(?:\s+(.*))?$").expect("Invalid bare entry regex")
});

/// Start of a new entry inside a comma-separated line.
static ENTRY_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:(?:'[^']+'|"[^"]+"|[A-Za-z0-9_]+)\s*[-=]\s*|\S+\s+[-=]\s+)\S"#)
        .expect("Invalid entry start regex")
});

/// Parse catalogue notes into options, first-seen order, unique by value.
pub fn parse_population_notes(notes: &PopulationNotes) -> Vec<EnumerationOption> {
    match notes {
        PopulationNotes::List(values) => {
            let mut seen = BTreeSet::new();
            values
                .iter()
                .filter(|value| seen.insert(value.as_str()))
                .map(|value| EnumerationOption::new(value.as_str(), None))
                .collect()
        }
        PopulationNotes::Text(text) => parse_notes_text(text),
    }
}

/// Parse free-text notes.
pub fn parse_notes_text(raw: &str) -> Vec<EnumerationOption> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    let text = normalize_typography(raw);

    let entries = split_entries(&text);
    let parsed: Vec<Option<ParsedEntry>> = entries
        .iter()
        .map(|entry| {
            let parsed = parse_entry(entry);
            if parsed.is_none() {
                debug!(entry = %entry, "population note entry has no code");
            }
            parsed
        })
        .collect();
    let trust_loose = parsed.len() > 1 && parsed.iter().all(Option::is_some);

    let mut options = Vec::new();
    let mut seen = BTreeSet::new();
    for entry in parsed.into_iter().flatten() {
        if entry.loose && !trust_loose {
            continue;
        }
        if seen.insert(entry.option.value.clone()) {
            options.push(entry.option);
        }
    }

    if options.is_empty() && text.contains(',') {
        return parse_code_list(&text);
    }
    options
}

fn normalize_typography(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => '\'',
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => '"',
            '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2212}' => '-',
            '\u{00A0}' => ' ',
            other => other,
        })
        .collect()
}

fn split_entries(text: &str) -> Vec<String> {
    let mut entries = Vec::new();
    for line in text.lines() {
        let line = strip_bullet(line.trim());
        if line.is_empty() {
            continue;
        }
        let mut current: Option<String> = None;
        for piece in line.split(',') {
            let piece = piece.trim();
            match current.as_mut() {
                Some(entry) if !ENTRY_START.is_match(piece) => {
                    entry.push_str(", ");
                    entry.push_str(piece);
                }
                _ => {
                    if let Some(entry) = current.take() {
                        entries.push(entry);
                    }
                    current = Some(strip_bullet(piece).to_string());
                }
            }
        }
        entries.extend(current);
    }
    entries.retain(|entry| !entry.trim().is_empty());
    entries
}

fn strip_bullet(entry: &str) -> &str {
    match entry.strip_prefix('-') {
        Some(rest) if rest.starts_with(char::is_whitespace) || rest.is_empty() => rest.trim_start(),
        _ => entry,
    }
}

struct ParsedEntry {
    option: EnumerationOption,
    /// Read as `CODE description` with no separator.
    loose: bool,
}

fn parse_entry(entry: &str) -> Option<ParsedEntry> {
    let entry = entry.trim();
    let (caps, bare) = match QUOTED_ENTRY
        .captures(entry)
        .or_else(|| SPACED_ENTRY.captures(entry))
        .or_else(|| SEPARATED_ENTRY.captures(entry))
    {
        Some(caps) => (caps, false),
        None => (BARE_ENTRY.captures(entry)?, true),
    };
    let code = caps.get(1)?.as_str().trim();
    if code.is_empty() {
        return None;
    }
    let description = caps.get(2).map(|m| m.as_str());
    let loose = bare && description.is_some_and(|d| !d.trim().is_empty());
    Some(ParsedEntry {
        option: EnumerationOption::new(code, description),
        loose,
    })
}

fn parse_code_list(text: &str) -> Vec<EnumerationOption> {
    let mut seen = BTreeSet::new();
    text.split([',', '\n'])
        .map(|code| code.trim().trim_matches(|c| c == '\'' || c == '"').trim())
        .filter(|code| !code.is_empty())
        .filter(|code| seen.insert(code.to_string()))
        .map(|code| EnumerationOption::new(code, None))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(value: &str, label: &str) -> EnumerationOption {
        EnumerationOption {
            value: value.to_string(),
            label: label.to_string(),
        }
    }

    fn text(notes: &str) -> Vec<EnumerationOption> {
        parse_population_notes(&PopulationNotes::Text(notes.to_string()))
    }

    #[test]
    fn hyphen_separated_lines() {
        assert_eq!(
            text("C - Created\nD - Deleted"),
            vec![option("C", "C - Created"), option("D", "D - Deleted")]
        );
    }

    #[test]
    fn list_passes_through() {
        let notes = PopulationNotes::List(vec!["A".to_string(), "B".to_string()]);
        assert_eq!(
            parse_population_notes(&notes),
            vec![option("A", "A"), option("B", "B")]
        );
    }

    #[test]
    fn bare_code_list() {
        assert_eq!(
            text("_A, _B, _C"),
            vec![option("_A", "_A"), option("_B", "_B"), option("_C", "_C")]
        );
    }

    #[test]
    fn equals_and_quoted_forms() {
        assert_eq!(
            text("A = Active\n'I' Inactive\n\"P\" - Pending"),
            vec![
                option("A", "A - Active"),
                option("I", "I - Inactive"),
                option("P", "P - Pending"),
            ]
        );
    }

    #[test]
    fn typographic_quotes_and_dashes() {
        assert_eq!(
            text("\u{2018}R\u{2019} \u{2013} Removed\nS \u{2014} Suspended"),
            vec![option("R", "R - Removed"), option("S", "S - Suspended")]
        );
    }

    #[test]
    fn comma_separated_entries_on_one_line() {
        assert_eq!(
            text("A - Alpha, incl. spares, B - Beta"),
            vec![option("A", "A - Alpha, incl. spares"), option("B", "B - Beta")]
        );
    }

    #[test]
    fn blank_lines_and_bullets() {
        assert_eq!(
            text("- 01 - Single rate\n\n- 02 - Dual rate\n"),
            vec![option("01", "01 - Single rate"), option("02", "02 - Dual rate")]
        );
    }

    #[test]
    fn duplicates_keep_first() {
        assert_eq!(
            text("A - First\nA - Second"),
            vec![option("A", "A - First")]
        );
    }

    #[test]
    fn codes_without_description() {
        assert_eq!(text("Y\nN"), vec![option("Y", "Y"), option("N", "N")]);
    }

    #[test]
    fn hyphenated_codes_keep_their_hyphens() {
        assert_eq!(
            text("E7 - Economy 7\nIF-001 - Legacy"),
            vec![option("E7", "E7 - Economy 7"), option("IF-001", "IF-001 - Legacy")]
        );
    }

    #[test]
    fn comma_joined_hyphenated_codes() {
        assert_eq!(
            text("MS-1 - Smart, MS-2 - Legacy"),
            vec![option("MS-1", "MS-1 - Smart"), option("MS-2", "MS-2 - Legacy")]
        );
    }

    #[test]
    fn unseparated_codes_need_company() {
        assert_eq!(
            text("R1 Reading taken\nR2 Reading estimated"),
            vec![
                option("R1", "R1 - Reading taken"),
                option("R2", "R2 - Reading estimated"),
            ]
        );
    }

    #[test]
    fn sentence_starting_with_capital_stays_free_text() {
        assert!(text("A valid 13 digit MPAN as held by the registration service").is_empty());
        assert!(text("MPAN of the metering point\nSee the registration rules").is_empty());
    }

    #[test]
    fn prose_yields_nothing() {
        assert!(text("Free text as agreed with the recipient").is_empty());
        assert!(text("   ").is_empty());
    }
}
