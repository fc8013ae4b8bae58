//! Input kind inference from data item metadata.
//!
//! A best-effort reading of natural-language names and rules. Wrong guesses
//! are harmless because every kind renders as plain text when unsure.

use std::fmt;
use std::sync::LazyLock;

use mhhs_model::DataItem;
use regex::Regex;
use serde::Serialize;

/// How a field value is entered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// Date or date-time; the catalogue does not distinguish them.
    #[serde(rename = "datetime")]
    DateTime,
    Number,
    #[serde(rename = "textarea")]
    TextArea,
    #[default]
    Text,
}

impl InputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::DateTime => "datetime",
            InputKind::Number => "number",
            InputKind::TextArea => "textarea",
            InputKind::Text => "text",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

static DATE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:date|time)\b").expect("Invalid date word regex"));

static NUMBER_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:number|quantity)\b").expect("Invalid number word regex")
});

static TEXTAREA_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:description|additional\s+information)\b")
        .expect("Invalid textarea word regex")
});

static NUMERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?\d+(?:\.\d+)?$").expect("Invalid numeral regex"));

/// Classify a field from its name, rule and example.
pub fn infer_input_kind(name: &str, rule: &str, example: Option<&str>) -> InputKind {
    if DATE_WORD.is_match(name) || DATE_WORD.is_match(rule) {
        return InputKind::DateTime;
    }
    if NUMBER_WORD.is_match(name) || example.is_some_and(|e| NUMERAL.is_match(e.trim())) {
        return InputKind::Number;
    }
    if TEXTAREA_WORD.is_match(name) {
        return InputKind::TextArea;
    }
    InputKind::Text
}

/// [`infer_input_kind`] over a catalogue item.
pub fn infer_for(item: &DataItem) -> InputKind {
    infer_input_kind(&item.name, &item.rule, item.example.as_deref())
}
