//! Tolerant field deserializers for the hand-maintained catalogue document.
//!
//! A field with the wrong shape decays to its empty value, and a malformed
//! list or map entry is dropped. Only the document as a whole can fail.

use std::collections::BTreeMap;

use serde::de::{Error, IgnoredAny};
use serde::{Deserialize, Deserializer};

/// Any JSON scalar, read as text.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

impl Scalar {
    pub(crate) fn into_text(self) -> String {
        match self {
            Scalar::Text(text) => text,
            Scalar::Integer(value) => value.to_string(),
            Scalar::Float(value) => value.to_string(),
            Scalar::Flag(value) => value.to_string(),
        }
    }
}

/// A value of `T`, or anything else.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum Entry<T> {
    Value(T),
    Other(IgnoredAny),
}

impl<T> Entry<T> {
    pub(crate) fn into_value(self) -> Option<T> {
        match self {
            Entry::Value(value) => Some(value),
            Entry::Other(_) => None,
        }
    }
}

fn scalar<'de, D>(deserializer: D) -> Result<Option<Scalar>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Entry<Scalar>>::deserialize(deserializer)?;
    Ok(value.and_then(Entry::into_value))
}

/// Required identifier: any non-blank scalar.
pub(crate) fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let text = Scalar::deserialize(deserializer)?.into_text();
    if text.trim().is_empty() {
        return Err(D::Error::custom("blank identifier"));
    }
    Ok(text)
}

/// Text field; `null` and non-scalars read as empty.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar(deserializer)?
        .map(Scalar::into_text)
        .unwrap_or_default())
}

/// Optional text field; blank values read as `None`.
pub(crate) fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar(deserializer)?
        .map(Scalar::into_text)
        .filter(|text| !text.trim().is_empty()))
}

/// Flag field accepting booleans, `0`/`1` and `Y`/`yes`/`true` strings.
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match scalar(deserializer)? {
        Some(Scalar::Flag(flag)) => flag,
        Some(Scalar::Integer(value)) => value != 0,
        Some(Scalar::Text(text)) => matches!(
            text.trim().to_lowercase().as_str(),
            "y" | "yes" | "true" | "1"
        ),
        Some(Scalar::Float(_)) | None => false,
    })
}

/// List of ids; non-scalar and blank entries are dropped.
pub(crate) fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(list::<D, Scalar>(deserializer)?
        .into_iter()
        .map(Scalar::into_text)
        .filter(|text| !text.trim().is_empty())
        .collect())
}

/// List of records; entries that do not decode are dropped.
pub(crate) fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value = Option::<Entry<Vec<Entry<T>>>>::deserialize(deserializer)?;
    Ok(value
        .and_then(Entry::into_value)
        .unwrap_or_default()
        .into_iter()
        .filter_map(Entry::into_value)
        .collect())
}

/// Keyed records; entries that do not decode are dropped.
pub(crate) fn map<'de, D, T>(deserializer: D) -> Result<BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value = Option::<Entry<BTreeMap<String, Entry<T>>>>::deserialize(deserializer)?;
    Ok(value
        .and_then(Entry::into_value)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, entry)| entry.into_value().map(|value| (key, value)))
        .collect())
}
