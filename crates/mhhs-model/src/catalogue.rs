//! Catalogue records as they appear in the interface data document.
//!
//! The document is maintained by hand, so every field except the interface id
//! is optional on the wire and defaults to an empty value. Records with odd
//! scalar types (numeric examples, `"Y"` flags) are coerced, `null` reads as
//! empty, and records that cannot be read at all are dropped.

use std::collections::BTreeMap;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::composition::CompositionNode;
use crate::enums::{Cmo, SupplierType};
use crate::lenient::{self, Entry, Scalar};

/// The full catalogue: interfaces plus the shared block, item and rejection
/// code collections they reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalogue {
    /// Interfaces without a usable id are dropped.
    #[serde(default, deserialize_with = "lenient::list")]
    pub interfaces: Vec<Interface>,
    #[serde(rename = "dataItemsCatalogue", default, deserialize_with = "lenient::map")]
    pub data_items: BTreeMap<String, DataItem>,
    #[serde(rename = "dataBlocksCatalogue", default, deserialize_with = "lenient::map")]
    pub data_blocks: BTreeMap<String, DataBlock>,
    #[serde(
        rename = "rejectionCodesCatalogue",
        default,
        deserialize_with = "lenient::map"
    )]
    pub rejection_codes: BTreeMap<String, RejectionCode>,
}

impl Catalogue {
    /// Find an interface by id.
    pub fn interface(&self, id: &str) -> Option<&Interface> {
        self.interfaces.iter().find(|interface| interface.id == id)
    }

    pub fn block(&self, id: &str) -> Option<&DataBlock> {
        self.data_blocks.get(id)
    }

    pub fn item(&self, id: &str) -> Option<&DataItem> {
        self.data_items.get(id)
    }

    pub fn rejection_code(&self, id: &str) -> Option<&RejectionCode> {
        self.rejection_codes.get(id)
    }

    /// Returns true if the catalogue has no interfaces.
    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }
}

/// A message exchange between a sender and a receiver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interface {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub sender: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub receiver: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub context: String,
    #[serde(
        rename = "supplier_type",
        alias = "supplierType",
        default,
        deserialize_with = "supplier_type"
    )]
    pub supplier_type: SupplierType,
    #[serde(default, deserialize_with = "composition")]
    pub composition: Vec<CompositionNode>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub event_codes: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub rejection_code_ids: Vec<String>,
}

/// A named, reusable group of data items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataBlock {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    /// Data item ids in declared order.
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub items: Vec<String>,
    /// Payload key for the block when exported (e.g. `MPAN`).
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub short_code: Option<String>,
    /// Top-level payload section the block belongs to (e.g. `CommonBlock`).
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub group: Option<String>,
}

/// A single field definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataItem {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    /// Raw requirement letter (`M`, `O`, `C`). See [`DataItem::requirement`].
    #[serde(default, deserialize_with = "lenient::text")]
    pub cmo: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub rule: String,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub example: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub enumerated: bool,
    #[serde(default, deserialize_with = "population_notes")]
    pub population_notes: Option<PopulationNotes>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub payload_key: Option<String>,
}

impl DataItem {
    /// Parsed requirement level, `None` when the catalogue value is unrecognised.
    pub fn requirement(&self) -> Option<Cmo> {
        self.cmo.parse().ok()
    }

    /// Returns true if the item is mandatory.
    pub fn is_mandatory(&self) -> bool {
        self.requirement().is_some_and(|cmo| cmo.is_required())
    }
}

/// Enumeration notes: either a list of literal codes or free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PopulationNotes {
    List(Vec<String>),
    Text(String),
}

impl PopulationNotes {
    pub fn is_empty(&self) -> bool {
        match self {
            PopulationNotes::List(values) => values.is_empty(),
            PopulationNotes::Text(text) => text.trim().is_empty(),
        }
    }

    /// Flattened display text (list entries joined by newlines).
    pub fn display_text(&self) -> String {
        match self {
            PopulationNotes::List(values) => values.join("\n"),
            PopulationNotes::Text(text) => text.clone(),
        }
    }
}

/// Why a submitted message may be rejected and how to fix it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RejectionCode {
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub reason: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub resolution: Option<String>,
}

fn supplier_type<'de, D>(deserializer: D) -> Result<SupplierType, D::Error>
where
    D: Deserializer<'de>,
{
    lenient::text(deserializer).map(SupplierType::from)
}

/// Composition entries that are not objects are kept as
/// [`CompositionNode::Unknown`] so node positions stay stable.
fn composition<'de, D>(deserializer: D) -> Result<Vec<CompositionNode>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient::list::<D, Entry<CompositionNode>>(deserializer)?
        .into_iter()
        .map(|entry| entry.into_value().unwrap_or(CompositionNode::Unknown))
        .collect())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNotes {
    List(Vec<Entry<Scalar>>),
    Text(Scalar),
    Other(IgnoredAny),
}

fn population_notes<'de, D>(deserializer: D) -> Result<Option<PopulationNotes>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawNotes>::deserialize(deserializer)? {
        Some(RawNotes::List(entries)) => Some(PopulationNotes::List(
            entries
                .into_iter()
                .filter_map(Entry::into_value)
                .map(Scalar::into_text)
                .collect(),
        )),
        Some(RawNotes::Text(scalar)) => Some(PopulationNotes::Text(scalar.into_text())),
        Some(RawNotes::Other(_)) | None => None,
    })
}
