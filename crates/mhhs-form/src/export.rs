//! Validation of filled-in values and payload export.
//!
//! The exported document nests each block's values under `payload`:
//!
//! ```json
//! {
//!     "payload": {
//!         "CommonBlock": { "MTR": { "serialNumber": "S123" } },
//!         "DB-07": { "reading": "1042" }
//!     }
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::error::{FormError, Result};
use crate::form::{Form, FormField, FormHeader};
use crate::infer::InputKind;

/// Values entered on a form, keyed by data item id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormValues {
    pub sender_contact: Option<String>,
    pub receiver_contact: Option<String>,
    pub fields: BTreeMap<String, String>,
}

impl FormValues {
    pub fn set(&mut self, item_id: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(item_id.into(), value.into());
    }

    /// Trimmed value for an item, `None` when absent or blank.
    pub fn value(&self, item_id: &str) -> Option<&str> {
        self.fields
            .get(item_id)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }
}

/// A mandatory field left empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingField {
    pub block_title: String,
    pub item_id: String,
    pub name: String,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} ({})", self.block_title, self.name, self.item_id)
    }
}

/// Every mandatory field still missing a value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{} mandatory field(s) not filled", .missing.len())]
pub struct ValidationReport {
    pub missing: Vec<MissingField>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Check mandatory fields. Auto-populated fields are never reported.
pub fn validate(form: &Form, values: &FormValues) -> ValidationReport {
    let missing = form
        .blocks
        .iter()
        .flat_map(|block| block.fields.iter().map(move |field| (block, field)))
        .filter(|(_, field)| field.is_required() && values.value(&field.item_id).is_none())
        .map(|(block, field)| MissingField {
            block_title: block.title.clone(),
            item_id: field.item_id.clone(),
            name: field.name.clone(),
        })
        .collect();
    ValidationReport { missing }
}

/// A validated payload ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedPayload {
    pub file_name: String,
    /// Sender and receiver details; not part of [`ExportedPayload::document`].
    pub header: FormHeader,
    pub document: Value,
}

impl ExportedPayload {
    /// The document as JSON indented by four spaces.
    pub fn to_json(&self) -> Result<String> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.document.serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Write the document into `dir` under [`ExportedPayload::file_name`].
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.file_name);
        let json = self.to_json()?;
        fs::write(&path, format!("{json}\n")).map_err(|e| FormError::io(&path, e))?;
        info!(path = %path.display(), "exported payload");
        Ok(path)
    }
}

/// File name for an interface's exported payload.
pub fn payload_file_name(interface_id: &str) -> String {
    format!("{}_payload.json", interface_id.replace('/', "_"))
}

/// Validate `values` and build the payload document.
///
/// Blocks with no filled field are left out. Auto-populated fields always
/// carry their fixed value.
pub fn export(form: &Form, values: &FormValues) -> std::result::Result<ExportedPayload, ValidationReport> {
    let report = validate(form, values);
    if !report.is_valid() {
        warn!(
            interface = %form.header.interface_id,
            missing = report.missing.len(),
            "export refused"
        );
        return Err(report);
    }

    for item_id in values.fields.keys() {
        if !form.fields().any(|field| &field.item_id == item_id) {
            warn!(item = %item_id, "value for an item that is not on the form");
        }
    }

    let mut payload = Map::new();
    for block in &form.blocks {
        let entries: Map<String, Value> = block
            .fields
            .iter()
            .filter_map(|field| {
                field_value(field, values).map(|value| (field.payload_key.clone(), Value::String(value)))
            })
            .collect();
        if entries.is_empty() {
            continue;
        }
        insert_at(&mut payload, &block.target.path(), entries);
    }

    let mut document = Map::new();
    document.insert("payload".to_string(), Value::Object(payload));

    let mut header = form.header.clone();
    header.sender_contact = non_blank(values.sender_contact.as_deref());
    header.receiver_contact = non_blank(values.receiver_contact.as_deref());

    Ok(ExportedPayload {
        file_name: payload_file_name(&form.header.interface_id),
        header,
        document: Value::Object(document),
    })
}

fn field_value(field: &FormField, values: &FormValues) -> Option<String> {
    if let Some(auto) = &field.auto_value {
        return Some(auto.clone());
    }
    let raw = values.value(&field.item_id)?;
    Some(match field.kind {
        InputKind::DateTime => normalize_datetime(raw),
        _ => raw.to_string(),
    })
}

/// Local date-time input (`2024-05-01T09:30`) to `2024-05-01T09:30:00Z`.
/// Anything else is passed through.
pub fn normalize_datetime(raw: &str) -> String {
    const INPUT_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];
    let raw = raw.trim();
    INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|parsed| parsed.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn insert_at(root: &mut Map<String, Value>, path: &[&str], entries: Map<String, Value>) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };
    let mut target = root;
    for segment in parents {
        let slot = target
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(next) = slot else {
            return;
        };
        target = next;
    }
    match target.get_mut(*last) {
        Some(Value::Object(existing)) => existing.extend(entries),
        _ => {
            target.insert(last.to_string(), Value::Object(entries));
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
