//! Data entry form generated from an interface composition.

use mhhs_model::{Catalogue, Cmo, DataBlock, Interface, PopulationNotes};
use mhhs_search::{ResolvedItem, ResolvedRow, resolve_in};
use serde::Serialize;
use tracing::debug;

use crate::infer::{InputKind, infer_for};
use crate::notes::{EnumerationOption, parse_population_notes};

/// Payload name used for directly referenced items outside any header.
pub const STANDALONE_BLOCK: &str = "Items";

/// Fields filled in by the form itself rather than the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AutoField {
    InterfaceId,
    SchemaVersion,
}

impl AutoField {
    /// Recognise an auto-populated item by name or payload key.
    pub fn detect(name: &str, payload_key: Option<&str>) -> Option<Self> {
        [Some(name), payload_key]
            .into_iter()
            .flatten()
            .find_map(|candidate| match compact(candidate).as_str() {
                "interfaceid" | "interfaceidentifier" => Some(AutoField::InterfaceId),
                "schemaversion" | "schemaversionnumber" => Some(AutoField::SchemaVersion),
                _ => None,
            })
    }
}

fn compact(text: &str) -> String {
    text.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// One input on the form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub item_id: String,
    pub name: String,
    /// Key written to the payload: the item's payload key, else its id.
    pub payload_key: String,
    pub requirement: Option<Cmo>,
    pub kind: InputKind,
    /// Non-empty when the field is a selection.
    pub options: Vec<EnumerationOption>,
    pub rule: String,
    pub example: Option<String>,
    pub notes: Option<String>,
    pub auto: Option<AutoField>,
    /// Fixed value of an auto-populated field.
    pub auto_value: Option<String>,
}

impl FormField {
    fn from_resolved(resolved: &ResolvedItem<'_>, interface: &Interface, schema_version: &str) -> Self {
        let item = resolved.item;
        let auto = AutoField::detect(&item.name, item.payload_key.as_deref());
        let auto_value = auto.map(|auto| match auto {
            AutoField::InterfaceId => interface.id.clone(),
            AutoField::SchemaVersion => schema_version.to_string(),
        });
        let options = item
            .population_notes
            .as_ref()
            .map(parse_population_notes)
            .unwrap_or_default();
        if item.enumerated && options.is_empty() {
            debug!(item = resolved.item_id, "enumerated item has no parseable options");
        }

        Self {
            item_id: resolved.item_id.to_string(),
            name: item.name.clone(),
            payload_key: item
                .payload_key
                .clone()
                .filter(|key| !key.trim().is_empty())
                .unwrap_or_else(|| resolved.item_id.to_string()),
            requirement: item.requirement(),
            kind: infer_for(item),
            options,
            rule: item.rule.clone(),
            example: item.example.clone(),
            notes: item
                .population_notes
                .as_ref()
                .filter(|notes| !notes.is_empty())
                .map(PopulationNotes::display_text),
            auto,
            auto_value,
        }
    }

    /// Returns true if the user must supply a value.
    pub fn is_required(&self) -> bool {
        self.auto.is_none() && self.requirement.is_some_and(|cmo| cmo.is_required())
    }

    pub fn is_read_only(&self) -> bool {
        self.auto.is_some()
    }

    pub fn is_select(&self) -> bool {
        !self.options.is_empty()
    }
}

/// Where a block's values are written in the exported payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PayloadTarget {
    /// `payload[group][short_code]`.
    Grouped { group: String, short_code: String },
    /// `payload[name]`, keyed by block id.
    Block { name: String },
    /// `payload[name]` for items referenced outside any block.
    Standalone { name: String },
}

impl PayloadTarget {
    fn for_block(block_id: &str, block: &DataBlock) -> Self {
        let non_empty = |value: &Option<String>| value.clone().filter(|v| !v.trim().is_empty());
        match (non_empty(&block.group), non_empty(&block.short_code)) {
            (Some(group), Some(short_code)) => PayloadTarget::Grouped { group, short_code },
            _ => PayloadTarget::Block {
                name: block_id.to_string(),
            },
        }
    }

    /// Payload path segments, outermost first.
    pub fn path(&self) -> Vec<&str> {
        match self {
            PayloadTarget::Grouped { group, short_code } => vec![group.as_str(), short_code.as_str()],
            PayloadTarget::Block { name } | PayloadTarget::Standalone { name } => vec![name.as_str()],
        }
    }
}

/// A group of fields rendered and exported together.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormBlock {
    pub title: String,
    pub section: Option<String>,
    pub block_id: Option<String>,
    pub target: PayloadTarget,
    pub fields: Vec<FormField>,
}

/// Sender and receiver details shown above the fields.
///
/// Contacts are entered by the user and travel with the payload but are not
/// part of it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormHeader {
    pub interface_id: String,
    pub interface_name: String,
    pub sender: String,
    pub receiver: String,
    pub sender_contact: Option<String>,
    pub receiver_contact: Option<String>,
}

/// A generated form for one interface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub header: FormHeader,
    pub blocks: Vec<FormBlock>,
}

impl Form {
    /// Build the form for `interface` from its resolved composition.
    ///
    /// Items of one block reference form one block. Directly referenced items
    /// are grouped per section under the section title.
    pub fn build(interface: &Interface, catalogue: &Catalogue, schema_version: &str) -> Self {
        let resolved = resolve_in(interface, catalogue);
        let mut blocks: Vec<FormBlock> = Vec::new();
        // Composition node of the block being filled; None for a standalone group.
        let mut current: Option<Option<usize>> = None;
        let mut section: Option<&str> = None;

        for row in resolved.rows() {
            let resolved_item = match row {
                ResolvedRow::Section { title } => {
                    section = Some(*title);
                    current = None;
                    continue;
                }
                ResolvedRow::Item(item) => item,
            };
            let key = resolved_item.block.map(|_| resolved_item.node);
            if current != Some(key) {
                blocks.push(new_block(resolved_item, section));
                current = Some(key);
            }
            let field = FormField::from_resolved(resolved_item, interface, schema_version);
            if let Some(block) = blocks.last_mut() {
                block.fields.push(field);
            }
        }

        debug!(
            interface = %interface.id,
            blocks = blocks.len(),
            "built form"
        );
        Self {
            header: FormHeader {
                interface_id: interface.id.clone(),
                interface_name: interface.name.clone(),
                sender: interface.sender.clone(),
                receiver: interface.receiver.clone(),
                sender_contact: None,
                receiver_contact: None,
            },
            blocks,
        }
    }

    /// All fields in form order.
    pub fn fields(&self) -> impl Iterator<Item = &FormField> {
        self.blocks.iter().flat_map(|block| block.fields.iter())
    }

    pub fn field_count(&self) -> usize {
        self.fields().count()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

fn new_block(resolved: &ResolvedItem<'_>, section: Option<&str>) -> FormBlock {
    match resolved.block {
        Some(context) => FormBlock {
            title: context.title.to_string(),
            section: section.map(str::to_string),
            block_id: Some(context.block_id.to_string()),
            target: PayloadTarget::for_block(context.block_id, context.block),
            fields: Vec::new(),
        },
        None => {
            let name = section.unwrap_or(STANDALONE_BLOCK).to_string();
            FormBlock {
                title: name.clone(),
                section: section.map(str::to_string),
                block_id: None,
                target: PayloadTarget::Standalone { name },
                fields: Vec::new(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_auto_fields() {
        assert_eq!(
            AutoField::detect("Interface ID", None),
            Some(AutoField::InterfaceId)
        );
        assert_eq!(
            AutoField::detect("Version", Some("schemaVersion")),
            Some(AutoField::SchemaVersion)
        );
        assert_eq!(AutoField::detect("MPAN", Some("mpan")), None);
    }

    #[test]
    fn grouped_target_needs_both_group_and_short_code() {
        let block = DataBlock {
            title: "Meter".to_string(),
            short_code: Some("MTR".to_string()),
            group: Some("CommonBlock".to_string()),
            ..DataBlock::default()
        };
        assert_eq!(
            PayloadTarget::for_block("DB-01", &block).path(),
            vec!["CommonBlock", "MTR"]
        );

        let ungrouped = DataBlock {
            short_code: Some("MTR".to_string()),
            ..DataBlock::default()
        };
        assert_eq!(PayloadTarget::for_block("DB-01", &ungrouped).path(), vec!["DB-01"]);
    }
}
