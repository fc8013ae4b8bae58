use serde::{Deserialize, Serialize};

use crate::lenient;

/// One entry of an interface's ordered composition.
///
/// Encoded on the wire as `{"type": "header" | "block" | "item", ...}`. Tags
/// the catalogue does not know about, and references without an `id`,
/// deserialize to [`CompositionNode::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", from = "RawNode")]
pub enum CompositionNode {
    /// Section heading; contributes no data items.
    Header { title: String },
    /// Reference into the data block catalogue.
    #[serde(rename = "block")]
    BlockRef {
        #[serde(rename = "id")]
        block_id: String,
        #[serde(rename = "titleOverride", skip_serializing_if = "Option::is_none")]
        title_override: Option<String>,
    },
    /// Reference into the data item catalogue.
    #[serde(rename = "item")]
    ItemRef {
        #[serde(rename = "id")]
        item_id: String,
    },
    Unknown,
}

#[derive(Deserialize)]
struct RawNode {
    #[serde(rename = "type", default, deserialize_with = "lenient::text")]
    kind: String,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    title: String,
    #[serde(
        rename = "titleOverride",
        default,
        deserialize_with = "lenient::optional_text"
    )]
    title_override: Option<String>,
}

impl From<RawNode> for CompositionNode {
    fn from(raw: RawNode) -> Self {
        match (raw.kind.trim().to_lowercase().as_str(), raw.id) {
            ("header", _) => CompositionNode::Header { title: raw.title },
            ("block", Some(block_id)) => CompositionNode::BlockRef {
                block_id,
                title_override: raw.title_override,
            },
            ("item", Some(item_id)) => CompositionNode::ItemRef { item_id },
            _ => CompositionNode::Unknown,
        }
    }
}
