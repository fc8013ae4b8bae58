//! Flattening of an interface's composition into concrete data items.
//!
//! The same resolution feeds search content, the data item table and the
//! form builder, so all three agree on ordering and on what a dangling
//! reference contributes (nothing).

use std::collections::BTreeMap;

use mhhs_model::{Catalogue, CompositionNode, DataBlock, DataItem, Interface};
use tracing::debug;

/// The block an item was reached through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockContext<'a> {
    pub block_id: &'a str,
    /// Composition title override, else the block's own title.
    pub title: &'a str,
    pub block: &'a DataBlock,
}

/// One concrete data item reached from the composition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedItem<'a> {
    /// Title of the closest preceding header, if any.
    pub section_title: Option<&'a str>,
    /// Present when the item came from a block reference.
    pub block: Option<BlockContext<'a>>,
    /// Index of the composition node the item was reached through.
    pub node: usize,
    /// Index of the item id in the block's declared item list (0 for direct items).
    pub position: usize,
    pub item_id: &'a str,
    pub item: &'a DataItem,
}

impl<'a> ResolvedItem<'a> {
    /// Heading to display above the item: block title, else section title.
    pub fn heading(&self) -> Option<&'a str> {
        self.block.map(|b| b.title).or(self.section_title)
    }
}

/// A row of the flattened composition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedRow<'a> {
    /// A header node; carries no data item.
    Section { title: &'a str },
    Item(ResolvedItem<'a>),
}

/// A composition reference that did not resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingReference {
    Block {
        block_id: String,
    },
    Item {
        item_id: String,
        block_id: Option<String>,
    },
}

/// Ordered result of [`resolve`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedComposition<'a> {
    rows: Vec<ResolvedRow<'a>>,
    missing: Vec<MissingReference>,
}

impl<'a> ResolvedComposition<'a> {
    /// All rows, section markers included.
    pub fn rows(&self) -> &[ResolvedRow<'a>] {
        &self.rows
    }

    /// Resolved data items in composition order.
    pub fn items(&self) -> impl Iterator<Item = &ResolvedItem<'a>> + '_ {
        self.rows.iter().filter_map(|row| match row {
            ResolvedRow::Item(item) => Some(item),
            ResolvedRow::Section { .. } => None,
        })
    }

    /// Number of resolved data items.
    pub fn len(&self) -> usize {
        self.items().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// References that were skipped because their target is absent.
    pub fn missing(&self) -> &[MissingReference] {
        &self.missing
    }
}

/// Resolve an interface against the catalogue it belongs to.
pub fn resolve_in<'a>(interface: &'a Interface, catalogue: &'a Catalogue) -> ResolvedComposition<'a> {
    resolve(interface, &catalogue.data_blocks, &catalogue.data_items)
}

/// Walk `interface.composition` top to bottom and expand block references.
///
/// Missing blocks and items contribute nothing; they are recorded in
/// [`ResolvedComposition::missing`]. Item ids are not deduplicated.
pub fn resolve<'a>(
    interface: &'a Interface,
    blocks: &'a BTreeMap<String, DataBlock>,
    items: &'a BTreeMap<String, DataItem>,
) -> ResolvedComposition<'a> {
    let mut resolved = ResolvedComposition::default();
    let mut section_title: Option<&'a str> = None;

    for (node_index, node) in interface.composition.iter().enumerate() {
        match node {
            CompositionNode::Header { title } => {
                section_title = Some(title.as_str());
                resolved.rows.push(ResolvedRow::Section {
                    title: title.as_str(),
                });
            }
            CompositionNode::BlockRef {
                block_id,
                title_override,
            } => {
                let Some(block) = blocks.get(block_id) else {
                    debug!(interface = %interface.id, %block_id, "skipping missing data block");
                    resolved.missing.push(MissingReference::Block {
                        block_id: block_id.clone(),
                    });
                    continue;
                };
                let context = BlockContext {
                    block_id: block_id.as_str(),
                    title: title_override.as_deref().unwrap_or(block.title.as_str()),
                    block,
                };
                for (position, item_id) in block.items.iter().enumerate() {
                    let Some(item) = items.get(item_id) else {
                        debug!(interface = %interface.id, %block_id, %item_id, "skipping missing data item");
                        resolved.missing.push(MissingReference::Item {
                            item_id: item_id.clone(),
                            block_id: Some(block_id.clone()),
                        });
                        continue;
                    };
                    resolved.rows.push(ResolvedRow::Item(ResolvedItem {
                        section_title,
                        block: Some(context),
                        node: node_index,
                        position,
                        item_id: item_id.as_str(),
                        item,
                    }));
                }
            }
            CompositionNode::ItemRef { item_id } => {
                let Some(item) = items.get(item_id) else {
                    debug!(interface = %interface.id, %item_id, "skipping missing data item");
                    resolved.missing.push(MissingReference::Item {
                        item_id: item_id.clone(),
                        block_id: None,
                    });
                    continue;
                };
                resolved.rows.push(ResolvedRow::Item(ResolvedItem {
                    section_title,
                    block: None,
                    node: node_index,
                    position: 0,
                    item_id: item_id.as_str(),
                    item,
                }));
            }
            CompositionNode::Unknown => {
                debug!(interface = %interface.id, "skipping unrecognised composition entry");
            }
        }
    }

    resolved
}
