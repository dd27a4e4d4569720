//! # Layout Renderer
//!
//! Pure projection of the block sequence into an ordered layout
//! description: for each block, its type plus fully resolved content and
//! style. Resolution shallow-merges per-instance overrides over catalog
//! defaults and drops keys the block type (or the style vocabulary) does
//! not know (the permissive-store / strict-render policy).
//!
//! The same output feeds the interactive canvas and the live preview;
//! visual materialization is out of scope.

use crate::store::BlockStore;
use serde::Serialize;
use sitecraft_catalog::{style_key_is_known, BlockType, Catalog, CatalogError, FieldMap, StyleMap};
use sitecraft_common::BlockId;

/// One entry of the layout description
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedBlock {
    pub id: BlockId,
    pub block_type: BlockType,
    pub content: FieldMap,
    pub style: StyleMap,
}

/// Project the store into the ordered layout description
pub fn render_layout(
    store: &BlockStore,
    catalog: &Catalog,
) -> Result<Vec<RenderedBlock>, CatalogError> {
    store
        .blocks()
        .iter()
        .map(|block| {
            let definition = catalog.definition_for(block.block_type)?;

            let mut content = definition.default_content();
            for (key, value) in &block.content {
                // Keys outside the type's field set are ignored, not errors
                if content.contains_key(key) {
                    content.insert(key.clone(), value.clone());
                }
            }

            let mut style = definition.default_style();
            for (key, value) in &block.style {
                if style_key_is_known(key) {
                    style.insert(key.clone(), value.clone());
                }
            }

            Ok(RenderedBlock {
                id: block.id,
                block_type: block.block_type,
                content,
                style,
            })
        })
        .collect()
}
