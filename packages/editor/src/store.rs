//! # Block Instance Store
//!
//! The ordered, mutable collection of placed blocks for one editing
//! session. Every other editor component operates on this store.
//!
//! ## Invariant
//!
//! After every mutation the `position` values across all blocks form a
//! contiguous permutation of `0..n-1`: no gaps, no duplicates. The store
//! keeps its backing `Vec` in position order and renumbers after any
//! structural change.
//!
//! ## Mutation Semantics
//!
//! ### add / add_at
//! - Instantiates catalog defaults and assigns a fresh id
//! - `add` appends; `add_at` clamps the requested slot into `0..=len`
//!
//! ### remove
//! - Closes the gap: every later block shifts down by one
//! - Unknown id is a logged no-op error, never fatal
//!
//! ### duplicate
//! - Deep-copies content and style under a new id, appends at the end
//!   (the clone is NOT inserted adjacent to the original)
//!
//! ### reorder
//! - Standard array-move: blocks between the old and new slot shift by
//!   one in the opposite direction; target is clamped to `0..len`
//!
//! ### update
//! - Shallow-merges patch keys into the existing content/style maps;
//!   unspecified keys keep their prior values

use serde::{Deserialize, Serialize};
use sitecraft_catalog::{BlockType, Catalog, CatalogError, FieldMap, StyleMap};
use sitecraft_common::BlockId;
use thiserror::Error;
use tracing::warn;

/// A concrete block instance placed on the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedBlock {
    /// Opaque id, unique for the lifetime of the session
    pub id: BlockId,

    /// Reference into the catalog
    pub block_type: BlockType,

    /// Type-specific fields, overriding catalog defaults per instance
    pub content: FieldMap,

    /// Generic style fields, overriding catalog defaults per instance
    pub style: StyleMap,

    /// Slot on the canvas; contiguous across the store
    pub position: usize,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Block not found: {0}")]
    BlockNotFound(BlockId),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Ordered collection of placed blocks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockStore {
    blocks: Vec<PlacedBlock>,
}

impl BlockStore {
    pub fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    /// Rebuild the store from a snapshot (undo/redo restore path)
    pub fn from_blocks(mut blocks: Vec<PlacedBlock>) -> Self {
        blocks.sort_by_key(|b| b.position);
        let mut store = Self { blocks };
        store.renumber();
        store
    }

    /// Instantiate a block type from the catalog and append it
    pub fn add(
        &mut self,
        catalog: &Catalog,
        block_type: BlockType,
    ) -> Result<&PlacedBlock, StoreError> {
        let at_end = self.blocks.len();
        self.add_at(catalog, block_type, at_end)
    }

    /// Instantiate a block type and insert it at `position` (clamped)
    pub fn add_at(
        &mut self,
        catalog: &Catalog,
        block_type: BlockType,
        position: usize,
    ) -> Result<&PlacedBlock, StoreError> {
        let definition = catalog.definition_for(block_type)?;
        let slot = position.min(self.blocks.len());

        self.blocks.insert(
            slot,
            PlacedBlock {
                id: BlockId::new(),
                block_type,
                content: definition.default_content(),
                style: definition.default_style(),
                position: slot,
            },
        );
        self.renumber();

        Ok(&self.blocks[slot])
    }

    /// Delete a block, closing the position gap
    pub fn remove(&mut self, id: BlockId) -> Result<PlacedBlock, StoreError> {
        let index = self.index_of(id)?;
        let removed = self.blocks.remove(index);
        self.renumber();
        Ok(removed)
    }

    /// Deep-copy a block under a new id, appending at the end
    pub fn duplicate(&mut self, id: BlockId) -> Result<&PlacedBlock, StoreError> {
        let index = self.index_of(id)?;
        let mut clone = self.blocks[index].clone();
        clone.id = BlockId::new();
        clone.position = self.blocks.len();
        self.blocks.push(clone);
        let tail = self.blocks.len() - 1;
        Ok(&self.blocks[tail])
    }

    /// Move a block to `new_position` (clamped), shifting the blocks in
    /// between by one in the opposite direction
    pub fn reorder(&mut self, id: BlockId, new_position: usize) -> Result<(), StoreError> {
        let index = self.index_of(id)?;
        let target = new_position.min(self.blocks.len().saturating_sub(1));
        if target != index {
            let block = self.blocks.remove(index);
            self.blocks.insert(target, block);
            self.renumber();
        }
        Ok(())
    }

    /// Shallow-merge content and/or style patches into a block
    pub fn update(
        &mut self,
        id: BlockId,
        content_patch: Option<&FieldMap>,
        style_patch: Option<&StyleMap>,
    ) -> Result<(), StoreError> {
        let index = self.index_of(id)?;
        let block = &mut self.blocks[index];

        if let Some(patch) = content_patch {
            for (key, value) in patch {
                block.content.insert(key.clone(), value.clone());
            }
        }
        if let Some(patch) = style_patch {
            for (key, value) in patch {
                block.style.insert(key.clone(), value.clone());
            }
        }
        Ok(())
    }

    /// Blocks in position order
    pub fn blocks(&self) -> &[PlacedBlock] {
        &self.blocks
    }

    pub fn get(&self, id: BlockId) -> Option<&PlacedBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn contains(&self, id: BlockId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Snapshot the block sequence (for history)
    pub fn to_blocks(&self) -> Vec<PlacedBlock> {
        self.blocks.clone()
    }

    /// Replace the block sequence wholesale (undo/redo restore; does not
    /// record history)
    pub fn restore(&mut self, blocks: Vec<PlacedBlock>) {
        self.blocks = blocks;
        self.blocks.sort_by_key(|b| b.position);
        self.renumber();
    }

    fn index_of(&self, id: BlockId) -> Result<usize, StoreError> {
        self.blocks
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| {
                warn!(block_id = %id, "operation on unknown block id");
                StoreError::BlockNotFound(id)
            })
    }

    fn renumber(&mut self) {
        for (slot, block) in self.blocks.iter_mut().enumerate() {
            block.position = slot;
        }
    }
}
