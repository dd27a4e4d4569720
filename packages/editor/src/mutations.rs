//! # Canvas Mutations
//!
//! High-level semantic operations on the block store.
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: each mutation is one user-visible operation
//! 2. **Validated**: unknown ids and types abort before any state change
//! 3. **Non-fatal**: a failed mutation leaves the store untouched
//!
//! Mutations are applied through [`EditorSession::apply`], which snapshots
//! history and notifies subscribers on success.
//!
//! [`EditorSession::apply`]: crate::EditorSession::apply

use crate::store::{BlockStore, StoreError};
use serde::{Deserialize, Serialize};
use sitecraft_catalog::{BlockType, Catalog, FieldMap, StyleMap};
use sitecraft_common::BlockId;

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Place a new block of `block_type` at the end of the canvas
    AddBlock { block_type: BlockType },

    /// Place a new block at a specific slot (clamped to `0..=len`)
    InsertBlock {
        block_type: BlockType,
        position: usize,
    },

    /// Remove a block (later blocks shift down by one)
    RemoveBlock { id: BlockId },

    /// Deep-copy a block under a new id, appended at the end
    DuplicateBlock { id: BlockId },

    /// Move a block to a new slot (clamped, array-move semantics)
    ReorderBlock { id: BlockId, new_position: usize },

    /// Shallow-merge content and/or style patches into a block
    UpdateBlock {
        id: BlockId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<FieldMap>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        style: Option<StyleMap>,
    },
}

impl Mutation {
    /// Apply this mutation to the store, returning the id of any block
    /// the mutation created.
    pub fn apply(
        &self,
        store: &mut BlockStore,
        catalog: &Catalog,
    ) -> Result<Option<BlockId>, StoreError> {
        match self {
            Mutation::AddBlock { block_type } => {
                let placed = store.add(catalog, *block_type)?;
                Ok(Some(placed.id))
            }

            Mutation::InsertBlock {
                block_type,
                position,
            } => {
                let placed = store.add_at(catalog, *block_type, *position)?;
                Ok(Some(placed.id))
            }

            Mutation::RemoveBlock { id } => {
                store.remove(*id)?;
                Ok(None)
            }

            Mutation::DuplicateBlock { id } => {
                let clone = store.duplicate(*id)?;
                Ok(Some(clone.id))
            }

            Mutation::ReorderBlock { id, new_position } => {
                store.reorder(*id, *new_position)?;
                Ok(None)
            }

            Mutation::UpdateBlock { id, content, style } => {
                store.update(*id, content.as_ref(), style.as_ref())?;
                Ok(None)
            }
        }
    }
}
