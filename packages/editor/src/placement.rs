//! # Placement Engine
//!
//! Resolves drag-and-drop events into a single integer target position
//! and delegates to the store. A drag carries either a catalog type (new
//! block from the palette) or an existing block id (reorder); a drop
//! target is "before/after block X" or "append to end".
//!
//! A drop whose target references an unknown block resolves to `None`
//! and the caller treats it as a no-op. Drag state is owned by the
//! session and always cleared on drop or cancel.

use crate::store::BlockStore;
use serde::{Deserialize, Serialize};
use sitecraft_catalog::BlockType;
use sitecraft_common::BlockId;

/// What is being dragged
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DragSource {
    /// A catalog type dragged from the palette
    NewBlock(BlockType),

    /// An existing block being reordered
    Existing(BlockId),
}

/// Where the drop landed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DropTarget {
    Before(BlockId),
    After(BlockId),
    End,
}

/// Resolved placement, ready for the store
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacementAction {
    Insert {
        block_type: BlockType,
        position: usize,
    },
    Move {
        id: BlockId,
        new_position: usize,
    },
}

/// Resolve a drop to a store action. `None` means the drop is a no-op
/// (unknown target or unknown dragged block).
pub fn resolve_drop(
    store: &BlockStore,
    source: DragSource,
    target: DropTarget,
) -> Option<PlacementAction> {
    let insert_slot = match target {
        DropTarget::Before(id) => store.get(id)?.position,
        DropTarget::After(id) => store.get(id)?.position + 1,
        DropTarget::End => store.len(),
    };

    match source {
        DragSource::NewBlock(block_type) => Some(PlacementAction::Insert {
            block_type,
            position: insert_slot,
        }),

        DragSource::Existing(id) => {
            let from = store.get(id)?.position;
            // Removing the dragged block first shifts later slots down
            let new_position = if insert_slot > from {
                insert_slot - 1
            } else {
                insert_slot
            };
            Some(PlacementAction::Move { id, new_position })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitecraft_catalog::Catalog;

    fn store_of_three() -> (BlockStore, Vec<BlockId>) {
        let catalog = Catalog::new();
        let mut store = BlockStore::new();
        let ids = vec![
            store.add(&catalog, BlockType::Header).unwrap().id,
            store.add(&catalog, BlockType::Text).unwrap().id,
            store.add(&catalog, BlockType::Quote).unwrap().id,
        ];
        (store, ids)
    }

    #[test]
    fn test_new_block_before_resolves_to_target_slot() {
        let (store, ids) = store_of_three();
        let action = resolve_drop(
            &store,
            DragSource::NewBlock(BlockType::Hero),
            DropTarget::Before(ids[1]),
        );
        assert_eq!(
            action,
            Some(PlacementAction::Insert {
                block_type: BlockType::Hero,
                position: 1
            })
        );
    }

    #[test]
    fn test_new_block_at_end() {
        let (store, _) = store_of_three();
        let action = resolve_drop(
            &store,
            DragSource::NewBlock(BlockType::Map),
            DropTarget::End,
        );
        assert_eq!(
            action,
            Some(PlacementAction::Insert {
                block_type: BlockType::Map,
                position: 3
            })
        );
    }

    #[test]
    fn test_move_down_accounts_for_own_removal() {
        let (store, ids) = store_of_three();
        // Dragging block 0 to "after block 2" lands at final slot 2
        let action = resolve_drop(
            &store,
            DragSource::Existing(ids[0]),
            DropTarget::After(ids[2]),
        );
        assert_eq!(
            action,
            Some(PlacementAction::Move {
                id: ids[0],
                new_position: 2
            })
        );
    }

    #[test]
    fn test_move_up_keeps_slot() {
        let (store, ids) = store_of_three();
        let action = resolve_drop(
            &store,
            DragSource::Existing(ids[2]),
            DropTarget::Before(ids[0]),
        );
        assert_eq!(
            action,
            Some(PlacementAction::Move {
                id: ids[2],
                new_position: 0
            })
        );
    }

    #[test]
    fn test_unknown_target_is_noop() {
        let (store, _) = store_of_three();
        let action = resolve_drop(
            &store,
            DragSource::NewBlock(BlockType::Hero),
            DropTarget::Before(BlockId::new()),
        );
        assert_eq!(action, None);
    }

    #[test]
    fn test_unknown_dragged_block_is_noop() {
        let (store, _) = store_of_three();
        let action = resolve_drop(&store, DragSource::Existing(BlockId::new()), DropTarget::End);
        assert_eq!(action, None);
    }
}
