//! # Edit Session
//!
//! One operator's in-progress composition: the block store, the bounded
//! undo history, transient UI state (selection, active drag), and a typed
//! event topic that canvas/preview/autosave subscribe to explicitly.
//!
//! Selection and drag state are transient: they are never snapshotted
//! and never restored by undo/redo.

use crate::errors::EditorError;
use crate::history::History;
use crate::mutations::Mutation;
use crate::placement::{resolve_drop, DragSource, DropTarget, PlacementAction};
use crate::renderer::{render_layout, RenderedBlock};
use crate::store::{BlockStore, PlacedBlock};
use sitecraft_catalog::Catalog;
use sitecraft_common::{BlockId, EventBus};
use std::sync::mpsc::Receiver;
use tracing::debug;

/// Events emitted by the session to explicit subscribers
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// The block sequence changed (mutation, undo, or redo)
    BlocksChanged,

    /// The selected block changed
    SelectionChanged(Option<BlockId>),
}

/// Single-operator editing session
pub struct EditorSession {
    store: BlockStore,
    history: History,
    events: EventBus<EditorEvent>,

    // Transient UI state, excluded from history
    selected: Option<BlockId>,
    drag: Option<DragSource>,
}

impl EditorSession {
    /// Start a session from a loaded (or empty) block sequence
    pub fn new(blocks: Vec<PlacedBlock>) -> Self {
        let store = BlockStore::from_blocks(blocks);
        let history = History::new(store.to_blocks());
        Self {
            store,
            history,
            events: EventBus::new(),
            selected: None,
            drag: None,
        }
    }

    /// Apply a mutation: mutate the store, snapshot history, notify
    /// subscribers. On failure the store and history are untouched.
    pub fn apply(
        &mut self,
        catalog: &Catalog,
        mutation: Mutation,
    ) -> Result<Option<BlockId>, EditorError> {
        let created = mutation.apply(&mut self.store, catalog)?;
        self.commit();
        Ok(created)
    }

    /// Step back one committed mutation. Returns false when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo() else {
            debug!("nothing to undo");
            return false;
        };
        // Non-recording restore
        let blocks = snapshot.blocks.clone();
        self.store.restore(blocks);
        self.after_restore();
        true
    }

    /// Step forward one undone mutation. Returns false at the tail.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo() else {
            debug!("nothing to redo");
            return false;
        };
        let blocks = snapshot.blocks.clone();
        self.store.restore(blocks);
        self.after_restore();
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Begin a drag from the palette or from an existing block
    pub fn drag_start(&mut self, source: DragSource) {
        self.drag = Some(source);
    }

    /// Drop the active drag onto a target. Resolves to an insert or a
    /// move; a drop outside any valid zone is a no-op. Drag state is
    /// cleared regardless of outcome.
    pub fn drop_on(
        &mut self,
        catalog: &Catalog,
        target: DropTarget,
    ) -> Result<Option<BlockId>, EditorError> {
        let Some(source) = self.drag.take() else {
            debug!("drop without an active drag");
            return Ok(None);
        };

        match resolve_drop(&self.store, source, target) {
            Some(PlacementAction::Insert {
                block_type,
                position,
            }) => self.apply(catalog, Mutation::InsertBlock {
                block_type,
                position,
            }),
            Some(PlacementAction::Move { id, new_position }) => {
                self.apply(catalog, Mutation::ReorderBlock { id, new_position })?;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Abort the active drag without placing anything
    pub fn drag_cancel(&mut self) {
        self.drag = None;
    }

    pub fn active_drag(&self) -> Option<DragSource> {
        self.drag
    }

    /// Select a block (or clear the selection with `None`)
    pub fn select(&mut self, id: Option<BlockId>) {
        let id = id.filter(|id| self.store.contains(*id));
        if self.selected != id {
            self.selected = id;
            self.events.emit(EditorEvent::SelectionChanged(id));
        }
    }

    pub fn selected(&self) -> Option<BlockId> {
        self.selected
    }

    /// Subscribe to session events (explicit observer interface)
    pub fn subscribe(&mut self) -> Receiver<EditorEvent> {
        self.events.subscribe()
    }

    pub fn store(&self) -> &BlockStore {
        &self.store
    }

    pub fn blocks(&self) -> &[PlacedBlock] {
        self.store.blocks()
    }

    /// Project the current block sequence into the layout description
    /// consumed by the canvas and the preview
    pub fn render(&self, catalog: &Catalog) -> Result<Vec<RenderedBlock>, EditorError> {
        Ok(render_layout(&self.store, catalog)?)
    }

    fn commit(&mut self) {
        self.history.record(self.store.to_blocks());
        self.drop_stale_selection();
        self.events.emit(EditorEvent::BlocksChanged);
    }

    fn after_restore(&mut self) {
        self.drop_stale_selection();
        self.events.emit(EditorEvent::BlocksChanged);
    }

    fn drop_stale_selection(&mut self) {
        if let Some(id) = self.selected {
            if !self.store.contains(id) {
                self.selected = None;
                self.events.emit(EditorEvent::SelectionChanged(None));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitecraft_catalog::BlockType;

    #[test]
    fn test_session_starts_clean() {
        let session = EditorSession::new(Vec::new());
        assert!(session.blocks().is_empty());
        assert!(!session.can_undo());
        assert!(!session.can_redo());
        assert_eq!(session.selected(), None);
    }

    #[test]
    fn test_apply_emits_blocks_changed() {
        let catalog = Catalog::new();
        let mut session = EditorSession::new(Vec::new());
        let rx = session.subscribe();

        session
            .apply(&catalog, Mutation::AddBlock {
                block_type: BlockType::Text,
            })
            .unwrap();

        assert_eq!(rx.try_recv().unwrap(), EditorEvent::BlocksChanged);
    }

    #[test]
    fn test_failed_mutation_records_nothing() {
        let catalog = Catalog::new();
        let mut session = EditorSession::new(Vec::new());

        let result = session.apply(&catalog, Mutation::RemoveBlock { id: BlockId::new() });
        assert!(result.is_err());
        assert!(!session.can_undo());
    }

    #[test]
    fn test_undo_restores_previous_sequence() {
        let catalog = Catalog::new();
        let mut session = EditorSession::new(Vec::new());

        session
            .apply(&catalog, Mutation::AddBlock {
                block_type: BlockType::Header,
            })
            .unwrap();
        session
            .apply(&catalog, Mutation::AddBlock {
                block_type: BlockType::Text,
            })
            .unwrap();

        assert!(session.undo());
        assert_eq!(session.blocks().len(), 1);
        assert_eq!(session.blocks()[0].block_type, BlockType::Header);

        assert!(session.redo());
        assert_eq!(session.blocks().len(), 2);
    }

    #[test]
    fn test_undo_does_not_restore_selection() {
        let catalog = Catalog::new();
        let mut session = EditorSession::new(Vec::new());

        let id = session
            .apply(&catalog, Mutation::AddBlock {
                block_type: BlockType::Text,
            })
            .unwrap()
            .unwrap();
        session.select(Some(id));

        // Undo removes the block; the stale selection is cleared, and
        // redo does not bring it back.
        session.undo();
        assert_eq!(session.selected(), None);
        session.redo();
        assert_eq!(session.selected(), None);
    }

    #[test]
    fn test_drop_without_drag_is_noop() {
        let catalog = Catalog::new();
        let mut session = EditorSession::new(Vec::new());

        let placed = session.drop_on(&catalog, DropTarget::End).unwrap();
        assert_eq!(placed, None);
        assert!(session.blocks().is_empty());
    }

    #[test]
    fn test_drop_places_new_block() {
        let catalog = Catalog::new();
        let mut session = EditorSession::new(Vec::new());

        session.drag_start(DragSource::NewBlock(BlockType::Hero));
        let placed = session.drop_on(&catalog, DropTarget::End).unwrap();

        assert!(placed.is_some());
        assert_eq!(session.blocks().len(), 1);
        assert_eq!(session.active_drag(), None);
    }

    #[test]
    fn test_drag_state_cleared_even_when_drop_misses() {
        let catalog = Catalog::new();
        let mut session = EditorSession::new(Vec::new());

        session.drag_start(DragSource::NewBlock(BlockType::Hero));
        let placed = session
            .drop_on(&catalog, DropTarget::Before(BlockId::new()))
            .unwrap();

        assert_eq!(placed, None);
        assert!(session.blocks().is_empty());
        assert_eq!(session.active_drag(), None);
    }

    #[test]
    fn test_drag_cancel_resets_state() {
        let mut session = EditorSession::new(Vec::new());
        session.drag_start(DragSource::NewBlock(BlockType::Map));
        session.drag_cancel();
        assert_eq!(session.active_drag(), None);
    }

    #[test]
    fn test_selecting_unknown_block_clears_selection() {
        let mut session = EditorSession::new(Vec::new());
        session.select(Some(BlockId::new()));
        assert_eq!(session.selected(), None);
    }
}
