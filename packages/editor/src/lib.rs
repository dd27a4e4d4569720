//! # Sitecraft Editor
//!
//! Core page-composition engine for Sitecraft.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ catalog: block types + defaults             │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: session + store + history           │
//! │  - Place / reorder / duplicate blocks       │
//! │  - Edit content and style per block         │
//! │  - Snapshot every committed mutation        │
//! │  - Undo / redo over a bounded history       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ renderer: blocks → layout description       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The store is source of truth**: the rendered layout is a derived view
//! 2. **Positions are contiguous**: always a permutation of `0..n-1`
//! 3. **Every committed mutation is undoable**: history snapshots the block
//!    sequence, never transient UI state (selection, drag)
//! 4. **Unknown ids are no-ops**: mutation errors are local and non-fatal
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sitecraft_catalog::{BlockType, Catalog};
//! use sitecraft_editor::{EditorSession, Mutation};
//!
//! let catalog = Catalog::new();
//! let mut session = EditorSession::new(Vec::new());
//!
//! // Place a hero block at the end of the canvas
//! session.apply(&catalog, Mutation::AddBlock { block_type: BlockType::Hero })?;
//!
//! // Undo it
//! session.undo();
//!
//! // Project the layout for the canvas / preview
//! let layout = session.render(&catalog)?;
//! ```

mod errors;
mod history;
mod mutations;
mod placement;
mod renderer;
mod session;
mod settings;
mod store;

pub use errors::EditorError;
pub use history::{History, Snapshot, HISTORY_CAPACITY};
pub use mutations::Mutation;
pub use placement::{resolve_drop, DragSource, DropTarget, PlacementAction};
pub use renderer::{render_layout, RenderedBlock};
pub use session::{EditorEvent, EditorSession};
pub use settings::SettingsEditor;
pub use store::{BlockStore, PlacedBlock, StoreError};

// Re-export common types for convenience
pub use sitecraft_catalog::{BlockType, Catalog, FieldMap, StyleMap};
pub use sitecraft_common::BlockId;
