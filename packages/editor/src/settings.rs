//! # Settings Editor
//!
//! Edits the two facets of a selected block: type-specific content
//! (shape-checked against the catalog validator) and generic style
//! (unchecked keys, the renderer ignores what it does not know).
//!
//! There is no draft buffer: every edit is committed through the session
//! immediately and is individually undoable. Coalescing happens at the
//! debounced-save layer, not here.

use crate::errors::EditorError;
use crate::mutations::Mutation;
use crate::session::EditorSession;
use crate::store::StoreError;
use serde_json::Value;
use sitecraft_catalog::{Catalog, FieldMap, StyleMap};
use sitecraft_common::BlockId;

/// Facade over the session for the settings panel
pub struct SettingsEditor<'a> {
    session: &'a mut EditorSession,
    catalog: &'a Catalog,
}

impl<'a> SettingsEditor<'a> {
    pub fn new(session: &'a mut EditorSession, catalog: &'a Catalog) -> Self {
        Self { session, catalog }
    }

    /// Merge a content patch into a block, after shape validation
    pub fn edit_content(&mut self, id: BlockId, patch: FieldMap) -> Result<(), EditorError> {
        let block = self
            .session
            .store()
            .get(id)
            .ok_or(StoreError::BlockNotFound(id))?;

        let definition = self.catalog.definition_for(block.block_type)?;
        definition.validate_content(&patch)?;

        self.session.apply(self.catalog, Mutation::UpdateBlock {
            id,
            content: Some(patch),
            style: None,
        })?;
        Ok(())
    }

    /// Convenience for single-field content edits (one keystroke, one
    /// committed mutation)
    pub fn edit_content_field(
        &mut self,
        id: BlockId,
        field: &str,
        value: Value,
    ) -> Result<(), EditorError> {
        let mut patch = FieldMap::new();
        patch.insert(field.to_string(), value);
        self.edit_content(id, patch)
    }

    /// Merge a style patch into a block. Style keys are generic and
    /// type-agnostic; unknown keys are stored and ignored at render time.
    pub fn edit_style(&mut self, id: BlockId, patch: StyleMap) -> Result<(), EditorError> {
        self.session.apply(self.catalog, Mutation::UpdateBlock {
            id,
            content: None,
            style: Some(patch),
        })?;
        Ok(())
    }

    pub fn edit_style_field(
        &mut self,
        id: BlockId,
        field: &str,
        value: Value,
    ) -> Result<(), EditorError> {
        let mut patch = StyleMap::new();
        patch.insert(field.to_string(), value);
        self.edit_style(id, patch)
    }
}
