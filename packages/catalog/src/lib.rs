//! # Sitecraft Block Catalog
//!
//! Static registry of block-type definitions: every block type the composer
//! can place, its palette category, its default content and style, and its
//! content-shape validator.
//!
//! The catalog is pure data. Adding a block type means adding one registry
//! entry (definition + defaults + validator), not editing branch points
//! across the editor.

pub mod registry;
pub mod types;

pub use registry::{BlockDefinition, Catalog, CatalogError, ContentShapeError};
pub use types::{style_key_is_known, BlockCategory, BlockType, FieldMap, StyleMap, STYLE_KEYS};
