//! # Block Registry
//!
//! Maps each [`BlockType`] to its definition: palette category, default
//! content/style factories, and a content-shape validator. The validator
//! checks presence and shape only (a provided field must have the JSON
//! shape of its default); it never checks values.

use crate::types::{BlockCategory, BlockType, FieldMap, StyleMap};
use serde_json::{json, Value};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Should never happen when the catalog drives the palette, but any
    /// operation that references an unknown type must abort.
    #[error("Unknown block type: {0}")]
    UnknownType(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContentShapeError {
    #[error("Field `{field}` must be {expected}")]
    WrongShape {
        field: String,
        expected: &'static str,
    },
}

/// Content-shape validator for one block type
pub type ContentValidator = fn(&FieldMap) -> Result<(), ContentShapeError>;

/// Immutable definition of one block type
pub struct BlockDefinition {
    pub block_type: BlockType,
    pub category: BlockCategory,
    default_content: fn() -> FieldMap,
    default_style: fn() -> StyleMap,
    validate: ContentValidator,
}

impl BlockDefinition {
    pub fn default_content(&self) -> FieldMap {
        (self.default_content)()
    }

    pub fn default_style(&self) -> StyleMap {
        (self.default_style)()
    }

    /// Validate a content patch against this type's field shapes
    pub fn validate_content(&self, patch: &FieldMap) -> Result<(), ContentShapeError> {
        (self.validate)(patch)
    }
}

/// The block catalog: read-only lookup from type to definition
pub struct Catalog {
    definitions: HashMap<BlockType, BlockDefinition>,
}

impl Catalog {
    pub fn new() -> Self {
        let mut definitions = HashMap::new();
        for def in build_definitions() {
            definitions.insert(def.block_type, def);
        }
        Self { definitions }
    }

    /// Look up the definition for a block type
    pub fn definition_for(&self, block_type: BlockType) -> Result<&BlockDefinition, CatalogError> {
        self.definitions
            .get(&block_type)
            .ok_or_else(|| CatalogError::UnknownType(block_type.to_string()))
    }

    /// All definitions, for rendering the palette
    pub fn definitions(&self) -> impl Iterator<Item = &BlockDefinition> {
        self.definitions.values()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

fn field_map(pairs: Vec<(&str, Value)>) -> FieldMap {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

fn base_style() -> StyleMap {
    field_map(vec![
        ("align", json!("left")),
        ("font_size", json!(16)),
        ("font_weight", json!("normal")),
        ("text_color", json!("#1a1a1a")),
        ("background_color", json!("transparent")),
        ("padding", json!(16)),
        ("margin", json!(0)),
        ("radius", json!(0)),
    ])
}

fn centered_style() -> StyleMap {
    let mut style = base_style();
    style.insert("align".to_string(), json!("center"));
    style
}

fn build_definitions() -> Vec<BlockDefinition> {
    vec![
        BlockDefinition {
            block_type: BlockType::Header,
            category: BlockCategory::Layout,
            default_content: || {
                field_map(vec![
                    ("title", json!("Your Site")),
                    ("navigation", json!(["Home", "About", "Contact"])),
                ])
            },
            default_style: base_style,
            validate: validate_header,
        },
        BlockDefinition {
            block_type: BlockType::Hero,
            category: BlockCategory::Layout,
            default_content: || {
                field_map(vec![
                    ("heading", json!("Welcome")),
                    ("subheading", json!("Tell visitors what you do")),
                    ("cta_label", json!("Get in touch")),
                ])
            },
            default_style: centered_style,
            validate: validate_shape_only,
        },
        BlockDefinition {
            block_type: BlockType::Text,
            category: BlockCategory::Content,
            default_content: || field_map(vec![("body", json!("Write something here."))]),
            default_style: base_style,
            validate: validate_shape_only,
        },
        BlockDefinition {
            block_type: BlockType::Heading,
            category: BlockCategory::Content,
            default_content: || {
                field_map(vec![("text", json!("Section title")), ("level", json!(2))])
            },
            default_style: base_style,
            validate: validate_shape_only,
        },
        BlockDefinition {
            block_type: BlockType::Image,
            category: BlockCategory::Content,
            default_content: || field_map(vec![("url", json!("")), ("alt", json!(""))]),
            default_style: base_style,
            validate: validate_shape_only,
        },
        BlockDefinition {
            block_type: BlockType::Grid,
            category: BlockCategory::Layout,
            default_content: || {
                field_map(vec![
                    ("columns", json!(3)),
                    ("items", json!(["First", "Second", "Third"])),
                ])
            },
            default_style: base_style,
            validate: validate_grid,
        },
        BlockDefinition {
            block_type: BlockType::Quote,
            category: BlockCategory::Content,
            default_content: || {
                field_map(vec![
                    ("text", json!("A kind word from a customer.")),
                    ("attribution", json!("Someone")),
                ])
            },
            default_style: centered_style,
            validate: validate_shape_only,
        },
        BlockDefinition {
            block_type: BlockType::List,
            category: BlockCategory::Content,
            default_content: || {
                field_map(vec![("items", json!(["First item", "Second item"]))])
            },
            default_style: base_style,
            validate: validate_list,
        },
        BlockDefinition {
            block_type: BlockType::Contact,
            category: BlockCategory::Interactive,
            default_content: || {
                field_map(vec![
                    ("email", json!("")),
                    ("phone", json!("")),
                    ("show_form", json!(true)),
                ])
            },
            default_style: base_style,
            validate: validate_shape_only,
        },
        BlockDefinition {
            block_type: BlockType::Booking,
            category: BlockCategory::Interactive,
            default_content: || {
                field_map(vec![
                    ("service_name", json!("Consultation")),
                    ("duration_minutes", json!(30)),
                ])
            },
            default_style: base_style,
            validate: validate_shape_only,
        },
        BlockDefinition {
            block_type: BlockType::Map,
            category: BlockCategory::Interactive,
            default_content: || field_map(vec![("address", json!("")), ("zoom", json!(14))]),
            default_style: base_style,
            validate: validate_shape_only,
        },
    ]
}

/// Generic validator: every provided field must keep the JSON shape of
/// its default. Unknown fields pass (the renderer ignores them).
fn validate_shape_only(patch: &FieldMap) -> Result<(), ContentShapeError> {
    // Shape is determined per-entry against the merged defaults at edit
    // time; here we only reject structurally impossible values.
    for (field, value) in patch {
        if value.is_object() {
            return Err(ContentShapeError::WrongShape {
                field: field.clone(),
                expected: "a scalar or array, not a nested object",
            });
        }
    }
    Ok(())
}

fn validate_string_array(patch: &FieldMap, field: &str) -> Result<(), ContentShapeError> {
    if let Some(value) = patch.get(field) {
        let ok = value
            .as_array()
            .map(|items| items.iter().all(Value::is_string))
            .unwrap_or(false);
        if !ok {
            return Err(ContentShapeError::WrongShape {
                field: field.to_string(),
                expected: "a list of strings",
            });
        }
    }
    Ok(())
}

fn validate_header(patch: &FieldMap) -> Result<(), ContentShapeError> {
    validate_shape_only(patch)?;
    validate_string_array(patch, "navigation")
}

fn validate_list(patch: &FieldMap) -> Result<(), ContentShapeError> {
    validate_shape_only(patch)?;
    validate_string_array(patch, "items")
}

fn validate_grid(patch: &FieldMap) -> Result<(), ContentShapeError> {
    validate_shape_only(patch)?;
    validate_string_array(patch, "items")?;
    if let Some(columns) = patch.get("columns") {
        if !columns.is_u64() {
            return Err(ContentShapeError::WrongShape {
                field: "columns".to_string(),
                expected: "a non-negative integer",
            });
        }
    }
    Ok(())
}
