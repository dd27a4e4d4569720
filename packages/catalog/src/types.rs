//! Core catalog types: block discriminants, palette categories, and the
//! generic content/style field maps.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Discriminant for every block type the composer knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    Header,
    Hero,
    Text,
    Heading,
    Image,
    Grid,
    Quote,
    List,
    Contact,
    Booking,
    Map,
}

impl BlockType {
    pub const ALL: [BlockType; 11] = [
        BlockType::Header,
        BlockType::Hero,
        BlockType::Text,
        BlockType::Heading,
        BlockType::Image,
        BlockType::Grid,
        BlockType::Quote,
        BlockType::List,
        BlockType::Contact,
        BlockType::Booking,
        BlockType::Map,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Header => "header",
            BlockType::Hero => "hero",
            BlockType::Text => "text",
            BlockType::Heading => "heading",
            BlockType::Image => "image",
            BlockType::Grid => "grid",
            BlockType::Quote => "quote",
            BlockType::List => "list",
            BlockType::Contact => "contact",
            BlockType::Booking => "booking",
            BlockType::Map => "map",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Palette grouping for the block picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockCategory {
    Layout,
    Content,
    Interactive,
}

/// Type-specific content fields (schemaless, serializes deterministically)
pub type FieldMap = BTreeMap<String, Value>;

/// Generic style fields, shared across all block types
pub type StyleMap = BTreeMap<String, Value>;

/// The style keys the renderer understands. Anything else on a block's
/// style map is carried but never resolved.
pub const STYLE_KEYS: [&str; 10] = [
    "align",
    "font_size",
    "font_weight",
    "text_color",
    "background_color",
    "padding",
    "margin",
    "width",
    "height",
    "radius",
];

pub fn style_key_is_known(key: &str) -> bool {
    STYLE_KEYS.contains(&key)
}
