//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("Store error: {0}")]
    Store(#[from] crate::store::StoreError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] sitecraft_catalog::CatalogError),

    #[error("Content shape error: {0}")]
    ContentShape(#[from] sitecraft_catalog::ContentShapeError),
}
