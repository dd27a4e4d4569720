//! # Persistence Record
//!
//! The durable shape of one composed site: the block sequence, the site
//! identity, publish state, and bookkeeping. Created on first save,
//! updated on every save/publish; it outlives the editing session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sitecraft_editor::PlacedBlock;
use thiserror::Error;

/// Bumped whenever the persisted field set changes shape
pub const SCHEMA_VERSION: u32 = 1;

/// First-run site name; publishing requires changing it
pub const PLACEHOLDER_SITE_NAME: &str = "My Website";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Malformed record: {0}")]
    Malformed(String),

    #[error("Unsupported schema version {found} (this build reads up to {supported})")]
    SchemaVersion { found: u32, supported: u32 },
}

/// The persisted editor state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistenceRecord {
    pub blocks: Vec<PlacedBlock>,
    pub site_name: String,
    pub published: bool,
    pub published_slug: Option<String>,
    pub last_modified: DateTime<Utc>,
    pub schema_version: u32,
}

impl PersistenceRecord {
    /// Fresh record for an account that has never saved
    pub fn first_run() -> Self {
        Self {
            blocks: Vec::new(),
            site_name: PLACEHOLDER_SITE_NAME.to_string(),
            published: false,
            published_slug: None,
            last_modified: Utc::now(),
            schema_version: SCHEMA_VERSION,
        }
    }

    /// Replace the block sequence and touch `last_modified`
    pub fn with_blocks(mut self, blocks: Vec<PlacedBlock>) -> Self {
        self.blocks = blocks;
        self.touch();
        self
    }

    pub fn touch(&mut self) {
        self.last_modified = Utc::now();
    }

    /// Whether the identifying name has been set past its first-run
    /// placeholder (publish precondition)
    pub fn has_real_site_name(&self) -> bool {
        let name = self.site_name.trim();
        !name.is_empty() && name != PLACEHOLDER_SITE_NAME
    }

    /// Export for the device cache or a download
    pub fn to_json(&self) -> Result<String, ValidationError> {
        serde_json::to_string(self).map_err(|e| ValidationError::Malformed(e.to_string()))
    }

    /// Import, rejecting malformed payloads and newer schemas. A failed
    /// import changes nothing.
    pub fn from_json(raw: &str) -> Result<Self, ValidationError> {
        let record: Self =
            serde_json::from_str(raw).map_err(|e| ValidationError::Malformed(e.to_string()))?;

        if record.schema_version > SCHEMA_VERSION {
            return Err(ValidationError::SchemaVersion {
                found: record.schema_version,
                supported: SCHEMA_VERSION,
            });
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitecraft_catalog::{BlockType, Catalog};
    use sitecraft_editor::BlockStore;

    #[test]
    fn test_first_run_uses_placeholder() {
        let record = PersistenceRecord::first_run();
        assert_eq!(record.site_name, PLACEHOLDER_SITE_NAME);
        assert!(!record.has_real_site_name());
        assert!(!record.published);
        assert_eq!(record.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn test_blank_name_is_not_real() {
        let mut record = PersistenceRecord::first_run();
        record.site_name = "   ".to_string();
        assert!(!record.has_real_site_name());

        record.site_name = "Maya's Bakery".to_string();
        assert!(record.has_real_site_name());
    }

    #[test]
    fn test_json_round_trip() {
        let catalog = Catalog::new();
        let mut store = BlockStore::new();
        store.add(&catalog, BlockType::Hero).unwrap();

        let record = PersistenceRecord::first_run().with_blocks(store.to_blocks());
        let raw = record.to_json().unwrap();
        let back = PersistenceRecord::from_json(&raw).unwrap();

        assert_eq!(back, record);
    }

    #[test]
    fn test_malformed_import_is_rejected() {
        assert!(matches!(
            PersistenceRecord::from_json("{not json"),
            Err(ValidationError::Malformed(_))
        ));
        assert!(matches!(
            PersistenceRecord::from_json("{\"blocks\": []}"),
            Err(ValidationError::Malformed(_))
        ));
    }

    #[test]
    fn test_newer_schema_is_rejected() {
        let mut record = PersistenceRecord::first_run();
        record.schema_version = SCHEMA_VERSION + 1;
        let raw = serde_json::to_string(&record).unwrap();

        assert!(matches!(
            PersistenceRecord::from_json(&raw),
            Err(ValidationError::SchemaVersion { .. })
        ));
    }
}
