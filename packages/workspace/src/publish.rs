//! # Publish Pipeline
//!
//! Validates publish preconditions in order (first failure wins), derives
//! the stable public slug, and persists the publish flags through the
//! autosave controller's write path.
//!
//! Re-publishing with unchanged identifying fields is idempotent: the
//! slug is a pure function of the site name and the account id.

use crate::autosave::AutosaveController;
use crate::record::PersistenceRecord;
use crate::stores::{Notice, Notifier, PersistenceError};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// Base under which published sites are addressable
pub const PUBLIC_SITE_BASE: &str = "https://sites.sitecraft.app";

/// Authenticated operator identity (owned by the host application)
#[derive(Debug, Clone, PartialEq)]
pub struct UserSession {
    pub user_id: String,
    pub account_id: String,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PublishError {
    #[error("Sign in to publish your site")]
    NotSignedIn,

    #[error("Name your site before publishing")]
    PlaceholderSiteName,

    #[error("Publish write failed: {0}")]
    Persistence(#[from] PersistenceError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PublishOutcome {
    pub slug: String,
    pub url: String,
}

/// Derive the public slug: lower-cased name with every run of
/// non-alphanumerics collapsed to one hyphen, plus a stable fragment of
/// the account id for cross-account uniqueness.
pub fn derive_slug(site_name: &str, account_id: &str) -> String {
    let mut base = String::with_capacity(site_name.len());
    for c in site_name.chars() {
        if c.is_ascii_alphanumeric() {
            base.push(c.to_ascii_lowercase());
        } else if !base.ends_with('-') {
            base.push('-');
        }
    }
    let base = base.trim_matches('-');

    let fragment = Uuid::new_v5(&Uuid::NAMESPACE_URL, account_id.as_bytes())
        .simple()
        .to_string();
    let fragment = &fragment[..8];

    if base.is_empty() {
        fragment.to_string()
    } else {
        format!("{base}-{fragment}")
    }
}

/// Validates, derives the slug, and persists the published record
pub struct PublishPipeline {
    autosave: Arc<AutosaveController>,
    notifier: Arc<dyn Notifier>,
}

impl PublishPipeline {
    pub fn new(autosave: Arc<AutosaveController>, notifier: Arc<dyn Notifier>) -> Self {
        Self { autosave, notifier }
    }

    /// Publish the record. On any failure the record is left unchanged
    /// and no write is performed (beyond what autosave was doing anyway).
    pub async fn publish(
        &self,
        session: Option<&UserSession>,
        record: &mut PersistenceRecord,
    ) -> Result<PublishOutcome, PublishError> {
        let user = match session {
            Some(user) => user,
            None => {
                self.notifier
                    .notify(Notice::PublishFailed(PublishError::NotSignedIn.to_string()));
                return Err(PublishError::NotSignedIn);
            }
        };

        if !record.has_real_site_name() {
            self.notifier.notify(Notice::PublishFailed(
                PublishError::PlaceholderSiteName.to_string(),
            ));
            return Err(PublishError::PlaceholderSiteName);
        }

        let slug = derive_slug(&record.site_name, &user.account_id);

        // Mutate a copy; the live record flips only once the write lands
        let mut next = record.clone();
        next.published = true;
        next.published_slug = Some(slug.clone());
        next.touch();

        match self.autosave.save_now_acked(next.clone()).await {
            Ok(()) => {
                *record = next;
                let url = format!("{PUBLIC_SITE_BASE}/{slug}");
                info!(slug = %slug, "site published");
                self.notifier.notify(Notice::Published { url: url.clone() });
                Ok(PublishOutcome { slug, url })
            }
            Err(e) => {
                self.notifier
                    .notify(Notice::PublishFailed(e.to_string()));
                Err(e.into())
            }
        }
    }
}
