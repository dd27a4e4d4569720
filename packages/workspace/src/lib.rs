//! # Sitecraft Workspace
//!
//! The persistence boundary of the composer: everything that leaves the
//! editing session. The editor crates stay synchronous; this crate owns
//! the async side.
//!
//! - [`record`]: the persisted record (blocks + site identity + publish
//!   state), JSON import/export with schema checking
//! - [`stores`]: collaborator traits (remote persistence store, local
//!   device cache, notification channel) plus in-memory implementations
//! - [`debounce`]: reusable debouncer (`schedule` / `cancel` / `flush`)
//! - [`autosave`]: debounced background writes with a save-status state
//!   machine and local-cache fallback
//! - [`publish`]: precondition checks, slug derivation, publish write
//!
//! The remote store performs a blind upsert with no concurrency token;
//! two sessions editing the same account can clobber each other. That is
//! an accepted product risk, not something this crate arbitrates.

pub mod autosave;
pub mod debounce;
pub mod publish;
pub mod record;
pub mod stores;

pub use autosave::{AutosaveController, SaveStatus, AUTOSAVE_DEBOUNCE};
pub use debounce::Debouncer;
pub use publish::{derive_slug, PublishError, PublishOutcome, PublishPipeline, UserSession};
pub use record::{PersistenceRecord, ValidationError, PLACEHOLDER_SITE_NAME, SCHEMA_VERSION};
pub use stores::{
    cache_key, load_or_default, DeviceCache, MemoryCache, MemoryStore, Notice, Notifier,
    NullNotifier, PersistenceError, PersistenceStore, RecordingNotifier,
};
