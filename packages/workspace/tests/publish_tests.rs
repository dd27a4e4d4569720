//! Publish pipeline: precondition ordering, record integrity on failure,
//! slug stability, and the shared write path.

use sitecraft_workspace::{
    AutosaveController, MemoryCache, MemoryStore, Notice, PersistenceRecord, PublishError,
    PublishPipeline, RecordingNotifier, UserSession,
};
use std::sync::Arc;

struct Fixture {
    store: Arc<MemoryStore>,
    notifier: Arc<RecordingNotifier>,
    pipeline: PublishPipeline,
}

fn fixture() -> Fixture {
    let store = Arc::new(MemoryStore::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let controller = Arc::new(AutosaveController::new(
        "acct-1",
        store.clone(),
        Arc::new(MemoryCache::new()),
        notifier.clone(),
    ));
    let pipeline = PublishPipeline::new(controller, notifier.clone());
    Fixture {
        store,
        notifier,
        pipeline,
    }
}

fn operator() -> UserSession {
    UserSession {
        user_id: "user-7".to_string(),
        account_id: "acct-1".to_string(),
    }
}

#[tokio::test(start_paused = true)]
async fn test_session_is_checked_before_site_name() {
    let f = fixture();
    let mut record = PersistenceRecord::first_run();

    // Both preconditions fail; the session check wins
    let result = f.pipeline.publish(None, &mut record).await;
    assert_eq!(result, Err(PublishError::NotSignedIn));
}

#[tokio::test(start_paused = true)]
async fn test_placeholder_name_blocks_publish_without_write() {
    let f = fixture();
    let mut record = PersistenceRecord::first_run();

    let result = f.pipeline.publish(Some(&operator()), &mut record).await;

    assert_eq!(result, Err(PublishError::PlaceholderSiteName));
    assert!(!record.published);
    assert_eq!(record.published_slug, None);
    assert_eq!(f.store.save_calls(), 0, "no write on validation failure");
    assert!(f
        .notifier
        .notices()
        .iter()
        .any(|n| matches!(n, Notice::PublishFailed(_))));
}

#[tokio::test(start_paused = true)]
async fn test_publish_persists_flags_and_reports_url() {
    let f = fixture();
    let mut record = PersistenceRecord::first_run();
    record.site_name = "Maya's Bakery".to_string();

    let outcome = f
        .pipeline
        .publish(Some(&operator()), &mut record)
        .await
        .unwrap();

    assert!(outcome.slug.starts_with("maya-s-bakery-"));
    assert_eq!(
        outcome.url,
        format!("https://sites.sitecraft.app/{}", outcome.slug)
    );

    assert!(record.published);
    assert_eq!(record.published_slug.as_deref(), Some(outcome.slug.as_str()));

    let persisted = f.store.record_for("acct-1").unwrap();
    assert!(persisted.published);
    assert_eq!(persisted.published_slug.as_deref(), Some(outcome.slug.as_str()));

    assert!(f
        .notifier
        .notices()
        .iter()
        .any(|n| matches!(n, Notice::Published { .. })));
}

#[tokio::test(start_paused = true)]
async fn test_republish_with_unchanged_name_is_idempotent() {
    let f = fixture();
    let mut record = PersistenceRecord::first_run();
    record.site_name = "Maya's Bakery".to_string();

    let first = f
        .pipeline
        .publish(Some(&operator()), &mut record)
        .await
        .unwrap();
    let second = f
        .pipeline
        .publish(Some(&operator()), &mut record)
        .await
        .unwrap();

    assert_eq!(first.slug, second.slug);
    assert_eq!(first.url, second.url);
}

#[tokio::test(start_paused = true)]
async fn test_failed_publish_write_leaves_record_unpublished() {
    let f = fixture();
    f.store.fail_next_saves(1);

    let mut record = PersistenceRecord::first_run();
    record.site_name = "Maya's Bakery".to_string();

    let result = f.pipeline.publish(Some(&operator()), &mut record).await;

    assert!(matches!(result, Err(PublishError::Persistence(_))));
    assert!(!record.published, "the live record flips only on success");
    assert_eq!(record.published_slug, None);
}
