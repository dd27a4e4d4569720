//! # Autosave Controller
//!
//! Debounced background persistence with a save-status state machine:
//!
//! ```text
//! saved → saving → {saved | error}
//! error → saving        (next trigger retries; error is not a dead end)
//! ```
//!
//! Rules:
//! - every committed mutation re-arms a 2-second debounce timer; a burst
//!   of N edits inside the window produces exactly one write
//! - at most one write is in flight; triggers that arrive mid-write are
//!   applied after it settles, and the write always uses the latest
//!   state delivered before it fires (an in-flight write is never
//!   retried with stale data, but an intermediate state can be skipped)
//! - a manual save cancels the pending timer and fires immediately,
//!   through the same single-flight path
//! - a failed remote write mirrors the record into the device cache and
//!   parks in `Error`; a successful write also refreshes the mirror
//!
//! Status is published over a `watch` channel; interested UI pieces
//! subscribe explicitly.

use crate::debounce::Debouncer;
use crate::record::PersistenceRecord;
use crate::stores::{cache_key, DeviceCache, Notice, Notifier, PersistenceError, PersistenceStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Quiet window after the last committed mutation before a write fires
pub const AUTOSAVE_DEBOUNCE: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    Saved,
    Saving,
    Error,
}

type Ack = oneshot::Sender<Result<(), PersistenceError>>;

enum Command {
    /// A mutation was committed; arm (or re-arm) the debounce timer
    Mutated(PersistenceRecord),

    /// Explicit save: cancel the timer and write immediately
    SaveNow {
        record: PersistenceRecord,
        ack: Option<Ack>,
    },
}

struct PendingWrite {
    record: PersistenceRecord,
    manual: bool,
    acks: Vec<Ack>,
}

/// Handle to the autosave task
pub struct AutosaveController {
    cmd_tx: mpsc::UnboundedSender<Command>,
    status_rx: watch::Receiver<SaveStatus>,
    task: JoinHandle<()>,
}

impl AutosaveController {
    pub fn new(
        owner_id: impl Into<String>,
        store: Arc<dyn PersistenceStore>,
        cache: Arc<dyn DeviceCache>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self::with_debounce(owner_id, store, cache, notifier, AUTOSAVE_DEBOUNCE)
    }

    pub fn with_debounce(
        owner_id: impl Into<String>,
        store: Arc<dyn PersistenceStore>,
        cache: Arc<dyn DeviceCache>,
        notifier: Arc<dyn Notifier>,
        delay: Duration,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (status_tx, status_rx) = watch::channel(SaveStatus::Saved);

        let worker = Worker {
            owner_id: owner_id.into(),
            store,
            cache,
            notifier,
            status_tx,
        };
        let task = tokio::spawn(run_loop(worker, cmd_rx, delay));

        Self {
            cmd_tx,
            status_rx,
            task,
        }
    }

    /// Report a committed mutation, carrying the latest persisted state
    pub fn schedule_save(&self, record: PersistenceRecord) {
        let _ = self.cmd_tx.send(Command::Mutated(record));
    }

    /// Manual "Save": bypass the debounce and write now
    pub fn save_now(&self, record: PersistenceRecord) {
        let _ = self.cmd_tx.send(Command::SaveNow { record, ack: None });
    }

    /// Manual save that reports the write outcome (publish path)
    pub async fn save_now_acked(
        &self,
        record: PersistenceRecord,
    ) -> Result<(), PersistenceError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::SaveNow {
                record,
                ack: Some(tx),
            })
            .map_err(|_| PersistenceError::WriteFailed("autosave stopped".to_string()))?;
        rx.await
            .map_err(|_| PersistenceError::WriteFailed("autosave stopped".to_string()))?
    }

    pub fn status(&self) -> SaveStatus {
        *self.status_rx.borrow()
    }

    /// Explicit subscription for UI pieces that display save state
    pub fn subscribe_status(&self) -> watch::Receiver<SaveStatus> {
        self.status_rx.clone()
    }

    /// Stop the controller. Anything still unsaved is flushed to the
    /// device cache so local edits survive the session.
    pub async fn shutdown(self) {
        drop(self.cmd_tx);
        let _ = self.task.await;
    }
}

struct Worker {
    owner_id: String,
    store: Arc<dyn PersistenceStore>,
    cache: Arc<dyn DeviceCache>,
    notifier: Arc<dyn Notifier>,
    status_tx: watch::Sender<SaveStatus>,
}

async fn run_loop(
    worker: Worker,
    mut cmd_rx: mpsc::UnboundedReceiver<Command>,
    delay: Duration,
) {
    let (mut debouncer, mut fire_rx) = Debouncer::new(delay);
    let mut pending: Option<PendingWrite> = None;

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => match cmd {
                Some(Command::Mutated(record)) => {
                    match &mut pending {
                        Some(write) => write.record = record,
                        None => {
                            pending = Some(PendingWrite {
                                record,
                                manual: false,
                                acks: Vec::new(),
                            });
                        }
                    }
                    debouncer.schedule();
                }

                Some(Command::SaveNow { record, ack }) => {
                    let mut write = match pending.take() {
                        Some(mut write) => {
                            write.record = record;
                            write
                        }
                        None => PendingWrite {
                            record,
                            manual: false,
                            acks: Vec::new(),
                        },
                    };
                    write.manual = true;
                    if let Some(ack) = ack {
                        write.acks.push(ack);
                    }
                    pending = Some(write);
                    debouncer.flush();
                }

                None => break,
            },

            Some(generation) = fire_rx.recv() => {
                // A fire that elapsed before the latest re-arm would
                // write the just-mutated state without waiting out the
                // fresh quiet window.
                if !debouncer.is_current(generation) {
                    debug!("superseded debounce fire ignored");
                    continue;
                }
                // Single-flight: the write is awaited here, so a second
                // one cannot start before it resolves. Commands arriving
                // meanwhile queue up and re-arm the timer afterwards.
                match pending.take() {
                    Some(write) => worker.write(write).await,
                    None => debug!("debounce fired with nothing to save"),
                }
            }
        }
    }

    // Session end with a write still pending: local edits are never
    // lost, so park them in the device cache.
    if let Some(write) = pending.take() {
        worker.mirror_to_cache(&write.record);
    }
}

impl Worker {
    async fn write(&self, write: PendingWrite) {
        let _ = self.status_tx.send(SaveStatus::Saving);

        let result = self.store.save(&self.owner_id, &write.record).await;
        match &result {
            Ok(()) => {
                // Refresh the mirror for fast reload
                self.mirror_to_cache(&write.record);
                let _ = self.status_tx.send(SaveStatus::Saved);
                if write.manual {
                    self.notifier.notify(Notice::SaveSucceeded);
                }
                debug!(owner_id = %self.owner_id, "record saved");
            }
            Err(e) => {
                warn!(owner_id = %self.owner_id, error = %e, "remote save failed, kept in device cache");
                self.mirror_to_cache(&write.record);
                let _ = self.status_tx.send(SaveStatus::Error);
                self.notifier.notify(Notice::SaveFailed(e.to_string()));
            }
        }

        for ack in write.acks {
            let _ = ack.send(result.clone());
        }
    }

    fn mirror_to_cache(&self, record: &PersistenceRecord) {
        match record.to_json() {
            Ok(raw) => self.cache.set(&cache_key(&self.owner_id), raw),
            Err(e) => warn!(error = %e, "record not serializable for cache mirror"),
        }
    }
}
