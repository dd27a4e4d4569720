//! # Debouncer
//!
//! Reusable debounce primitive: `schedule` arms (or re-arms) a timer,
//! `cancel` disarms it, `flush` fires immediately. Fires are delivered
//! on an mpsc channel so consumers can `select!` on them.
//!
//! A `schedule` cannot recall a fire that an already-elapsed timer put
//! on the channel. Every fire therefore carries the generation of the
//! arm that produced it; consumers check it with [`Debouncer::is_current`]
//! and drop fires from a superseded arm.

use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

pub struct Debouncer {
    delay: Duration,
    tx: UnboundedSender<u64>,
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    /// Create a debouncer and the channel its fires arrive on
    pub fn new(delay: Duration) -> (Self, UnboundedReceiver<u64>) {
        let (tx, rx) = unbounded_channel();
        (
            Self {
                delay,
                tx,
                generation: 0,
                pending: None,
            },
            rx,
        )
    }

    /// Arm the timer, resetting any pending one (true debounce: a burst
    /// of N schedules inside the window yields one live fire)
    pub fn schedule(&mut self) {
        self.cancel();
        self.generation += 1;
        let generation = self.generation;
        let tx = self.tx.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(generation);
        }));
    }

    /// Disarm the pending timer, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Cancel the pending timer and fire right now
    pub fn flush(&mut self) {
        self.cancel();
        self.generation += 1;
        let _ = self.tx.send(self.generation);
    }

    /// Whether a received fire came from the latest arm. A fire from an
    /// earlier generation elapsed before a later `schedule`/`flush` and
    /// must be ignored.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    pub fn is_armed(&self) -> bool {
        self.pending
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
