//! # Typed Event Bus
//!
//! Small pub/sub utility with typed topics. Consumers subscribe explicitly
//! and receive events over an mpsc channel; there is no ambient broadcast
//! medium. Disconnected subscribers are pruned on the next emit.

use std::sync::mpsc::{channel, Receiver, Sender};

/// Publisher side of a typed event topic
pub struct EventBus<T: Clone> {
    subscribers: Vec<Sender<T>>,
}

impl<T: Clone> EventBus<T> {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    /// Register a new subscriber and return its receiving end
    pub fn subscribe(&mut self) -> Receiver<T> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    /// Deliver an event to every live subscriber
    pub fn emit(&mut self, event: T) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Number of live subscriptions (as of the last emit)
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<T: Clone> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}
