//! # Snapshot Bus
//!
//! A multicast "current value + future updates" channel built on
//! `tokio::sync::broadcast`.
//!
//! ## Overview
//!
//! `tokio::sync::watch` only guarantees that receivers observe the *latest*
//! value, so rapid updates can be coalesced. Observers of playback state need
//! every snapshot in order, and late subscribers still need the current one.
//! [`SnapshotBus`] pairs a broadcast channel with the last published value:
//!
//! ```text
//!              publish(v)          ┌──────────────┐
//! Translator ─────────────────────>│ current = v  │
//!                                  │ broadcast(v) ├──────> Subscription (recv: v, ...)
//!                                  └──────┬───────┘
//!                      subscribe()        │
//! Late observer <─────────────────────────┘  first recv() = current, then updates
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use core_runtime::events::SnapshotBus;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let bus = SnapshotBus::new(0u32, 16);
//! let mut early = bus.subscribe();
//! bus.publish(1);
//!
//! let mut late = bus.subscribe();
//! assert_eq!(early.recv().await.unwrap(), 0);
//! assert_eq!(early.recv().await.unwrap(), 1);
//! assert_eq!(late.recv().await.unwrap(), 1);
//! # }
//! ```
//!
//! ## Error Handling
//!
//! - **`RecvError::Lagged(n)`**: the subscriber fell more than `capacity`
//!   snapshots behind and missed `n` of them. Non-fatal.
//! - **`RecvError::Closed`**: the bus was dropped.

use futures::stream::{self, Stream};
use parking_lot::Mutex;
use std::fmt;
use tokio::sync::broadcast;
use tracing::warn;

pub use tokio::sync::broadcast::error::RecvError;

/// Default number of snapshots buffered per subscriber.
pub const DEFAULT_SNAPSHOT_BUFFER_SIZE: usize = 64;

/// Current-value broadcast channel.
pub struct SnapshotBus<T> {
    current: Mutex<T>,
    sender: broadcast::Sender<T>,
}

impl<T: Clone> SnapshotBus<T> {
    /// Creates a bus holding `initial`, buffering up to `capacity` snapshots
    /// per subscriber.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero, like `broadcast::channel`.
    pub fn new(initial: T, capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            current: Mutex::new(initial),
            sender,
        }
    }

    /// Replaces the current value and forwards it to every subscriber.
    ///
    /// Returns the number of subscribers that received it.
    pub fn publish(&self, value: T) -> usize {
        let mut current = self.current.lock();
        *current = value.clone();
        // Sending while holding the lock keeps subscribe() from observing the
        // new value both as its initial snapshot and as an update.
        self.sender.send(value).unwrap_or(0)
    }

    /// Clone of the most recently published value.
    pub fn latest(&self) -> T {
        self.current.lock().clone()
    }

    /// Subscribes; the first value received is the current one.
    pub fn subscribe(&self) -> Subscription<T> {
        let current = self.current.lock();
        Subscription {
            pending: Some(current.clone()),
            receiver: self.sender.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl<T> fmt::Debug for SnapshotBus<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotBus")
            .field("subscriber_count", &self.sender.receiver_count())
            .finish()
    }
}

/// Receiving half of a [`SnapshotBus`].
pub struct Subscription<T> {
    pending: Option<T>,
    receiver: broadcast::Receiver<T>,
}

impl<T: Clone> Subscription<T> {
    /// Receives the next snapshot.
    ///
    /// # Errors
    ///
    /// Returns `RecvError::Lagged(n)` if `n` snapshots were missed and
    /// `RecvError::Closed` once the bus is gone.
    pub async fn recv(&mut self) -> Result<T, RecvError> {
        if let Some(value) = self.pending.take() {
            return Ok(value);
        }
        self.receiver.recv().await
    }

    /// Receives a snapshot if one is ready.
    pub fn try_recv(&mut self) -> Option<Result<T, RecvError>> {
        if let Some(value) = self.pending.take() {
            return Some(Ok(value));
        }
        match self.receiver.try_recv() {
            Ok(value) => Some(Ok(value)),
            Err(broadcast::error::TryRecvError::Empty) => None,
            Err(broadcast::error::TryRecvError::Lagged(n)) => Some(Err(RecvError::Lagged(n))),
            Err(broadcast::error::TryRecvError::Closed) => Some(Err(RecvError::Closed)),
        }
    }

    /// Takes every snapshot that is ready right now, skipping over lag gaps.
    pub fn drain(&mut self) -> Vec<T> {
        let mut values = Vec::new();
        while let Some(next) = self.try_recv() {
            match next {
                Ok(value) => values.push(value),
                Err(RecvError::Lagged(n)) => warn!(missed = n, "Snapshot subscriber lagged"),
                Err(RecvError::Closed) => break,
            }
        }
        values
    }

    /// Converts into a `Stream` of snapshots that ends when the bus closes.
    ///
    /// Lag gaps are logged and skipped.
    pub fn into_stream(self) -> impl Stream<Item = T>
    where
        T: Send + 'static,
    {
        stream::unfold(self, |mut subscription| async move {
            loop {
                match subscription.recv().await {
                    Ok(value) => return Some((value, subscription)),
                    Err(RecvError::Lagged(n)) => {
                        warn!(missed = n, "Snapshot subscriber lagged")
                    }
                    Err(RecvError::Closed) => return None,
                }
            }
        })
    }
}

impl<T> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("has_pending", &self.pending.is_some())
            .finish()
    }
}
