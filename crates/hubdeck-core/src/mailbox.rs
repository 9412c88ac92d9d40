//! Many-producer, single-consumer delivery channel for envelopes.
//!
//! The mailbox is the only synchronization point between the client
//! library's callback threads and the consumer loop. Everything downstream
//! of it (projection store, command tree, dispatcher) is touched by exactly
//! one thread and needs no locking of its own.
//!
//! Ordering contract: FIFO in the order posts are observed by the channel.
//! Concurrent producers racing to post are serialized by the channel's own
//! internal order, which is acceptable because downstream application is
//! idempotent per key. Delivery is at-most-once; envelopes still queued at
//! shutdown are dropped (they describe transient state, not durable data).

use crate::{CoreError, CoreResult, Envelope};

use std::panic::Location;

use error_location::ErrorLocation;
use tokio::sync::mpsc;
use tracing::debug;

/// Create a connected mailbox pair.
///
/// The channel is unbounded: producers must never block on the consumer,
/// and envelopes are small enough that backpressure buys nothing here.
pub fn mailbox() -> (MailboxPost, MailboxDrain) {
    let (tx, rx) = mpsc::unbounded_channel();
    (MailboxPost { tx }, MailboxDrain { rx })
}

/// Producer half of the mailbox.
///
/// Cheap to clone; one clone per producer. `Send + Sync`, callable from
/// any thread.
#[derive(Debug, Clone)]
pub struct MailboxPost {
    tx: mpsc::UnboundedSender<Envelope>,
}

impl MailboxPost {
    /// Post one envelope for eventual single delivery to the consumer.
    ///
    /// Never blocks. Fails only with [`CoreError::MailboxClosed`] once the
    /// consumer has shut the mailbox down; producers are expected to drop
    /// the event in that case.
    #[track_caller]
    pub fn post(&self, envelope: Envelope) -> CoreResult<()> {
        self.tx.send(envelope).map_err(|_| CoreError::MailboxClosed {
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Whether the consumer has closed the mailbox.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consumer half of the mailbox. Exactly one exists per mailbox.
#[derive(Debug)]
pub struct MailboxDrain {
    rx: mpsc::UnboundedReceiver<Envelope>,
}

impl MailboxDrain {
    /// Wait for the next envelope in posted order.
    ///
    /// Returns `None` once the mailbox is closed and fully drained.
    pub async fn next(&mut self) -> Option<Envelope> {
        self.rx.recv().await
    }

    /// Non-blocking pull, for draining what is already queued.
    pub fn try_next(&mut self) -> Option<Envelope> {
        self.rx.try_recv().ok()
    }

    /// Stop accepting new posts.
    ///
    /// Already-queued envelopes can still be pulled; whether they are
    /// applied or discarded is the shutdown policy of the caller.
    pub fn close(&mut self) {
        debug!("Mailbox closed to new posts");
        self.rx.close();
    }
}
