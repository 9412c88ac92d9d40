//! Hubdeck Core Library
//!
//! Cross-thread event-bridging core for a hub-client companion: typed
//! event envelopes, a many-producer/single-consumer mailbox, an idempotent
//! projection of the tracked peer set, and the ordered mutable tree of
//! user-defined hub commands.
//!
//! # Example
//!
//! ```
//! use hubdeck_core::{mailbox, Envelope, FieldMap, PeerKey, ProjectionStore};
//!
//! let (post, mut drain) = mailbox();
//! let mut projection = ProjectionStore::new(Box::new(|| None));
//!
//! let key = PeerKey::new([0u8; 24]);
//! let _ = post.post(Envelope::Added { key, fields: FieldMap::new() });
//!
//! while let Some(envelope) = drain.try_next() {
//!     if let Some(change) = projection.apply(&envelope) {
//!         println!("redraw {} ({:?})", change.key, change.kind);
//!     }
//! }
//! ```

mod command_tree;
mod envelope;
mod error;
mod mailbox;
mod projection;

pub use {
    command_tree::{CommandDefinition, CommandKind, CommandTree, Direction, NodeBody, NodeId},
    envelope::{Envelope, FieldMap, PEER_KEY_LEN, PeerKey},
    error::{CoreError, Result as CoreResult},
    mailbox::{MailboxDrain, MailboxPost, mailbox},
    projection::{AppliedChange, ChangeKind, PeerEntry, ProjectionStore, SelectionSource},
};

#[cfg(test)]
mod tests;
