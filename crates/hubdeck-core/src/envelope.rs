//! Typed event envelopes bridging client-library callbacks to the consumer.
//!
//! The client library fires listener callbacks on arbitrary threads. Each
//! callback is converted into one immutable [`Envelope`] and posted to the
//! mailbox, so the consumer side never sees a foreign thread directly.

use std::collections::BTreeMap;
use std::fmt;

/// Width of a peer identity in bytes (the client protocol's content id).
pub const PEER_KEY_LEN: usize = 24;

/// Stable opaque identity of a tracked peer.
///
/// Never reused across a peer's lifetime. Displayed as lowercase hex for
/// logs and debugging; the bytes themselves are protocol-opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PeerKey([u8; PEER_KEY_LEN]);

impl PeerKey {
    /// Wrap raw identity bytes.
    pub const fn new(bytes: [u8; PEER_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// The raw identity bytes.
    pub const fn as_bytes(&self) -> &[u8; PEER_KEY_LEN] {
        &self.0
    }
}

impl fmt::Display for PeerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Materialized display fields for a peer, keyed by field name.
///
/// Ordered map so projection snapshots render deterministically.
pub type FieldMap = BTreeMap<String, String>;

/// One immutable state-change message.
///
/// Built by the producer-side bridge, consumed exactly once by the
/// projection store. `Updated` may omit the key, in which case it applies
/// to whatever entry the presentation layer currently has selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope {
    /// A peer entered the tracked set.
    Added {
        /// Identity of the new peer.
        key: PeerKey,
        /// Initial display fields.
        fields: FieldMap,
    },
    /// A tracked peer's state changed.
    Updated {
        /// Identity of the peer, or `None` for the currently selected one.
        key: Option<PeerKey>,
        /// New status line.
        status: String,
        /// Only the fields that changed.
        fields: FieldMap,
    },
    /// A peer left the tracked set.
    Removed {
        /// Identity of the removed peer.
        key: PeerKey,
    },
}

impl Envelope {
    /// The key this envelope addresses, if it carries one.
    pub fn key(&self) -> Option<PeerKey> {
        match self {
            Envelope::Added { key, .. } | Envelope::Removed { key } => Some(*key),
            Envelope::Updated { key, .. } => *key,
        }
    }
}
