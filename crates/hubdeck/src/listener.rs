//! Producer-side bridge from client-library callbacks to the mailbox.
//!
//! The client library invokes these methods from whatever network or I/O
//! thread it happens to be on. Each call builds one immutable envelope and
//! posts it; the mailbox is the only synchronization involved. A closed
//! mailbox means teardown is underway, so the event is logged at debug
//! level and dropped.

use hubdeck_core::{Envelope, FieldMap, MailboxPost, PeerKey};

use tracing::debug;

/// Snapshot of a tracked peer as reported by the client library.
#[derive(Debug, Clone)]
pub struct PeerInfo {
    /// Stable identity.
    pub key: PeerKey,
    /// Display nick.
    pub nick: String,
    /// Hub the peer was last seen on.
    pub hub: String,
    /// Last-seen timestamp, preformatted by the client layer.
    pub seen: String,
    /// Free-form description.
    pub description: String,
    /// Whether the peer is granted a reserved upload slot.
    pub auto_grant: bool,
}

impl PeerInfo {
    fn fields(&self) -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert("nick".to_string(), self.nick.clone());
        fields.insert("hub".to_string(), self.hub.clone());
        fields.insert("seen".to_string(), self.seen.clone());
        fields.insert("description".to_string(), self.description.clone());
        fields.insert("auto_grant".to_string(), self.auto_grant.to_string());
        fields
    }
}

/// The listener the client library drives. Clone one per registration;
/// every method is safe from any thread.
#[derive(Debug, Clone)]
pub struct HubListener {
    post: MailboxPost,
}

impl HubListener {
    /// Create a listener posting into `post`.
    pub fn new(post: MailboxPost) -> Self {
        Self { post }
    }

    /// A peer entered the tracked set.
    pub fn peer_added(&self, info: &PeerInfo) {
        self.deliver(Envelope::Added {
            key: info.key,
            fields: info.fields(),
        });
    }

    /// A peer left the tracked set.
    pub fn peer_removed(&self, info: &PeerInfo) {
        self.deliver(Envelope::Removed { key: info.key });
    }

    /// A tracked peer's status line changed.
    pub fn status_changed(&self, key: PeerKey, status: &str) {
        self.deliver(Envelope::Updated {
            key: Some(key),
            status: status.to_string(),
            fields: FieldMap::new(),
        });
    }

    /// The currently selected peer's status line changed.
    ///
    /// Resolution to a concrete key happens on the consumer side through
    /// its selection accessor.
    pub fn focused_status_changed(&self, status: &str) {
        self.deliver(Envelope::Updated {
            key: None,
            status: status.to_string(),
            fields: FieldMap::new(),
        });
    }

    fn deliver(&self, envelope: Envelope) {
        if self.post.post(envelope).is_err() {
            // Teardown path: expected, not an error to surface.
            debug!("Mailbox closed, event dropped");
        }
    }
}
