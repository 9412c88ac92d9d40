//! Consumer-side materialized view of the tracked peer set.
//!
//! Folds envelopes into an index keyed by [`PeerKey`]. Application is
//! idempotent: duplicate adds merge, removes of absent keys are silent
//! no-ops, and keyed updates of unknown peers fall back to an implicit
//! add. The store runs exclusively on the consumer thread and therefore
//! holds no locks.

use crate::{Envelope, FieldMap, PeerKey};

use std::collections::HashMap;

use tracing::{debug, instrument};

/// Accessor for the presentation layer's current selection.
///
/// Injected at construction instead of reaching for a global window
/// handle; focus-targeted updates resolve through it.
pub trait SelectionSource: Send {
    /// The key of the currently selected entry, if any.
    fn selected(&self) -> Option<PeerKey>;
}

impl<F> SelectionSource for F
where
    F: Fn() -> Option<PeerKey> + Send,
{
    fn selected(&self) -> Option<PeerKey> {
        self()
    }
}

/// What kind of mutation an envelope produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// A new entry was created.
    Inserted,
    /// An existing entry was merged into.
    Upserted,
    /// An entry was deleted.
    Removed,
}

/// One applied mutation, enough for the presentation layer to redraw
/// incrementally instead of rescanning the whole view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedChange {
    /// The entry that changed.
    pub key: PeerKey,
    /// How it changed.
    pub kind: ChangeKind,
}

/// Latest known materialized state for one peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerEntry {
    /// Identity of the peer.
    pub key: PeerKey,
    /// Display fields, merged across envelopes.
    pub fields: FieldMap,
    /// Whether the presentation layer currently shows this entry.
    pub displayed: bool,
}

/// Indexed mapping from peer identity to latest materialized state.
pub struct ProjectionStore {
    entries: HashMap<PeerKey, PeerEntry>,
    selection: Box<dyn SelectionSource>,
}

impl ProjectionStore {
    /// Create an empty store resolving focus-targeted updates through
    /// `selection`.
    pub fn new(selection: Box<dyn SelectionSource>) -> Self {
        Self {
            entries: HashMap::new(),
            selection,
        }
    }

    /// Fold one envelope into the store.
    ///
    /// Returns `None` when the envelope had no effect (remove of an absent
    /// key, focus-targeted update with nothing selected); otherwise which
    /// key changed and how.
    #[instrument(skip(self, envelope))]
    pub fn apply(&mut self, envelope: &Envelope) -> Option<AppliedChange> {
        match envelope {
            Envelope::Added { key, fields } => Some(self.upsert(*key, None, fields)),
            Envelope::Updated {
                key,
                status,
                fields,
            } => {
                let key = match key {
                    Some(key) => *key,
                    // "Whatever is currently focused": resolve through the
                    // injected selection accessor, drop when nothing is.
                    None => match self.selection.selected() {
                        Some(selected) => selected,
                        None => {
                            debug!("Focus-targeted update with no selection, dropped");
                            return None;
                        }
                    },
                };
                Some(self.upsert(key, Some(status), fields))
            }
            Envelope::Removed { key } => {
                if self.entries.remove(key).is_none() {
                    // Already gone via another path; idempotent no-op.
                    debug!(key = %key, "Remove of unknown key, no-op");
                    return None;
                }
                Some(AppliedChange {
                    key: *key,
                    kind: ChangeKind::Removed,
                })
            }
        }
    }

    fn upsert(&mut self, key: PeerKey, status: Option<&str>, fields: &FieldMap) -> AppliedChange {
        let kind = if self.entries.contains_key(&key) {
            ChangeKind::Upserted
        } else {
            ChangeKind::Inserted
        };
        let entry = self.entries.entry(key).or_insert_with(|| PeerEntry {
            key,
            fields: FieldMap::new(),
            displayed: false,
        });

        // Merge only the fields the envelope carries; the rest keep their
        // last known values.
        for (name, value) in fields {
            entry.fields.insert(name.clone(), value.clone());
        }
        if let Some(status) = status {
            entry.fields.insert("status".to_string(), status.to_string());
        }

        AppliedChange { key, kind }
    }

    /// Look up the materialized entry for `key`.
    pub fn get(&self, key: &PeerKey) -> Option<&PeerEntry> {
        self.entries.get(key)
    }

    /// Mark whether the presentation layer currently displays `key`.
    pub fn set_displayed(&mut self, key: &PeerKey, displayed: bool) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.displayed = displayed;
        }
    }

    /// Number of tracked entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate all entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &PeerEntry> {
        self.entries.values()
    }
}
