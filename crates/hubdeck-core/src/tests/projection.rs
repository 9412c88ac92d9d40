use crate::{ChangeKind, Envelope, FieldMap, PeerKey, ProjectionStore};

use crate::tests::key;

fn fields(pairs: &[(&str, &str)]) -> FieldMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn store() -> ProjectionStore {
    ProjectionStore::new(Box::new(|| None))
}

/// WHAT: First Added for a key inserts, second Added merges
/// WHY: Producers may deliver duplicate adds; re-add must be idempotent
#[test]
#[allow(clippy::unwrap_used)]
fn given_duplicate_added_when_applied_then_insert_then_upsert() {
    // Given: An empty store
    let mut store = store();

    // When: The same key is added twice with different fields
    let first = store.apply(&Envelope::Added {
        key: key(1),
        fields: fields(&[("nick", "alice")]),
    });
    let second = store.apply(&Envelope::Added {
        key: key(1),
        fields: fields(&[("hub", "adc://hub.example:1511")]),
    });

    // Then: First reports Inserted, second Upserted, and fields merged
    assert_eq!(first.map(|c| c.kind), Some(ChangeKind::Inserted));
    assert_eq!(second.map(|c| c.kind), Some(ChangeKind::Upserted));
    let entry = store.get(&key(1)).unwrap();
    assert_eq!(entry.fields.get("nick").map(String::as_str), Some("alice"));
    assert_eq!(
        entry.fields.get("hub").map(String::as_str),
        Some("adc://hub.example:1511")
    );
}

/// WHAT: Removing a never-added key produces no AppliedChange
/// WHY: The producer may have removed the entry via a different path already
#[test]
fn given_unknown_key_when_removed_then_silent_no_op() {
    // Given: An empty store
    let mut store = store();

    // When: Removing a key that was never added
    let change = store.apply(&Envelope::Removed { key: key(9) });

    // Then: No change is reported and the store stays empty
    assert!(change.is_none());
    assert!(store.is_empty());
}

/// WHAT: Entry state is identical regardless of interspersed duplicates
/// WHY: Idempotence under duplication is the store's ordering escape hatch
#[test]
fn given_duplicated_sequence_when_applied_then_same_result_as_clean_sequence() {
    // Given: A clean add/update sequence and one laced with duplicates
    let add = Envelope::Added {
        key: key(1),
        fields: fields(&[("nick", "bob")]),
    };
    let update = Envelope::Updated {
        key: Some(key(1)),
        status: "online".to_string(),
        fields: fields(&[("slots", "3")]),
    };
    let remove_other = Envelope::Removed { key: key(7) };

    let mut clean = store();
    clean.apply(&add);
    clean.apply(&update);

    let mut noisy = store();
    noisy.apply(&add);
    noisy.apply(&remove_other);
    noisy.apply(&add);
    noisy.apply(&update);
    noisy.apply(&remove_other);
    noisy.apply(&update);

    // Then: Both stores materialize the same entry
    assert_eq!(clean.get(&key(1)), noisy.get(&key(1)));
    assert_eq!(clean.len(), noisy.len());
}

/// WHAT: Keyed update of an absent key becomes an implicit add
/// WHY: Stores must tolerate a late or lost Added without dropping state
#[test]
#[allow(clippy::unwrap_used)]
fn given_absent_key_when_updated_then_implicit_insert() {
    // Given: An empty store
    let mut store = store();

    // When: An update arrives for a key never added
    let change = store.apply(&Envelope::Updated {
        key: Some(key(2)),
        status: "away".to_string(),
        fields: FieldMap::new(),
    });

    // Then: The entry is created and carries the status
    assert_eq!(change.map(|c| c.kind), Some(ChangeKind::Inserted));
    let entry = store.get(&key(2)).unwrap();
    assert_eq!(entry.fields.get("status").map(String::as_str), Some("away"));
}

/// WHAT: Focus-targeted update resolves through the injected selection
/// WHY: The store must never reach for a global window handle itself
#[test]
#[allow(clippy::unwrap_used)]
fn given_selection_when_keyless_update_then_selected_entry_changes() {
    // Given: A store whose selection accessor points at key 3
    let selected: Option<PeerKey> = Some(key(3));
    let mut store = ProjectionStore::new(Box::new(move || selected));
    store.apply(&Envelope::Added {
        key: key(3),
        fields: FieldMap::new(),
    });

    // When: A keyless update arrives
    let change = store.apply(&Envelope::Updated {
        key: None,
        status: "online".to_string(),
        fields: FieldMap::new(),
    });

    // Then: The selected entry absorbed the status
    assert_eq!(change.map(|c| c.key), Some(key(3)));
    let entry = store.get(&key(3)).unwrap();
    assert_eq!(
        entry.fields.get("status").map(String::as_str),
        Some("online")
    );
}

/// WHAT: Focus-targeted update with no selection is dropped
/// WHY: There is nothing to apply it to; dropping beats guessing
#[test]
fn given_no_selection_when_keyless_update_then_dropped() {
    // Given: A store whose selection accessor yields nothing
    let mut store = store();

    // When: A keyless update arrives
    let change = store.apply(&Envelope::Updated {
        key: None,
        status: "online".to_string(),
        fields: FieldMap::new(),
    });

    // Then: Nothing changed
    assert!(change.is_none());
    assert!(store.is_empty());
}

/// WHAT: Remove after add deletes the entry and reports Removed
/// WHY: The presentation layer needs the key to drop its row
#[test]
#[allow(clippy::unwrap_used)]
fn given_tracked_entry_when_removed_then_entry_destroyed() {
    // Given: A store tracking one entry
    let mut store = store();
    store.apply(&Envelope::Added {
        key: key(1),
        fields: FieldMap::new(),
    });

    // When: The entry is removed, twice
    let first = store.apply(&Envelope::Removed { key: key(1) });
    let second = store.apply(&Envelope::Removed { key: key(1) });

    // Then: First reports Removed, second is a no-op
    assert_eq!(first.unwrap().kind, ChangeKind::Removed);
    assert!(second.is_none());
    assert!(store.get(&key(1)).is_none());
}
