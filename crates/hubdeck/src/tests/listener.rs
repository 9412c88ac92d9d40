use crate::listener::{HubListener, PeerInfo};

use hubdeck_core::{Envelope, PEER_KEY_LEN, PeerKey, mailbox};

fn key(n: u8) -> PeerKey {
    PeerKey::new([n; PEER_KEY_LEN])
}

fn info(n: u8, nick: &str) -> PeerInfo {
    PeerInfo {
        key: key(n),
        nick: nick.to_string(),
        hub: "adc://hub.example:411".to_string(),
        seen: "2026-08-29 10:00".to_string(),
        description: String::new(),
        auto_grant: true,
    }
}

/// WHAT: A callback from the client library comes out of the drain as a
/// fully populated envelope
/// WHY: The producer side must capture everything at call time; the
/// consumer never calls back into the client library
#[test]
#[allow(clippy::unwrap_used)]
fn given_peer_added_callback_when_drained_then_fields_captured() {
    // Given: A listener over a fresh mailbox
    let (post, mut drain) = mailbox();
    let listener = HubListener::new(post);

    // When: The client library reports a new peer
    listener.peer_added(&info(1, "alice"));

    // Then: One Added envelope with the snapshot's fields
    match drain.try_next().unwrap() {
        Envelope::Added { key: k, fields } => {
            assert_eq!(k, key(1));
            assert_eq!(fields.get("nick").map(String::as_str), Some("alice"));
            assert_eq!(
                fields.get("hub").map(String::as_str),
                Some("adc://hub.example:411")
            );
            assert_eq!(fields.get("auto_grant").map(String::as_str), Some("true"));
        }
        other => panic!("expected Added, got {other:?}"),
    }
    assert!(drain.try_next().is_none());
}

/// WHAT: Status callbacks map to keyed and keyless updates respectively
/// WHY: The keyless form defers peer resolution to the consumer's
/// selection accessor
#[test]
#[allow(clippy::unwrap_used)]
fn given_status_callbacks_when_drained_then_keying_matches_origin() {
    let (post, mut drain) = mailbox();
    let listener = HubListener::new(post);

    // When: One keyed and one selection-relative status change
    listener.status_changed(key(2), "away");
    listener.focused_status_changed("back");

    // Then: The first carries its key, the second carries none
    match drain.try_next().unwrap() {
        Envelope::Updated { key: k, status, .. } => {
            assert_eq!(k, Some(key(2)));
            assert_eq!(status, "away");
        }
        other => panic!("expected Updated, got {other:?}"),
    }
    match drain.try_next().unwrap() {
        Envelope::Updated { key: k, status, .. } => {
            assert_eq!(k, None);
            assert_eq!(status, "back");
        }
        other => panic!("expected Updated, got {other:?}"),
    }
}

/// WHAT: Callbacks after teardown are dropped without panicking
/// WHY: Network threads may still fire while the consumer is shutting
/// down; that must be harmless
#[test]
fn given_closed_mailbox_when_callbacks_fire_then_silently_dropped() {
    // Given: A mailbox whose drain has been closed
    let (post, mut drain) = mailbox();
    drain.close();
    while drain.try_next().is_some() {}

    // When: The client library keeps reporting
    let listener = HubListener::new(post);
    listener.peer_added(&info(3, "bob"));
    listener.peer_removed(&info(3, "bob"));

    // Then: Nothing surfaces and nothing panics
    assert!(drain.try_next().is_none());
}
