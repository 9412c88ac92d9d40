use crate::config::{Config, NotifyConfig, decode_sounds, encode_sounds};
use crate::{BackendKind, notifier::category};

use hubdeck_core::{CommandDefinition, CommandKind};

/// WHAT: The sounds blob survives an encode/decode round trip
/// WHY: The list is stored under one key; empty slots must be preserved
#[test]
fn given_sound_list_with_gaps_when_round_tripped_then_identical() {
    // Given: A list with an empty slot in the middle
    let sounds = vec![
        "online.wav".to_string(),
        String::new(),
        "chat.wav".to_string(),
    ];

    // When: Encoding then decoding
    let blob = encode_sounds(&sounds);
    let decoded = decode_sounds(&blob);

    // Then: The list is unchanged, gap included
    assert_eq!(decoded, sounds);
}

/// WHAT: An empty blob decodes to an empty list
/// WHY: A fresh config has no sounds configured at all
#[test]
fn given_empty_blob_when_decoded_then_empty_list() {
    assert_eq!(decode_sounds(""), Vec::<String>::new());
    assert_eq!(encode_sounds(&[]), "");
}

/// WHAT: The dispatch snapshot carries the decoded list
/// WHY: The dispatcher indexes sounds by category bit, not by blob offset
#[test]
fn given_notify_config_when_snapshotted_then_sounds_decoded() {
    // Given: A config with two sounds in the blob
    let mut cfg = NotifyConfig::default();
    cfg.set_sound_list(&["a.wav".to_string(), "b.wav".to_string()]);

    // When: Taking the dispatch-time snapshot
    let snapshot = cfg.snapshot();

    // Then: The list is materialized and the flags copied
    assert_eq!(snapshot.sounds, vec!["a.wav", "b.wav"]);
    assert!(snapshot.enabled);
    assert_eq!(snapshot.category_mask, cfg.category_mask);
}

/// WHAT: A full config survives a TOML round trip
/// WHY: Commands are an ordered record list; order must be preserved
#[test]
#[allow(clippy::unwrap_used)]
fn given_config_with_commands_when_toml_round_tripped_then_order_preserved() {
    // Given: A config with two ordered commands and a non-default backend
    let mut config = Config::default();
    config.notifications.backend = BackendKind::Tray;
    config.notifications.category_mask = category::PEER_ONLINE;
    config.commands = vec![
        CommandDefinition {
            name: "Grant slot".to_string(),
            command: "!grant".to_string(),
            hub_scope: String::new(),
            context_mask: 0b0010,
            kind: CommandKind::Chat,
        }
        .into(),
        CommandDefinition {
            name: "Kick".to_string(),
            command: "!kick %[nick]".to_string(),
            hub_scope: "adc://*".to_string(),
            context_mask: 0b0001,
            kind: CommandKind::PrivateMessage,
        }
        .into(),
    ];

    // When: Serializing to TOML and back
    let toml_text = toml::to_string_pretty(&config).unwrap();
    let parsed: Config = toml::from_str(&toml_text).unwrap();

    // Then: Everything relevant survived, in order
    assert_eq!(parsed.notifications.backend, BackendKind::Tray);
    assert_eq!(parsed.notifications.category_mask, category::PEER_ONLINE);
    let names: Vec<_> = parsed.commands.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Grant slot", "Kick"]);
    assert_eq!(parsed.commands[1].hub_scope, "adc://*");
}

/// WHAT: Missing keys fall back to defaults when parsing
/// WHY: Old config files must keep loading as the schema grows
#[test]
#[allow(clippy::unwrap_used)]
fn given_minimal_toml_when_parsed_then_defaults_fill_in() {
    // Given: A config file with only one section present
    let toml_text = "[notifications]\nsound_enabled = true\n";

    // When: Parsing
    let parsed: Config = toml::from_str(toml_text).unwrap();

    // Then: Explicit value taken, everything else defaulted
    assert!(parsed.notifications.sound_enabled);
    assert!(parsed.notifications.enabled);
    assert_eq!(parsed.notifications.backend, BackendKind::Desktop);
    assert!(parsed.tray.enabled);
    assert!(parsed.commands.is_empty());
}
