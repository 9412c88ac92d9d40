use crate::BackendKind;
use crate::config::{DEFAULT_CATEGORY_MASK, default_backend, default_category_mask, default_true};

use serde::{Deserialize, Serialize};

/// Persisted notification settings.
///
/// `sounds` is stored as one newline-joined blob under a single key; the
/// split/join pair is reversible, including empty slots for categories
/// with no sound assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Master switch for all alerts.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Whether audible alerts accompany visual ones.
    #[serde(default)]
    pub sound_enabled: bool,
    /// Play sounds through a user-supplied command instead of the builtin
    /// player.
    #[serde(default)]
    pub external_player: bool,
    /// The external player command line; the sound path is appended.
    #[serde(default)]
    pub external_cmd: String,
    /// Bitmask of categories eligible for alerts.
    #[serde(default = "default_category_mask")]
    pub category_mask: u32,
    /// Newline-joined sound paths, indexed by category bit position.
    #[serde(default)]
    pub sounds: String,
    /// Which visual backend is live.
    #[serde(default = "default_backend")]
    pub backend: BackendKind,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sound_enabled: false,
            external_player: false,
            external_cmd: String::new(),
            category_mask: DEFAULT_CATEGORY_MASK,
            sounds: String::new(),
            backend: BackendKind::Desktop,
        }
    }
}

impl NotifyConfig {
    /// Decode the sound blob into the per-category list.
    pub fn sound_list(&self) -> Vec<String> {
        decode_sounds(&self.sounds)
    }

    /// Replace the per-category sound list.
    pub fn set_sound_list(&mut self, sounds: &[String]) {
        self.sounds = encode_sounds(sounds);
    }

    /// Read-only snapshot taken at dispatch time.
    pub fn snapshot(&self) -> NotifySnapshot {
        NotifySnapshot {
            enabled: self.enabled,
            sound_enabled: self.sound_enabled,
            external_player: self.external_player,
            external_cmd: self.external_cmd.clone(),
            category_mask: self.category_mask,
            sounds: self.sound_list(),
        }
    }
}

/// Dispatch-time view of the notification settings with the sound blob
/// already decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifySnapshot {
    /// Master switch for all alerts.
    pub enabled: bool,
    /// Whether audible alerts accompany visual ones.
    pub sound_enabled: bool,
    /// Use the external player command.
    pub external_player: bool,
    /// External player command line.
    pub external_cmd: String,
    /// Bitmask of enabled categories.
    pub category_mask: u32,
    /// Sound path per category bit position; empty entries mean no sound.
    pub sounds: Vec<String>,
}

/// Join sound paths into the persisted blob.
pub fn encode_sounds(sounds: &[String]) -> String {
    sounds.join("\n")
}

/// Split the persisted blob back into sound paths.
///
/// Inverse of [`encode_sounds`] including empty entries; an empty blob
/// decodes to an empty list.
pub fn decode_sounds(blob: &str) -> Vec<String> {
    if blob.is_empty() {
        return Vec::new();
    }
    blob.split('\n').map(str::to_string).collect()
}
