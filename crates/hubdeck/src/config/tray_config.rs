use crate::config::default_true;

use serde::{Deserialize, Serialize};

/// Persisted tray indicator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrayConfig {
    /// Whether the tray indicator exists.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for TrayConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}
