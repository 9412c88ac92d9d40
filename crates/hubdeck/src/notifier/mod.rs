//! Notification dispatch: focus gating, category masking, backend fanout.
//!
//! The dispatcher lives on the consumer thread and holds no locks. It
//! reads a [`NotifySnapshot`](crate::config::NotifySnapshot) per call
//! rather than caching settings, so configuration edits take effect on the
//! very next event.

mod backend;
mod sound;

pub use backend::BackendKind;
pub(crate) use backend::AlertBackend;
pub(crate) use sound::sound_slot;
#[cfg(test)]
pub(crate) use sound::{ExternalOutcome, run_external};

use crate::config::NotifySnapshot;
use crate::TrayCommand;

use std::path::Path;

use tokio::sync::mpsc;
use tracing::{debug, instrument, warn};

/// Alert categories, disjoint powers of two so the mask and the sound
/// list index from the same bit positions.
pub mod category {
    /// A tracked peer came online.
    pub const PEER_ONLINE: u32 = 1 << 0;
    /// A tracked peer went offline.
    pub const PEER_OFFLINE: u32 = 1 << 1;
    /// Hub chat mentioned the user.
    pub const CHAT_MESSAGE: u32 = 1 << 2;
    /// A private message arrived.
    pub const PRIVATE_MESSAGE: u32 = 1 << 3;
}

/// Whether the dispatcher may interrupt the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusState {
    /// Host window unfocused; alerts are eligible.
    Armed,
    /// Host window focused; do not interrupt the user.
    Suppressed,
}

/// Decides per event whether to surface a visual and/or audible alert.
pub struct NotificationDispatcher {
    focus: FocusState,
    backend: AlertBackend,
    backend_kind: BackendKind,
    tray_tx: mpsc::UnboundedSender<TrayCommand>,
}

impl NotificationDispatcher {
    /// Create a dispatcher with the given live backend.
    ///
    /// Starts [`FocusState::Suppressed`]: the host window is focused at
    /// startup in practice, and a missed alert beats a spurious one. The
    /// presentation layer's first focus-lost report arms it.
    pub fn new(kind: BackendKind, tray_tx: mpsc::UnboundedSender<TrayCommand>) -> Self {
        Self {
            focus: FocusState::Suppressed,
            backend: AlertBackend::build(kind, tray_tx.clone()),
            backend_kind: kind,
            tray_tx,
        }
    }

    /// The host window gained focus; stop interrupting.
    pub fn focus_gained(&mut self) {
        self.focus = FocusState::Suppressed;
    }

    /// The host window lost focus; alerts are eligible again.
    pub fn focus_lost(&mut self) {
        self.focus = FocusState::Armed;
    }

    /// Current gating state.
    pub fn focus(&self) -> FocusState {
        self.focus
    }

    /// The kind of the live backend.
    pub fn backend_kind(&self) -> BackendKind {
        self.backend_kind
    }

    /// Replace the live backend at runtime.
    ///
    /// The old backend is torn down and the new one constructed in one
    /// ownership move; at no point are two live.
    #[instrument(skip(self))]
    pub fn switch_backend(&mut self, kind: BackendKind) {
        self.backend = AlertBackend::build(kind, self.tray_tx.clone());
        self.backend_kind = kind;
    }

    /// Surface one alert, or nothing.
    ///
    /// No-op unless armed, globally enabled, both strings non-empty, and
    /// the category bit present in the enabled mask. The visual alert goes
    /// to the live backend; the audible one resolves through the category's
    /// bit position into the sound list.
    #[instrument(skip(self, cfg, title, body))]
    pub fn notify(&mut self, cfg: &NotifySnapshot, category: u32, title: &str, body: &str) {
        if self.focus == FocusState::Suppressed {
            return;
        }
        if !cfg.enabled || title.is_empty() || body.is_empty() {
            return;
        }
        if cfg.category_mask & category == 0 {
            debug!(category, "Category not in enabled mask, skipped");
            return;
        }

        if let Err(e) = self.backend.show(title, body) {
            warn!(error = %e, "Visual alert failed");
        }

        if cfg.sound_enabled {
            self.play_sound(cfg, category);
        }
    }

    /// Swap in a recording backend.
    #[cfg(test)]
    pub(crate) fn install_probe(&mut self, probe: crate::tests::ProbeNotifier) {
        self.backend = AlertBackend::Probe(probe);
    }

    fn play_sound(&self, cfg: &NotifySnapshot, category: u32) {
        let Some(path) = resolve_sound(cfg, category) else {
            return;
        };
        // Missing files skip silently; they are a configuration gap, not
        // an error.
        if !Path::new(path).exists() {
            return;
        }

        if cfg.external_player {
            if cfg.external_cmd.is_empty() {
                return;
            }
            sound::play_external(cfg.external_cmd.clone(), path.into());
        } else {
            sound::play_builtin(path.into());
        }
    }
}

/// Resolve the sound path for `category`, if it names exactly one enabled
/// slot inside the configured list and that slot is non-empty.
pub(crate) fn resolve_sound(cfg: &NotifySnapshot, category: u32) -> Option<&str> {
    let slot = sound_slot(category)?;
    let path = cfg.sounds.get(slot)?;
    (!path.is_empty()).then_some(path.as_str())
}
