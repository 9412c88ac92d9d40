//! Visual alert backends.
//!
//! Exactly one backend is live at a time, modeled as a tagged variant so a
//! runtime switch replaces the whole value and the two implementations can
//! never overlap.

use crate::{AppError, AppResult, TrayCommand};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::debug;

/// User-selectable visual alert backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Desktop notification daemon (notify-rust).
    Desktop,
    /// Message surfaced through the tray indicator.
    Tray,
}

/// The live backend. Constructing a new one tears the old one down by
/// plain ownership replacement.
pub(crate) enum AlertBackend {
    /// Desktop notification daemon.
    Desktop(DesktopNotifier),
    /// Tray indicator message.
    Tray(TrayNotifier),
    /// Recording probe, test builds only.
    #[cfg(test)]
    Probe(crate::tests::ProbeNotifier),
}

impl AlertBackend {
    /// Build the backend for `kind`.
    pub(crate) fn build(kind: BackendKind, tray_tx: mpsc::UnboundedSender<TrayCommand>) -> Self {
        debug!(?kind, "Alert backend constructed");
        match kind {
            BackendKind::Desktop => AlertBackend::Desktop(DesktopNotifier),
            BackendKind::Tray => AlertBackend::Tray(TrayNotifier { tray_tx }),
        }
    }

    /// Show one visual alert.
    pub(crate) fn show(&mut self, title: &str, body: &str) -> AppResult<()> {
        match self {
            AlertBackend::Desktop(notifier) => notifier.show(title, body),
            AlertBackend::Tray(notifier) => notifier.show(title, body),
            #[cfg(test)]
            AlertBackend::Probe(probe) => {
                probe.record(title, body);
                Ok(())
            }
        }
    }
}

/// Alert via the desktop notification daemon.
pub(crate) struct DesktopNotifier;

impl DesktopNotifier {
    #[track_caller]
    fn show(&mut self, title: &str, body: &str) -> AppResult<()> {
        notify_rust::Notification::new()
            .appname("Hubdeck")
            .summary(title)
            .body(body)
            .show()
            .map(|_| ())
            .map_err(|e| AppError::NotifyError {
                reason: format!("Desktop notification failed: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

/// Alert via the tray indicator on the main thread.
pub(crate) struct TrayNotifier {
    tray_tx: mpsc::UnboundedSender<TrayCommand>,
}

impl TrayNotifier {
    #[track_caller]
    fn show(&mut self, title: &str, body: &str) -> AppResult<()> {
        self.tray_tx
            .send(TrayCommand::Message {
                title: title.to_string(),
                body: body.to_string(),
            })
            .map_err(|e| AppError::ChannelSendFailed {
                message: format!("Tray message channel closed: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}
