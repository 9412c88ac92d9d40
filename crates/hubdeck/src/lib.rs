//! Hubdeck: consumer-side bridge between a hub client library and its
//! presentation layer.
//!
//! The client library fires callbacks on arbitrary network threads; this
//! crate funnels them through the mailbox in `hubdeck-core` into a single
//! consumer loop that owns the projection, the user-command tree, and the
//! notification dispatcher. The presentation layer talks to the loop
//! through [`UiRequest`] and listens on [`ViewEvent`].

mod app;
mod config;
mod error;
mod listener;
mod notifier;
#[cfg(test)]
mod tests;
mod tray_command;
mod tray_manager;
mod ui_request;
mod view_event;

pub use {
    app::{App, AppChannels},
    config::{CommandRecord, Config, NotifyConfig, NotifySnapshot, TrayConfig},
    error::{AppError, Result as AppResult},
    listener::{HubListener, PeerInfo},
    notifier::{BackendKind, FocusState, NotificationDispatcher, category},
    tray_command::TrayCommand,
    tray_manager::TrayManager,
    ui_request::UiRequest,
    view_event::ViewEvent,
};
