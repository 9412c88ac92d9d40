mod commands;
#[allow(clippy::module_inception)]
mod config;
mod notify_config;
mod tray_config;

pub use {
    commands::CommandRecord,
    config::Config,
    notify_config::{NotifyConfig, NotifySnapshot},
    tray_config::TrayConfig,
};

pub(crate) use notify_config::{decode_sounds, encode_sounds};

use crate::BackendKind;
use crate::notifier::category;

/// Categories alerted on out of the box: everything defined.
pub(crate) const DEFAULT_CATEGORY_MASK: u32 =
    category::PEER_ONLINE | category::PEER_OFFLINE | category::CHAT_MESSAGE;

pub(crate) fn default_category_mask() -> u32 {
    DEFAULT_CATEGORY_MASK
}

pub(crate) fn default_backend() -> BackendKind {
    BackendKind::Desktop
}

pub(crate) fn default_true() -> bool {
    true
}
