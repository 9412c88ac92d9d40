//! System tray indicator lifecycle.
//!
//! Owns the `TrayIcon` on the main thread and supports idempotent
//! enable/disable plus the tooltip-based message path used by the Tray
//! alert backend. Disable detaches the context menu before the indicator
//! itself drops, so the menu never outlives its host.

use crate::{AppError, AppResult};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::{debug, info, instrument};
use tray_icon::menu::{Menu, MenuItem, PredefinedMenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

const STEADY_TOOLTIP: &str = "Hubdeck";

/// Stable id of the Show/Hide menu item, matched by the consumer loop.
pub(crate) const MENU_ID_SHOW_HIDE: &str = "show-hide";
/// Stable id of the Exit menu item.
pub(crate) const MENU_ID_EXIT: &str = "exit";

/// Which embedded icon the indicator shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrayFace {
    /// Nothing pending.
    Steady,
    /// A message arrived while the window was unfocused.
    Alert,
}

struct TrayParts {
    icon: TrayIcon,
}

/// System tray indicator manager. Lives on the main/UI thread only.
pub struct TrayManager {
    parts: Option<TrayParts>,
}

impl TrayManager {
    /// Create a manager with no indicator yet.
    pub fn new() -> Self {
        Self { parts: None }
    }

    /// Create or destroy the indicator.
    ///
    /// Enabling when already enabled, or disabling when already disabled,
    /// is a no-op.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn set_enabled(&mut self, enable: bool) -> AppResult<()> {
        match (enable, self.parts.is_some()) {
            (true, true) | (false, false) => {
                debug!(enable, "Tray already in requested state");
                Ok(())
            }
            (true, false) => {
                self.parts = Some(Self::build()?);
                info!("Tray indicator created");
                Ok(())
            }
            (false, true) => {
                if let Some(parts) = self.parts.take() {
                    // Detach the menu before the indicator drops.
                    parts.icon.set_menu(None);
                }
                info!("Tray indicator destroyed");
                Ok(())
            }
        }
    }

    /// Whether the indicator currently exists.
    pub fn is_enabled(&self) -> bool {
        self.parts.is_some()
    }

    /// Surface a message through the indicator.
    ///
    /// Tooltip carries the text; the icon flips to the alert face until
    /// [`TrayManager::clear_message`]. No-op while disabled.
    #[track_caller]
    pub fn message(&mut self, title: &str, body: &str) -> AppResult<()> {
        let Some(parts) = &self.parts else {
            return Ok(());
        };
        Self::set_face(parts, TrayFace::Alert)?;
        parts
            .icon
            .set_tooltip(Some(format!("{title}\n{body}")))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to set tooltip: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Return to the steady icon and tooltip.
    #[track_caller]
    pub fn clear_message(&mut self) -> AppResult<()> {
        let Some(parts) = &self.parts else {
            return Ok(());
        };
        Self::set_face(parts, TrayFace::Steady)?;
        parts
            .icon
            .set_tooltip(Some(STEADY_TOOLTIP))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to set tooltip: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    #[track_caller]
    fn build() -> AppResult<TrayParts> {
        let menu = Menu::new();

        let show_hide = MenuItem::with_id(MENU_ID_SHOW_HIDE, "Show/Hide window", true, None);
        let exit = MenuItem::with_id(MENU_ID_EXIT, "Exit", true, None);

        menu.append(&show_hide).map_err(|e| AppError::TrayError {
            reason: format!("Failed to add show/hide menu: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;
        menu.append(&PredefinedMenuItem::separator())
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to add separator: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;
        menu.append(&exit).map_err(|e| AppError::TrayError {
            reason: format!("Failed to add exit menu: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let icon = TrayIconBuilder::new()
            .with_tooltip(STEADY_TOOLTIP)
            .with_menu(Box::new(menu))
            .with_icon(Self::load_icon(TrayFace::Steady)?)
            .build()
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to create tray icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(TrayParts { icon })
    }

    #[track_caller]
    fn set_face(parts: &TrayParts, face: TrayFace) -> AppResult<()> {
        parts
            .icon
            .set_icon(Some(Self::load_icon(face)?))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to update icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Decode one of the embedded PNG icons.
    #[track_caller]
    fn load_icon(face: TrayFace) -> AppResult<Icon> {
        let png_bytes: &[u8] = match face {
            TrayFace::Steady => include_bytes!("../resources/icons/hub.png"),
            TrayFace::Alert => include_bytes!("../resources/icons/hub_alert.png"),
        };

        let img = image::load_from_memory(png_bytes).map_err(|e| AppError::TrayError {
            reason: format!("Failed to decode embedded icon: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let rgba = img.into_rgba8();
        let (width, height) = (rgba.width(), rgba.height());

        Icon::from_rgba(rgba.into_raw(), width, height).map_err(|e| AppError::TrayError {
            reason: format!("Failed to create icon from RGBA: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

impl Default for TrayManager {
    fn default() -> Self {
        Self::new()
    }
}
