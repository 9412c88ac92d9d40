/// Commands sent from the consumer loop to the main UI thread.
///
/// The main thread owns `TrayManager` (because `TrayIcon` is `!Send`),
/// so all tray mutations and process lifecycle events flow through this enum.
#[derive(Debug, Clone)]
pub enum TrayCommand {
    /// Create or destroy the tray indicator. Idempotent in both directions.
    SetEnabled(bool),
    /// Show a message through the indicator (the Tray alert backend).
    Message {
        /// Alert title.
        title: String,
        /// Alert body.
        body: String,
    },
    /// Clear any pending-message state back to the steady icon.
    ClearMessage,
    /// Shut down the application. The main thread will exit the event loop.
    Shutdown,
}
