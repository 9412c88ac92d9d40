use crate::{
    AppResult, BackendKind, TrayCommand, UiRequest, ViewEvent,
    config::Config,
    notifier::{NotificationDispatcher, category},
    tray_manager::{MENU_ID_EXIT, MENU_ID_SHOW_HIDE},
};

use std::sync::Arc;

use hubdeck_core::{
    AppliedChange, ChangeKind, CommandTree, Envelope, MailboxDrain, PeerKey, ProjectionStore,
    SelectionSource,
};
use tokio::sync::{Mutex, mpsc, watch};
use tracing::{debug, error, info, instrument, warn};
use tray_icon::menu::MenuEvent;

/// The single consumer of the mailbox.
///
/// Runs on the async runtime thread and owns every piece of mutable state
/// downstream of the mailbox (projection, command tree, dispatcher), so
/// none of it needs locking. Tray mutations go out through `tray_tx`
/// because `TrayIcon` is `!Send` and must remain on the UI thread.
pub struct App {
    projection: ProjectionStore,
    commands: CommandTree,
    dispatcher: NotificationDispatcher,
    mailbox: MailboxDrain,
    request_tx: mpsc::Sender<UiRequest>,
    request_rx: mpsc::Receiver<UiRequest>,
    view_tx: mpsc::UnboundedSender<ViewEvent>,
    tray_tx: mpsc::UnboundedSender<TrayCommand>,
    config: Arc<Mutex<Config>>,
    shutdown_tx: watch::Sender<bool>,
}

/// Channel endpoints the consumer loop plugs into.
///
/// Gathered into one struct so [`App::new`] reads as wiring, not as a
/// parade of same-typed arguments.
pub struct AppChannels {
    /// Mailbox consumer half.
    pub mailbox: MailboxDrain,
    /// Sender side of the request channel, for self-addressed requests
    /// (the tray Exit entry routes through it).
    pub request_tx: mpsc::Sender<UiRequest>,
    /// Presentation-layer requests.
    pub request_rx: mpsc::Receiver<UiRequest>,
    /// Outbound redraw hints and signals.
    pub view_tx: mpsc::UnboundedSender<ViewEvent>,
    /// Tray mutations, forwarded to the UI thread.
    pub tray_tx: mpsc::UnboundedSender<TrayCommand>,
    /// Raised once on shutdown.
    pub shutdown_tx: watch::Sender<bool>,
}

impl App {
    /// Wire up a consumer loop.
    ///
    /// `selection` is the presentation layer's "currently selected key"
    /// accessor; `backend` picks the initial alert backend.
    pub fn new(
        selection: Box<dyn SelectionSource>,
        backend: BackendKind,
        config: Arc<Mutex<Config>>,
        channels: AppChannels,
    ) -> Self {
        let dispatcher = NotificationDispatcher::new(backend, channels.tray_tx.clone());
        Self {
            projection: ProjectionStore::new(selection),
            commands: CommandTree::new(),
            dispatcher,
            mailbox: channels.mailbox,
            request_tx: channels.request_tx,
            request_rx: channels.request_rx,
            view_tx: channels.view_tx,
            tray_tx: channels.tray_tx,
            config,
            shutdown_tx: channels.shutdown_tx,
        }
    }

    /// Run the consumer event loop until shutdown.
    #[instrument(skip(self))]
    pub async fn run(mut self) -> AppResult<()> {
        info!("Hubdeck starting");

        self.load_commands().await;

        // Menu events arrive on a global blocking receiver; one persistent
        // blocking task forwards them into the async loop. Dropping menu_rx
        // makes blocking_send fail, which ends the task.
        let (menu_tx, mut menu_rx) = mpsc::channel(32);
        let menu_handle = tokio::task::spawn_blocking(move || {
            let receiver = MenuEvent::receiver();
            while let Ok(event) = receiver.recv() {
                if menu_tx.blocking_send(event).is_err() {
                    break;
                }
            }
        });

        loop {
            tokio::select! {
                Some(envelope) = self.mailbox.next() => {
                    self.handle_envelope(envelope).await;
                }

                Some(event) = menu_rx.recv() => {
                    self.handle_menu_event(event).await;
                }

                Some(request) = self.request_rx.recv() => {
                    if !self.handle_request(request).await {
                        break;
                    }
                }

                else => {
                    info!("All channels closed, shutting down");
                    break;
                }
            }
        }

        // Shutdown order: stop intake first, discard what is queued
        // (transient state), then release UI resources.
        self.mailbox.close();
        let mut discarded = 0;
        while self.mailbox.try_next().is_some() {
            discarded += 1;
        }
        if discarded > 0 {
            debug!(discarded, "Dropped undelivered envelopes at shutdown");
        }

        drop(menu_rx);

        match tokio::time::timeout(std::time::Duration::from_secs(1), menu_handle).await {
            Ok(Ok(())) => info!("Menu event forwarder stopped cleanly"),
            Ok(Err(e)) => error!(error = ?e, "Menu event forwarder task panicked"),
            Err(_) => info!(
                "Menu event forwarder did not stop within timeout, \
                     will be cleaned up on exit"
            ),
        }

        let _ = self.tray_tx.send(TrayCommand::Shutdown);
        let _ = self.shutdown_tx.send(true);
        info!("Hubdeck shut down successfully");

        Ok(())
    }

    /// Rebuild the command tree from the persisted record list.
    async fn load_commands(&mut self) {
        let definitions: Vec<_> = {
            let cfg = self.config.lock().await;
            cfg.commands.iter().cloned().map(Into::into).collect()
        };
        let loaded = self.commands.load(definitions);
        info!(loaded, "User commands loaded");
    }

    /// Fold one envelope into the projection and fan out its effects.
    async fn handle_envelope(&mut self, envelope: Envelope) {
        // Capture the display name up front: a removal erases it, an add
        // has not materialized it yet.
        let nick = match &envelope {
            Envelope::Added { fields, .. } => fields.get("nick").cloned(),
            _ => envelope.key().and_then(|key| self.nick_of(&key)),
        }
        .unwrap_or_else(|| "Tracked peer".to_string());
        let status = match &envelope {
            Envelope::Updated { status, .. } => status.clone(),
            _ => String::new(),
        };

        let Some(change) = self.projection.apply(&envelope) else {
            return;
        };

        if self.view_tx.send(ViewEvent::Peer(change)).is_err() {
            debug!("View channel closed, redraw hint dropped");
        }

        self.alert_for(change, &nick, &status).await;
    }

    async fn alert_for(&mut self, change: AppliedChange, nick: &str, status: &str) {
        let nick = if nick.is_empty() { "Tracked peer" } else { nick };
        let (cat, body) = match change.kind {
            ChangeKind::Inserted => (category::PEER_ONLINE, "is now tracked".to_string()),
            ChangeKind::Upserted if !status.is_empty() => (category::PEER_ONLINE, status.to_string()),
            ChangeKind::Upserted => return,
            ChangeKind::Removed => (category::PEER_OFFLINE, "is gone".to_string()),
        };

        let snapshot = {
            let cfg = self.config.lock().await;
            cfg.notifications.snapshot()
        };
        self.dispatcher.notify(&snapshot, cat, nick, &body);
    }

    fn nick_of(&self, key: &PeerKey) -> Option<String> {
        self.projection
            .get(key)
            .and_then(|entry| entry.fields.get("nick"))
            .cloned()
    }

    /// Handle one presentation-layer request. Returns false on shutdown.
    #[instrument(skip(self))]
    async fn handle_request(&mut self, request: UiRequest) -> bool {
        match request {
            UiRequest::AddCommand { definition, group } => {
                let result = match group {
                    Some(group) => self.commands.add_in(group, definition),
                    None => self.commands.add(definition),
                };
                match result {
                    Ok(id) => {
                        if let Some((parent, row)) = self.commands.position(id) {
                            let _ = self.view_tx.send(ViewEvent::SelectCommandRow { parent, row });
                        }
                        self.persist_commands().await;
                    }
                    Err(e) => warn!(error = %e, "Add command rejected"),
                }
            }
            UiRequest::ChangeCommand { id, definition } => {
                match self.commands.change(id, definition) {
                    Ok(()) => self.persist_commands().await,
                    Err(e) => warn!(error = %e, "Change command rejected"),
                }
            }
            UiRequest::RemoveCommand { id } => match self.commands.remove(id) {
                Ok(()) => self.persist_commands().await,
                Err(e) => warn!(error = %e, "Remove command rejected"),
            },
            UiRequest::MoveCommand { id, direction } => {
                match self.commands.move_node(id, direction) {
                    Ok(true) => {
                        if let Some((parent, row)) = self.commands.position(id) {
                            let _ = self.view_tx.send(ViewEvent::SelectCommandRow { parent, row });
                        }
                        self.persist_commands().await;
                    }
                    // Boundary no-op: nothing moved, nothing to persist.
                    Ok(false) => {}
                    Err(e) => warn!(error = %e, "Move command rejected"),
                }
            }
            UiRequest::FocusGained => {
                self.dispatcher.focus_gained();
                let _ = self.tray_tx.send(TrayCommand::ClearMessage);
            }
            UiRequest::FocusLost => self.dispatcher.focus_lost(),
            UiRequest::SwitchBackend(kind) => {
                self.dispatcher.switch_backend(kind);
                let mut cfg = self.config.lock().await;
                cfg.notifications.backend = kind;
                if let Err(e) = cfg.save() {
                    warn!(error = %e, "Failed to persist backend choice");
                }
            }
            UiRequest::SetTrayEnabled(enable) => {
                let _ = self.tray_tx.send(TrayCommand::SetEnabled(enable));
                let mut cfg = self.config.lock().await;
                cfg.tray.enabled = enable;
                if let Err(e) = cfg.save() {
                    warn!(error = %e, "Failed to persist tray setting");
                }
            }
            UiRequest::Shutdown => {
                info!("Shutdown requested");
                return false;
            }
        }
        true
    }

    /// Write the tree back to the config in display order.
    async fn persist_commands(&mut self) {
        let records: Vec<_> = self
            .commands
            .definitions()
            .into_iter()
            .map(Into::into)
            .collect();
        let mut cfg = self.config.lock().await;
        cfg.commands = records;
        if let Err(e) = cfg.save() {
            warn!(error = %e, "Failed to persist user commands");
        }
    }

    /// Handle tray menu events.
    async fn handle_menu_event(&mut self, event: MenuEvent) {
        if event.id.0 == MENU_ID_SHOW_HIDE {
            let _ = self.view_tx.send(ViewEvent::ToggleMainWindow);
        } else if event.id.0 == MENU_ID_EXIT {
            info!("Exit requested from tray menu");
            if let Err(e) = self.request_tx.send(UiRequest::Shutdown).await {
                error!(error = ?e, "Failed to send shutdown command");
            }
        }
    }
}
