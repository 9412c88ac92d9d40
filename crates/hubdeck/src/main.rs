//! Hubdeck binary: wires the consumer loop, tray, and config together.

use hubdeck::{App, AppChannels, Config, HubListener, TrayCommand, TrayManager};

use std::sync::Arc;

use hubdeck_core::mailbox;
use tao::{
    event::Event,
    event_loop::{ControlFlow, EventLoopBuilder},
};
use tokio::sync::{Mutex, mpsc, watch};
use tracing::{debug, error};

/// Application entry point.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("hubdeck=debug")
        .init();

    let event_loop = EventLoopBuilder::<TrayCommand>::with_user_event().build();
    let tray_proxy = event_loop.create_proxy();

    // TrayManager lives on the main thread - TrayIcon is !Send on all platforms.
    let mut tray_manager = TrayManager::new();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::UserEvent(cmd) => {
                let result = match cmd {
                    TrayCommand::SetEnabled(enable) => tray_manager.set_enabled(enable),
                    TrayCommand::Message { title, body } => tray_manager.message(&title, &body),
                    TrayCommand::ClearMessage => tray_manager.clear_message(),
                    TrayCommand::Shutdown => {
                        *control_flow = ControlFlow::ExitWithCode(0);
                        Ok(())
                    }
                };
                if let Err(e) = result {
                    error!(error = ?e, "Tray command failed");
                }
                return;
            }
            Event::NewEvents(tao::event::StartCause::Init) => {
                let config = match Config::load() {
                    Ok(c) => c,
                    Err(e) => {
                        error!("Failed to load config: {:?}", e);
                        std::process::exit(1);
                    }
                };

                if config.tray.enabled {
                    if let Err(e) = tray_manager.set_enabled(true) {
                        error!("Failed to create tray indicator: {:?}", e);
                        std::process::exit(1);
                    }
                }

                #[cfg(target_os = "macos")]
                unsafe {
                    use core_foundation::runloop::{CFRunLoopGetMain, CFRunLoopWakeUp};
                    CFRunLoopWakeUp(CFRunLoopGetMain());
                }

                let backend = config.notifications.backend;
                let config = Arc::new(Mutex::new(config));
                let (post, drain) = mailbox();
                let (request_tx, request_rx) = mpsc::channel(32);
                let (view_tx, mut view_rx) = mpsc::unbounded_channel();
                let (tray_tx, mut tray_rx) = mpsc::unbounded_channel();
                let (shutdown_tx, shutdown_rx) = watch::channel(false);

                let tray_proxy = tray_proxy.clone();

                // Spawn tokio runtime on separate thread.
                // TrayManager stays on the main thread.
                std::thread::spawn(move || {
                    let rt = match tokio::runtime::Runtime::new() {
                        Ok(rt) => rt,
                        Err(e) => {
                            error!("Failed to create tokio runtime: {:?}", e);
                            std::process::exit(1);
                        }
                    };

                    rt.block_on(async {
                        // The client library registers this listener at its
                        // init and drives it from its network threads; the
                        // mailbox is the only thing the two sides share.
                        let listener = HubListener::new(post);

                        // Bridge tray commands onto the tao loop; the proxy
                        // wakes the UI thread, the channel keeps the rest of
                        // the app free of tao types.
                        let forwarder = tokio::spawn(async move {
                            while let Some(cmd) = tray_rx.recv().await {
                                if tray_proxy.send_event(cmd).is_err() {
                                    break;
                                }
                            }
                        });

                        // Stand-in for the presentation layer: drain redraw
                        // hints so the outbound channel never backs up.
                        let mut view_shutdown = shutdown_rx.clone();
                        let view_drain = tokio::spawn(async move {
                            loop {
                                tokio::select! {
                                    Some(event) = view_rx.recv() => {
                                        debug!(?event, "View event");
                                    }
                                    _ = view_shutdown.changed() => break,
                                    else => break,
                                }
                            }
                        });

                        // Selection accessor: the presentation layer owns the
                        // real one; headless, nothing is ever selected.
                        let app = App::new(
                            Box::new(|| None),
                            backend,
                            config,
                            AppChannels {
                                mailbox: drain,
                                request_tx,
                                request_rx,
                                view_tx,
                                tray_tx,
                                shutdown_tx,
                            },
                        );

                        if let Err(e) = app.run().await {
                            error!(error = ?e, "App error");
                        }

                        forwarder.abort();
                        let _ = view_drain.await;

                        // Keep the producer handle alive for the app's lifetime.
                        let _ = &listener;
                    });
                });
            }
            _ => {}
        }
    });
}
