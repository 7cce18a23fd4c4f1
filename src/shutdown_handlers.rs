use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::engine::{DrainTrigger, Lifecycle};
use crate::shutdown::{ShutdownReceiver, ShutdownSender, request_shutdown};

#[cfg(unix)]
use tokio::signal::unix::{Signal, SignalKind, signal};

/// Broadcast channel size for shutdown notifications (single signal fan-out).
const SHUTDOWN_CHANNEL_CAPACITY: usize = 1;

#[must_use]
pub fn shutdown_channel() -> (ShutdownSender, ShutdownReceiver) {
    broadcast::channel::<()>(SHUTDOWN_CHANNEL_CAPACITY)
}

/// Routes process signals into the drain path.
///
/// Handlers are installed before this returns, so a signal delivered right
/// after the call is not lost. The task keeps consuming repeated signals
/// (a second Ctrl+C is ignored) until the caller aborts it.
#[cfg(unix)]
pub fn setup_signal_shutdown_handler(
    shutdown_tx: &ShutdownSender,
    lifecycle: &Arc<Lifecycle>,
) -> tokio::task::JoinHandle<()> {
    let shutdown_tx = shutdown_tx.clone();
    let lifecycle = Arc::clone(lifecycle);

    let mut interrupt = register(SignalKind::interrupt(), "SIGINT");
    let mut terminate = register(SignalKind::terminate(), "SIGTERM");
    let mut hangup = register(SignalKind::hangup(), "SIGHUP");
    let mut quit = register(SignalKind::quit(), "SIGQUIT");
    let mut user1 = register(SignalKind::user_defined1(), "SIGUSR1");
    let mut user2 = register(SignalKind::user_defined2(), "SIGUSR2");

    tokio::spawn(async move {
        loop {
            let name = tokio::select! {
                () = next(&mut interrupt) => "SIGINT",
                () = next(&mut terminate) => "SIGTERM",
                () = next(&mut hangup) => "SIGHUP",
                () = next(&mut quit) => "SIGQUIT",
                () = next(&mut user1) => "SIGUSR1",
                () = next(&mut user2) => "SIGUSR2",
            };
            debug!("Received {}.", name);
            request_shutdown(&lifecycle, &shutdown_tx, DrainTrigger::Signal);
        }
    })
}

#[cfg(not(unix))]
pub fn setup_signal_shutdown_handler(
    shutdown_tx: &ShutdownSender,
    lifecycle: &Arc<Lifecycle>,
) -> tokio::task::JoinHandle<()> {
    let shutdown_tx = shutdown_tx.clone();
    let lifecycle = Arc::clone(lifecycle);
    tokio::spawn(async move {
        loop {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for Ctrl+C: {}", err);
                std::future::pending::<()>().await;
            }
            debug!("Received Ctrl+C.");
            request_shutdown(&lifecycle, &shutdown_tx, DrainTrigger::Signal);
        }
    })
}

#[cfg(unix)]
fn register(kind: SignalKind, name: &str) -> Option<Signal> {
    match signal(kind) {
        Ok(handler) => Some(handler),
        Err(err) => {
            warn!("Failed to register {} handler: {}", name, err);
            None
        }
    }
}

/// Resolves on the next delivery; pends forever for a missing or closed
/// handler.
#[cfg(unix)]
async fn next(handler: &mut Option<Signal>) {
    match handler.as_mut() {
        Some(handler) => {
            if handler.recv().await.is_none() {
                std::future::pending::<()>().await;
            }
        }
        None => std::future::pending::<()>().await,
    }
}
