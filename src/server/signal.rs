// Signal handling module
//
// One concern only: turn SIGINT/SIGTERM into a shutdown notification the
// accept loop can select on.

use std::sync::Arc;
use tokio::sync::Notify;

/// Spawn the signal watcher and return the shutdown notifier it feeds.
///
/// On Unix both SIGINT and SIGTERM count as a stop request; either wakes
/// every waiter, the accept loop winds down, and the process exits 0.
#[cfg(unix)]
pub fn spawn_shutdown_watcher() -> Arc<Notify> {
    use tokio::signal::unix::{signal, SignalKind};

    let shutdown = Arc::new(Notify::new());
    let notifier = Arc::clone(&shutdown);

    tokio::spawn(async move {
        let Ok(mut sigint) = signal(SignalKind::interrupt()) else {
            crate::logger::log_error("Failed to register SIGINT handler");
            return;
        };
        let Ok(mut sigterm) = signal(SignalKind::terminate()) else {
            crate::logger::log_error("Failed to register SIGTERM handler");
            return;
        };

        tokio::select! {
            _ = sigint.recv() => {}
            _ = sigterm.recv() => {}
        }

        notifier.notify_waiters();
    });

    shutdown
}

/// Windows fallback: only Ctrl+C is available.
#[cfg(not(unix))]
pub fn spawn_shutdown_watcher() -> Arc<Notify> {
    let shutdown = Arc::new(Notify::new());
    let notifier = Arc::clone(&shutdown);

    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            notifier.notify_waiters();
        }
    });

    shutdown
}
