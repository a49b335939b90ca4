// Shutdown signalling between OS signal handlers and the HTTP server

use anyhow::Result;
use std::sync::Arc;
use tokio::sync::watch;

/// Shared shutdown flag. Clones observe the same request.
#[derive(Clone)]
pub struct ShutdownState {
    requested: Arc<watch::Sender<bool>>,
}

impl ShutdownState {
    pub fn new() -> Self {
        let (requested, _) = watch::channel(false);
        Self {
            requested: Arc::new(requested),
        }
    }

    /// Ask the server to stop accepting connections. Safe to call repeatedly.
    pub fn request_shutdown(&self) {
        if !self.requested.send_replace(true) {
            log::info!("Shutdown requested");
        }
    }

    pub fn is_shutdown_requested(&self) -> bool {
        *self.requested.borrow()
    }

    /// Resolve once shutdown has been requested.
    ///
    /// Passed to axum's graceful shutdown: open requests finish, new
    /// connections are refused.
    pub async fn wait_for_shutdown(self) {
        let mut rx = self.requested.subscribe();
        // The sender lives in `self`, so the channel cannot close while waiting.
        if rx.wait_for(|requested| *requested).await.is_ok() {
            log::info!("Shutdown signal received, stopping server...");
        }
    }
}

impl Default for ShutdownState {
    fn default() -> Self {
        Self::new()
    }
}

/// Route SIGINT, SIGTERM and SIGHUP to `state` from a dedicated thread
#[cfg(unix)]
pub fn register_signal_handlers(state: ShutdownState) -> Result<()> {
    use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM, SIGHUP])
        .map_err(|e| anyhow::anyhow!("Failed to register signal handlers: {}", e))?;

    std::thread::spawn(move || {
        for signal in signals.forever() {
            let name = match signal {
                SIGINT => "SIGINT",
                SIGTERM => "SIGTERM",
                SIGHUP => "SIGHUP",
                _ => continue,
            };
            log::info!("Received {}", name);
            state.request_shutdown();
        }
    });

    log::debug!("Signal handlers registered");
    Ok(())
}

/// Route Ctrl+C to `state`
#[cfg(windows)]
pub fn register_signal_handlers(state: ShutdownState) -> Result<()> {
    ctrlc::set_handler(move || {
        log::info!("Received Ctrl+C");
        state.request_shutdown();
    })
    .map_err(|e| anyhow::anyhow!("Failed to register Ctrl+C handler: {}", e))?;

    log::debug!("Ctrl+C handler registered");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_starts_unrequested() {
        assert!(!ShutdownState::new().is_shutdown_requested());
    }

    #[test]
    fn test_request_is_shared_between_clones() {
        let state = ShutdownState::new();
        let handle = state.clone();

        handle.request_shutdown();
        handle.request_shutdown();
        assert!(state.is_shutdown_requested());
    }

    #[tokio::test]
    async fn test_wait_for_shutdown_resolves_after_request() {
        let state = ShutdownState::new();
        let waiter = tokio::spawn(state.clone().wait_for_shutdown());

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        state.request_shutdown();
        tokio::time::timeout(Duration::from_secs(2), waiter)
            .await
            .expect("wait_for_shutdown should resolve")
            .unwrap();
    }

    #[tokio::test]
    async fn test_wait_for_shutdown_after_request_returns_immediately() {
        let state = ShutdownState::new();
        state.request_shutdown();

        tokio::time::timeout(Duration::from_millis(200), state.wait_for_shutdown())
            .await
            .expect("already-requested shutdown should not block");
    }
}
