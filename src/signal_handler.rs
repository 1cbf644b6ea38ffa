use std::fmt;
use std::io;

use actix_web::dev::ServerHandle;
use tokio::signal;
use tracing::{info, warn};

/// The process signal that ended the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    Interrupt,
    Terminate,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownSignal::Interrupt => write!(f, "SIGINT"),
            ShutdownSignal::Terminate => write!(f, "SIGTERM"),
        }
    }
}

#[cfg(unix)]
pub async fn wait_for_signal() -> io::Result<ShutdownSignal> {
    let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())?;

    tokio::select! {
        res = signal::ctrl_c() => res.map(|_| ShutdownSignal::Interrupt),
        _ = sigterm.recv() => Ok(ShutdownSignal::Terminate),
    }
}

#[cfg(not(unix))]
pub async fn wait_for_signal() -> io::Result<ShutdownSignal> {
    signal::ctrl_c().await?;
    Ok(ShutdownSignal::Interrupt)
}

/// Wait for SIGINT/SIGTERM and stop the server gracefully.
///
/// In-flight requests get the server's shutdown timeout to finish.
pub async fn stop_on_signal(handle: ServerHandle) {
    match wait_for_signal().await {
        Ok(sig) => info!("Received {} - shutting down", sig),
        Err(e) => warn!("Failed to listen for shutdown signals: {}", e),
    }

    handle.stop(true).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_names() {
        assert_eq!(ShutdownSignal::Interrupt.to_string(), "SIGINT");
        assert_eq!(ShutdownSignal::Terminate.to_string(), "SIGTERM");
    }
}
