#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Resolves on the first Ctrl+C (or SIGTERM on unix).
///
/// If a listener cannot be registered it is logged and never fires, so a
/// broken signal setup can not be mistaken for an interrupt.
pub async fn wait_for_interrupt() {
    #[cfg(unix)]
    let mut term_signal = match signal(SignalKind::terminate()) {
        Ok(signal) => Some(signal),
        Err(err) => {
            tracing::warn!("Failed to register SIGTERM handler: {}", err);
            None
        }
    };

    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    {
        tokio::select! {
            () = ctrl_c => {}
            () = async {
                if let Some(signal) = term_signal.as_mut() {
                    signal.recv().await;
                } else {
                    std::future::pending::<()>().await;
                }
            } => {}
        }
    }

    #[cfg(not(unix))]
    ctrl_c.await;
}
