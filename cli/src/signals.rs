use log::{info, warn};
use std::{future::Future, io::Result as IoResult};
use tokio::sync::watch::Sender;

/// Exit status used when a second interrupt forces the process down.
pub const FORCED_EXIT_CODE: i32 = 130;

/// Turns the first interrupt into a graceful shutdown request and keeps
/// listening. Returns `true` once a second interrupt arrives, `false` if
/// interrupts can no longer be observed.
pub async fn listen_for_interrupts<F, Fut>(
    mut next_interrupt: F,
    shutdown_emitter: Sender<bool>,
) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = IoResult<()>>,
{
    if let Err(error) = next_interrupt().await {
        warn!("Unable to listen for Ctrl+C: {}", error);
        return false;
    }
    info!("Ctrl+C received, stopping after the current step; press again to exit now");
    let _ = shutdown_emitter.send(true);

    match next_interrupt().await {
        Ok(()) => true,
        Err(error) => {
            warn!("Unable to listen for a second Ctrl+C: {}", error);
            false
        }
    }
}
