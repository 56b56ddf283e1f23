use std::sync::Arc;
use std::time::Duration;

use tokio::task::AbortHandle;
use tracing::debug;

use crate::event::SessionEvents;
use crate::usecases::notes::NotesEngine;

/// Drive the engine's identity check: react to session events
/// immediately, and tick on the interval as a fallback for out-of-band
/// changes no event announced.
///
/// Returns the task's abort handle; aborting it stops the poll.
pub fn spawn_identity_poll(
    engine: Arc<NotesEngine>,
    events: &SessionEvents,
    interval: Duration,
) -> AbortHandle {
    let mut rx = events.subscribe();
    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The immediate first tick doubles as the init-time check.
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    debug!("identity poll tick");
                }
                event = rx.recv() => {
                    match event {
                        Ok(event) => debug!(?event, "identity poll woken by session event"),
                        // Lagged or closed: fall through to a check either way.
                        Err(_) => {}
                    }
                }
            }
            engine.poll_identity().await;
        }
    });
    handle.abort_handle()
}
