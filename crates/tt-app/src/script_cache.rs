//! Process-wide script load de-duplication.
//!
//! A script URL is inserted into the host document at most once for the
//! lifetime of the process. A request for a URL whose insertion is still
//! in flight waits for that insertion instead of starting another; every
//! waiter observes the same outcome.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use tokio::sync::{oneshot, Mutex};
use tracing::debug;
use tt_core::ports::ScriptHostPort;

enum LoadState {
    /// Insertion started; waiters are notified with the outcome.
    InFlight(Vec<oneshot::Sender<Result<(), String>>>),
    Loaded,
}

#[derive(Default)]
pub struct ScriptLoadCache {
    states: Mutex<HashMap<String, LoadState>>,
}

impl ScriptLoadCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure the script at `url` is present in the document, inserting it
    /// through `host` if this is the first request for it.
    ///
    /// A failed insertion is forgotten, so a later navigation can try
    /// again; the loaded set only ever records successful insertions.
    pub async fn ensure_loaded(&self, host: &Arc<dyn ScriptHostPort>, url: &str) -> Result<()> {
        let waiter = {
            let mut states = self.states.lock().await;
            match states.get_mut(url) {
                Some(LoadState::Loaded) => {
                    debug!(url, "script already loaded");
                    return Ok(());
                }
                Some(LoadState::InFlight(waiters)) => {
                    let (tx, rx) = oneshot::channel();
                    waiters.push(tx);
                    Some(rx)
                }
                None => {
                    states.insert(url.to_string(), LoadState::InFlight(Vec::new()));
                    None
                }
            }
        };

        if let Some(rx) = waiter {
            debug!(url, "joining in-flight script load");
            return match rx.await {
                Ok(Ok(())) => Ok(()),
                Ok(Err(msg)) => Err(anyhow!(msg)),
                Err(_) => Err(anyhow!("in-flight load of {url} was abandoned")),
            };
        }

        let result = host.insert_script(url).await;

        let mut states = self.states.lock().await;
        let waiters = match states.remove(url) {
            Some(LoadState::InFlight(waiters)) => waiters,
            _ => Vec::new(),
        };
        let outcome = match &result {
            Ok(()) => {
                states.insert(url.to_string(), LoadState::Loaded);
                Ok(())
            }
            Err(e) => Err(e.to_string()),
        };
        drop(states);

        for tx in waiters {
            let _ = tx.send(outcome.clone());
        }
        result
    }

    pub async fn is_loaded(&self, url: &str) -> bool {
        matches!(self.states.lock().await.get(url), Some(LoadState::Loaded))
    }
}
