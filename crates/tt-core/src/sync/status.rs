use serde::{Deserialize, Serialize};

/// What the sync indicator in the notes panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncStatus {
    /// Engine locked, indicator not shown.
    Hidden,
    /// A save or fetch round-trip is in flight.
    Syncing,
    /// Last save confirmed by the remote store.
    Synced,
    /// Last save failed; the indicator doubles as the retry affordance.
    RetryNeeded,
    /// A conflict choice is being presented.
    Conflict,
}
