use serde::{Deserialize, Serialize};

/// Notes engine lifecycle state machine
///
/// Design principle: this is a pure type state machine with only state
/// definitions and transition validation logic. Runtime behaviors like
/// polling intervals and network IO are handled by the application layer.
///
/// State transitions:
///
/// ```text
/// Locked ──→ Loading ──→ Synced ⇄ Dirty
///                          │        │
///                          └────────┴─→ ConflictPending ──→ Synced
///                                                        └─→ Dirty
///
/// All states ──→ Locked (identity lost)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineLifecycle {
    /// No identified user; no data held in memory.
    Locked,

    /// Identity present, local blob / cloud snapshot being read.
    Loading,

    /// Local state matches the last confirmed remote save.
    Synced,

    /// Local mutations exist that the remote store has not confirmed.
    Dirty,

    /// A differing remote snapshot arrived while dirty; awaiting user
    /// arbitration.
    ConflictPending,
}

impl EngineLifecycle {
    /// Check if an identity is attached.
    pub fn is_unlocked(self) -> bool {
        self != Self::Locked
    }

    /// Check if mutations are awaiting remote confirmation.
    pub fn is_dirty(self) -> bool {
        matches!(self, Self::Dirty | Self::ConflictPending)
    }

    /// A user identity appeared.
    pub fn unlock(self) -> Option<Self> {
        match self {
            Self::Locked => Some(Self::Loading),
            _ => None,
        }
    }

    /// The identity disappeared. Valid from every state.
    pub fn lock(self) -> Self {
        Self::Locked
    }

    /// Initial load finished (from local blob, defaults, or both).
    pub fn on_loaded(self) -> Option<Self> {
        match self {
            Self::Loading => Some(Self::Synced),
            _ => None,
        }
    }

    /// A local mutation happened.
    pub fn on_mutated(self) -> Option<Self> {
        match self {
            Self::Synced | Self::Dirty => Some(Self::Dirty),
            // Mutations during arbitration keep the conflict open.
            Self::ConflictPending => Some(Self::ConflictPending),
            _ => None,
        }
    }

    /// A differing remote snapshot arrived.
    pub fn on_remote_differs(self) -> Option<Self> {
        match self {
            Self::Synced => Some(Self::Synced),
            Self::Dirty => Some(Self::ConflictPending),
            _ => None,
        }
    }

    /// The user chose a side of the conflict.
    pub fn on_resolved(self) -> Option<Self> {
        match self {
            Self::ConflictPending => Some(Self::Synced),
            _ => None,
        }
    }

    /// A manual sync round-trip finished.
    pub fn on_saved(self, success: bool) -> Self {
        match self {
            Self::Dirty if success => Self::Synced,
            // Failure keeps the dirty flag; the next trigger retries.
            _ => self,
        }
    }
}

impl Default for EngineLifecycle {
    fn default() -> Self {
        Self::Locked
    }
}
