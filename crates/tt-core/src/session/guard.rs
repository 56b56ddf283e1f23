use crate::navigation::ModuleId;

/// Predicate gating navigation on the presence of a session token.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionGuard;

impl SessionGuard {
    /// A target is admissible when it is the auth module itself or a
    /// session token is present. Token presence is the whole check; expiry
    /// is the auth worker's concern.
    pub fn admits(&self, target: ModuleId, token: Option<&str>) -> bool {
        target == ModuleId::Auth || token.is_some_and(|t| !t.is_empty())
    }
}
