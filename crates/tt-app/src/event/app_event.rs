use tokio::sync::broadcast;
use tt_core::Session;

/// Session lifecycle events.
///
/// Login and logout emit these explicitly; the identity poll stays in
/// place only as a fallback for out-of-band changes (e.g. another tab
/// clearing the stored session).
#[derive(Debug, Clone)]
pub enum SessionEvent {
    LoggedIn(Session),
    LoggedOut,
}

/// Broadcast bus for [`SessionEvent`]s.
#[derive(Clone)]
pub struct SessionEvents {
    tx: broadcast::Sender<SessionEvent>,
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionEvents {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    /// Emit an event. Having no subscriber is not an error; the poll
    /// fallback will pick the change up.
    pub fn emit(&self, event: SessionEvent) {
        let _ = self.tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_emitted_events() {
        let events = SessionEvents::new();
        let mut rx = events.subscribe();

        events.emit(SessionEvent::LoggedIn(Session::new("tok", "user-1")));
        events.emit(SessionEvent::LoggedOut);

        assert!(matches!(rx.recv().await.unwrap(), SessionEvent::LoggedIn(_)));
        assert!(matches!(rx.recv().await.unwrap(), SessionEvent::LoggedOut));
    }

    #[test]
    fn emitting_without_subscribers_is_fine() {
        let events = SessionEvents::new();
        events.emit(SessionEvent::LoggedOut);
    }
}
