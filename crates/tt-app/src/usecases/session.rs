use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tt_core::ports::KeyValueStorePort;
use tt_core::session::{SESSION_TOKEN_KEY, SESSION_USER_KEY};
use tt_core::{Session, UserId};

use crate::event::{SessionEvent, SessionEvents};

/// Persists and clears the session the auth module obtains from the auth
/// worker, and announces both over the session event bus.
pub struct SessionStore {
    store: Arc<dyn KeyValueStorePort>,
    events: SessionEvents,
}

impl SessionStore {
    pub fn from_ports(store: Arc<dyn KeyValueStorePort>, events: SessionEvents) -> Self {
        Self { store, events }
    }

    /// The currently persisted token, if any.
    pub async fn token(&self) -> Result<Option<String>> {
        self.store
            .get(SESSION_TOKEN_KEY)
            .await
            .context("read session token")
    }

    /// The currently persisted user id, if any.
    pub async fn user_id(&self) -> Result<Option<UserId>> {
        Ok(self
            .store
            .get(SESSION_USER_KEY)
            .await
            .context("read session user id")?
            .map(UserId::from))
    }

    /// Store a freshly issued session (login, signup or social auth) and
    /// emit [`SessionEvent::LoggedIn`].
    #[tracing::instrument(name = "usecase.session.apply", skip_all, fields(user_id = %session.user_id))]
    pub async fn apply(&self, session: Session) -> Result<()> {
        self.store
            .set(SESSION_TOKEN_KEY, &session.token)
            .await
            .context("persist session token")?;
        self.store
            .set(SESSION_USER_KEY, session.user_id.as_ref())
            .await
            .context("persist session user id")?;

        info!(user_id = %session.user_id, "session applied");
        self.events.emit(SessionEvent::LoggedIn(session));
        Ok(())
    }

    /// Explicit logout: drop both keys and emit [`SessionEvent::LoggedOut`].
    #[tracing::instrument(name = "usecase.session.clear", skip_all)]
    pub async fn clear(&self) -> Result<()> {
        self.store
            .remove(SESSION_TOKEN_KEY)
            .await
            .context("remove session token")?;
        self.store
            .remove(SESSION_USER_KEY)
            .await
            .context("remove session user id")?;

        info!("session cleared");
        self.events.emit(SessionEvent::LoggedOut);
        Ok(())
    }
}
