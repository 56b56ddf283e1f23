//! Session model and the navigation guard predicate.

mod guard;
mod model;

pub use guard::SessionGuard;
pub use model::{AuthMode, Session};

/// Durable key under which the session token is stored.
pub const SESSION_TOKEN_KEY: &str = "session.token";

/// Durable key under which the session user id is stored.
pub const SESSION_USER_KEY: &str = "session.userId";
