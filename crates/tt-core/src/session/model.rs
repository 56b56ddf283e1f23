use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// An authenticated session as issued by the auth worker.
///
/// The token is opaque to this application: its presence is the sole
/// authentication signal, no expiry is checked on this side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: UserId,
}

impl Session {
    pub fn new(token: impl Into<String>, user_id: impl Into<UserId>) -> Self {
        Self {
            token: token.into(),
            user_id: user_id.into(),
        }
    }
}

/// Sub-mode of the auth module, dispatched over the hash query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
    ForgotPassword,
    ResetPassword,
    VerifyEmail,
}

impl AuthMode {
    /// Parse the mode from the query portion of a hash, e.g.
    /// `mode=signup&ref=promo`. Unknown or absent modes fall back to login.
    pub fn from_query(query: &str) -> Self {
        query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "mode")
            .map(|(_, value)| match value {
                "signup" => Self::Signup,
                "forgot-password" => Self::ForgotPassword,
                "reset-password" => Self::ResetPassword,
                "verify-email" => Self::VerifyEmail,
                _ => Self::Login,
            })
            .unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Signup => "signup",
            Self::ForgotPassword => "forgot-password",
            Self::ResetPassword => "reset-password",
            Self::VerifyEmail => "verify-email",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_modes() {
        assert_eq!(AuthMode::from_query("mode=signup"), AuthMode::Signup);
        assert_eq!(
            AuthMode::from_query("ref=promo&mode=reset-password"),
            AuthMode::ResetPassword
        );
        assert_eq!(
            AuthMode::from_query("mode=verify-email&token=abc"),
            AuthMode::VerifyEmail
        );
    }

    #[test]
    fn unknown_or_missing_mode_is_login() {
        assert_eq!(AuthMode::from_query(""), AuthMode::Login);
        assert_eq!(AuthMode::from_query("mode=unknown"), AuthMode::Login);
        assert_eq!(AuthMode::from_query("token=abc"), AuthMode::Login);
    }
}
