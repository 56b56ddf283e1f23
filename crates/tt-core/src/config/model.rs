use serde::{Deserialize, Serialize};

/// Endpoints and tunables for the terminal shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Base URL of the notes-sync worker.
    pub notes_endpoint: String,

    /// Base URL of the users/auth worker.
    pub auth_endpoint: String,

    /// Base URL the per-module markup/style/script assets are served from.
    pub asset_base: String,

    /// Seconds between identity-poll ticks. Polling is the fallback for
    /// out-of-band session changes; login/logout also emit events.
    pub identity_poll_secs: u64,

    /// Request timeout for worker calls, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            notes_endpoint: "https://notes-sync.workers.dev".to_string(),
            auth_endpoint: "https://users-auth.workers.dev".to_string(),
            asset_base: String::new(),
            identity_poll_secs: 2,
            request_timeout_secs: 15,
        }
    }
}

impl TerminalConfig {
    /// Conventional markup path for a module.
    pub fn markup_path(module: &str) -> String {
        format!("modules/{module}/{module}.html")
    }

    /// Conventional stylesheet path for a module.
    pub fn stylesheet_path(module: &str) -> String {
        format!("modules/{module}/{module}.css")
    }

    /// Conventional script path for a module.
    pub fn script_path(module: &str) -> String {
        format!("modules/{module}/{module}.js")
    }
}
