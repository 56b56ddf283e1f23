use std::path::Path;

use anyhow::{Context, Result};
use tt_core::TerminalConfig;

/// Load the terminal configuration: serde defaults, overridden by an
/// optional config file, overridden by `TRADETERM_*` environment
/// variables.
pub fn load_config(file: Option<&Path>) -> Result<TerminalConfig> {
    let mut builder = config::Config::builder()
        .add_source(config::Config::try_from(&TerminalConfig::default()).context("config defaults")?);

    if let Some(path) = file {
        builder = builder.add_source(config::File::from(path.to_path_buf()).required(false));
    }
    builder = builder.add_source(config::Environment::with_prefix("TRADETERM"));

    builder
        .build()
        .context("assemble config")?
        .try_deserialize()
        .context("deserialize config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn no_file_yields_defaults() {
        let cfg = load_config(None).unwrap();
        assert_eq!(cfg, TerminalConfig::default());
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let cfg = load_config(Some(Path::new("/nonexistent/tradeterm.toml"))).unwrap();
        assert_eq!(cfg.identity_poll_secs, TerminalConfig::default().identity_poll_secs);
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "identity_poll_secs = 30").unwrap();
        writeln!(file, "asset_base = \"http://localhost:8080\"").unwrap();

        let cfg = load_config(Some(file.path())).unwrap();
        assert_eq!(cfg.identity_poll_secs, 30);
        assert_eq!(cfg.asset_base, "http://localhost:8080");
        // Untouched fields keep their defaults.
        assert_eq!(cfg.notes_endpoint, TerminalConfig::default().notes_endpoint);
    }
}
