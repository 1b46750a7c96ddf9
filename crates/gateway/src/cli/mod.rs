pub mod config;

use clap::{Parser, Subcommand};

/// session-logger: session logs and cross-session hits for tool-calling agents.
#[derive(Debug, Parser)]
#[command(name = "session-logger", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP server (default when no subcommand is given).
    Serve,
    /// Configuration utilities.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Print the tool manifest as JSON.
    Manifest,
    /// Print version information.
    Version,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Parse the config file and report any errors.
    Validate,
    /// Dump the resolved configuration (with defaults) as TOML.
    Show,
}

// ── Config loading helper ─────────────────────────────────────────────

/// Load the configuration from the path in `SL_CONFIG` (or `config.toml`
/// by default). A missing file yields the defaults. Returns the parsed
/// [`Config`](sl_domain::config::Config) and the path that was used.
pub fn load_config() -> anyhow::Result<(sl_domain::config::Config, String)> {
    let config_path = std::env::var("SL_CONFIG").unwrap_or_else(|_| "config.toml".into());
    let config = load_config_from(std::path::Path::new(&config_path))?;
    Ok((config, config_path))
}

fn load_config_from(path: &std::path::Path) -> anyhow::Result<sl_domain::config::Config> {
    if !path.exists() {
        return Ok(sl_domain::config::Config::default());
    }
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("reading {}: {e}", path.display()))?;
    toml::from_str(&raw).map_err(|e| anyhow::anyhow!("parsing {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::parse_from(["session-logger"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_config_show() {
        let cli = Cli::parse_from(["session-logger", "config", "show"]);
        assert!(matches!(cli.command, Some(Command::Config(ConfigCommand::Show))));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = load_config_from(std::path::Path::new("/nonexistent/session-logger.toml")).unwrap();
        assert_eq!(cfg.server.port, 8000);
    }

    #[test]
    fn bad_toml_is_reported_with_path() {
        let dir = std::env::temp_dir().join(format!("sl-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();

        let err = load_config_from(&path).unwrap_err().to_string();
        assert!(err.starts_with("parsing "), "{err}");
        let _ = std::fs::remove_dir_all(&dir);
    }
}
