//! Configuration loading from mcp-client.toml.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use mcp::{DataDirs, ServerConfig};
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server process settings.
    #[serde(default)]
    pub server: ServerSection,

    /// Data directory layout.
    #[serde(default)]
    pub paths: PathsSection,
}

/// `[server]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    /// Server executable. Defaults to mcp-server.sh beside this binary.
    pub command: Option<PathBuf>,

    #[serde(default)]
    pub args: Vec<String>,

    /// Extra environment for the server process.
    #[serde(default)]
    pub env: HashMap<String, String>,

    /// `RUST_LOG` directive for the server.
    pub log_filter: Option<String>,

    pub startup_grace_ms: Option<u64>,
    pub startup_retries: Option<u32>,
    pub startup_backoff_ms: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub max_response_bytes: Option<usize>,
}

/// `[paths]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsSection {
    /// Base data directory; `~/` is expanded.
    pub base_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Resolve into the core's server config, filling defaults.
    pub fn into_server_config(self) -> ServerConfig {
        let defaults = ServerConfig::default();
        let server = self.server;

        ServerConfig {
            command: server.command.unwrap_or(defaults.command),
            args: server.args,
            env: server.env,
            dirs: self
                .paths
                .base_dir
                .map(|base| DataDirs::under(expand_home(&base)))
                .unwrap_or(defaults.dirs),
            log_filter: server.log_filter.unwrap_or(defaults.log_filter),
            startup_grace: server
                .startup_grace_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.startup_grace),
            startup_retries: server.startup_retries.unwrap_or(defaults.startup_retries),
            startup_backoff: server
                .startup_backoff_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.startup_backoff),
            request_timeout: server
                .request_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            max_response_size: server
                .max_response_bytes
                .unwrap_or(defaults.max_response_size),
        }
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::parse("").unwrap().into_server_config();
        let defaults = ServerConfig::default();
        assert_eq!(config.command, defaults.command);
        assert_eq!(config.log_filter, "web_scrape_mcp=debug,info");
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert_eq!(config.dirs, defaults.dirs);
        assert_eq!(config.max_response_size, mcp::MAX_RESPONSE_SIZE);
    }

    #[test]
    fn parse_full_config() {
        let config = Config::parse(
            r#"
            [server]
            command = "/opt/mcp/mcp-server.sh"
            args = ["--stdio"]
            log_filter = "web_scrape_mcp=debug,info"
            startup_grace_ms = 250
            startup_retries = 0
            request_timeout_secs = 5
            max_response_bytes = 4096

            [server.env]
            BRAVE_API_KEY = "secret"

            [paths]
            base_dir = "/var/lib/mcp"
            "#,
        )
        .unwrap()
        .into_server_config();

        assert_eq!(config.command, PathBuf::from("/opt/mcp/mcp-server.sh"));
        assert_eq!(config.args, vec!["--stdio"]);
        assert_eq!(config.log_filter, "web_scrape_mcp=debug,info");
        assert_eq!(config.startup_grace, Duration::from_millis(250));
        assert_eq!(config.startup_retries, 0);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.max_response_size, 4096);
        assert_eq!(config.env.get("BRAVE_API_KEY").map(String::as_str), Some("secret"));
        assert_eq!(config.dirs.thoughts, PathBuf::from("/var/lib/mcp/thoughts"));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = Config::parse("[server]\ncomand = \"x\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn tilde_is_expanded() {
        let expanded = expand_home(Path::new("~/Developer/.mcp"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home.join("Developer/.mcp"));
        }
        assert_eq!(expand_home(Path::new("/abs")), PathBuf::from("/abs"));
    }
}
