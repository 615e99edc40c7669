//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.scout/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::research::client::DEFAULT_ENDPOINT;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ScoutConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub endpoint: EndpointConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub placeholder: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EndpointConfig {
    pub url: Option<String>,
    pub timeout_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_PLACEHOLDER: &str = "Écrire un message…";

// ============================================================================
// Resolved Config (concrete values)
// ============================================================================

/// Settings given on the command line. `None` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub endpoint: String,
    /// `None` waits for the service indefinitely.
    pub timeout: Option<Duration>,
    pub placeholder: String,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.scout/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".scout").join("config.toml"))
}

/// Load config from `~/.scout/config.toml`.
pub fn load_config() -> Result<ScoutConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(ScoutConfig::default())
        }
    }
}

/// Load config from `path`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ScoutConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config_from(path: &Path) -> Result<ScoutConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(ScoutConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ScoutConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# Scout Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# placeholder = "Écrire un message…"       # hint shown in the empty input box

# [endpoint]
# url = "http://localhost:8000/research"   # Or set SCOUT_ENDPOINT env var
# timeout_secs = 120                        # Or SCOUT_TIMEOUT_SECS; omit to wait forever
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ScoutConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`] with the environment lookup injected.
pub fn resolve_with_env(
    config: &ScoutConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Endpoint: CLI → env → config → default
    let endpoint = cli
        .endpoint
        .clone()
        .or_else(|| env("SCOUT_ENDPOINT"))
        .or_else(|| config.endpoint.url.clone())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    // Timeout: CLI → env → config → none. Zero means "no timeout".
    let env_timeout = env("SCOUT_TIMEOUT_SECS").and_then(|raw| match raw.trim().parse::<u64>() {
        Ok(secs) => Some(secs),
        Err(e) => {
            warn!("Ignoring SCOUT_TIMEOUT_SECS={:?}: {}", raw, e);
            None
        }
    });
    let timeout = cli
        .timeout_secs
        .or(env_timeout)
        .or(config.endpoint.timeout_secs)
        .filter(|&secs| secs > 0)
        .map(Duration::from_secs);

    let placeholder = config
        .general
        .placeholder
        .clone()
        .unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string());

    ResolvedConfig {
        endpoint,
        timeout,
        placeholder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&ScoutConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(resolved.timeout, None);
        assert_eq!(resolved.placeholder, DEFAULT_PLACEHOLDER);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = ScoutConfig {
            general: GeneralConfig {
                placeholder: Some("Ask away".to_string()),
            },
            endpoint: EndpointConfig {
                url: Some("http://10.0.0.2:9000/research".to_string()),
                timeout_secs: Some(30),
            },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.endpoint, "http://10.0.0.2:9000/research");
        assert_eq!(resolved.timeout, Some(Duration::from_secs(30)));
        assert_eq!(resolved.placeholder, "Ask away");
    }

    #[test]
    fn test_env_overrides_config() {
        let config = ScoutConfig {
            endpoint: EndpointConfig {
                url: Some("http://from-config/research".to_string()),
                timeout_secs: Some(30),
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), |key| match key {
            "SCOUT_ENDPOINT" => Some("http://from-env/research".to_string()),
            "SCOUT_TIMEOUT_SECS" => Some("5".to_string()),
            _ => None,
        });
        assert_eq!(resolved.endpoint, "http://from-env/research");
        assert_eq!(resolved.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_cli_wins_over_env() {
        let cli = CliOverrides {
            endpoint: Some("http://from-cli/research".to_string()),
            timeout_secs: Some(9),
        };
        let resolved = resolve_with_env(&ScoutConfig::default(), &cli, |key| match key {
            "SCOUT_ENDPOINT" => Some("http://from-env/research".to_string()),
            "SCOUT_TIMEOUT_SECS" => Some("5".to_string()),
            _ => None,
        });
        assert_eq!(resolved.endpoint, "http://from-cli/research");
        assert_eq!(resolved.timeout, Some(Duration::from_secs(9)));
    }

    #[test]
    fn test_zero_timeout_disables_it() {
        let cli = CliOverrides {
            timeout_secs: Some(0),
            ..Default::default()
        };
        let resolved = resolve_with_env(&ScoutConfig::default(), &cli, no_env);
        assert_eq!(resolved.timeout, None);
    }

    #[test]
    fn test_unparseable_env_timeout_is_ignored() {
        let config = ScoutConfig {
            endpoint: EndpointConfig {
                timeout_secs: Some(12),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), |key| {
            (key == "SCOUT_TIMEOUT_SECS").then(|| "soon".to_string())
        });
        assert_eq!(resolved.timeout, Some(Duration::from_secs(12)));
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[endpoint]
url = "http://localhost:8001/research"
"#;
        let config: ScoutConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.endpoint.url.as_deref(),
            Some("http://localhost:8001/research")
        );
        assert!(config.endpoint.timeout_secs.is_none());
        assert!(config.general.placeholder.is_none());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("scout-config-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[endpoint\nurl = ").unwrap();

        let result = load_config_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_generates_commented_default() {
        let dir = std::env::temp_dir().join(format!("scout-config-gen-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        let path = dir.join("config.toml");

        let config = load_config_from(&path).unwrap();
        assert!(config.endpoint.url.is_none());

        // Generated file is all comments, so it loads back as defaults
        let reloaded = load_config_from(&path).unwrap();
        assert!(reloaded.endpoint.url.is_none());
        assert!(fs::read_to_string(&path).unwrap().contains("SCOUT_ENDPOINT"));

        let _ = fs::remove_dir_all(&dir);
    }
}
